//! THz response command-line interface.
//!
//! Compute the ZnTe response function from optional TOML configuration files:
//! ```sh
//! thz-cli sweep job.toml
//! thz-cli fine job.toml -o plots
//! thz-cli validate job.toml
//! thz-cli constants
//! ```

mod animation;
mod config;
mod render;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use thz_materials::CrystalConstants;

#[derive(Parser)]
#[command(name = "thz-cli")]
#[command(about = "Terahertz response function of ZnTe")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep thicknesses 1..=N, write one frame per thickness and an animation.
    Sweep {
        /// Path to the job configuration file (defaults when omitted).
        config: Option<PathBuf>,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate one thickness on a fine grid and plot the frequency window.
    Fine {
        /// Path to the job configuration file (defaults when omitted).
        config: Option<PathBuf>,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without computing anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print the built-in ZnTe constants.
    Constants,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep { config, output } => {
            println!("THz response: thickness sweep");
            println!("=============================");
            let job = config::load_or_default(config.as_deref())?;
            if let Some(path) = &config {
                println!("Configuration: {}", path.display());
            }
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            let result = runner::run_thickness_sweep(&job, &out_dir)?;
            println!(
                "Sweep complete: {} frames, animation {}",
                result.frames.len(),
                result.animation.display()
            );
            Ok(())
        }
        Commands::Fine { config, output } => {
            println!("THz response: fine sweep");
            println!("========================");
            let job = config::load_or_default(config.as_deref())?;
            if let Some(path) = &config {
                println!("Configuration: {}", path.display());
            }
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            let result = runner::run_fine_sweep(&job, &out_dir)?;
            println!(
                "Fine sweep complete: {} samples, chart {}",
                result.spectrum.len(),
                result.chart.display()
            );
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Constants => {
            let c = CrystalConstants::zinc_telluride();
            println!("ZnTe constants (frequency in THz, thickness in micrometers):");
            println!();
            println!("  w_to           {:>8}   transverse optical phonon", c.w_to);
            println!("  w_lo           {:>8}   longitudinal optical phonon", c.w_lo);
            println!("  gamma          {:>8}   phonon damping", c.gamma);
            println!("  epsilon_inf    {:>8}   high-frequency permittivity", c.epsilon_inf);
            println!("  faust_henry    {:>8}   Faust-Henry coefficient", c.faust_henry);
            println!("  group_index    {:>8}   optical group index", c.group_index);
            println!("  r_electronic   {:>8}   electronic electro-optic coefficient", c.r_electronic);
            println!("  speed_of_light {:>8}   in thickness x frequency units", c.speed_of_light);
            println!("  hbar           {:>8}   frequency scale of the phonon terms", c.hbar);
            Ok(())
        }
    }
}
