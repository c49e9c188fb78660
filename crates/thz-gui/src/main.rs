//! THz response viewer entry point.
//!
//! ```sh
//! thz-gui            # ZnTe defaults
//! thz-gui job.toml   # [crystal], [model] and [fine] sections of a job file
//! ```

mod app;
mod config;
mod panels;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "thz-gui")]
#[command(about = "Interactive viewer for the THz response of ZnTe")]
#[command(version)]
struct Cli {
    /// Job configuration file (defaults when omitted).
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let initial = match &cli.config {
        Some(path) => config::load_viewer_config(path)?,
        None => config::ViewerConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "THz Response",
        options,
        Box::new(move |_cc| Ok(Box::new(app::ResponseApp::new(initial)))),
    )
    .map_err(|e| anyhow::anyhow!("Viewer failed: {}", e))
}
