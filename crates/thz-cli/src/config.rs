//! TOML configuration deserialisation for response jobs.
//!
//! Every section is optional; an empty file reproduces the ZnTe defaults.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use thz_core::{FineSweep, Part, ThicknessSweep, Transform};
use thz_materials::{CrystalConstants, IndexConvention, REDUCED_PLANCK_SI};

/// Top-level job configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub crystal: CrystalConstants,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub fine: FineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Model choices shared by both sweeps.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// "vacuum-correction" (default) or "reciprocal".
    #[serde(default)]
    pub convention: IndexConvention,
}

/// Thickness sweep (animation) parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    #[serde(default = "default_max_thickness")]
    pub max_thickness: u32,
    /// Defaults to `max_thickness`.
    #[serde(default)]
    pub max_frequency: Option<u32>,
    #[serde(default = "default_sweep_transform")]
    pub transform: Transform,
    #[serde(default = "default_sweep_part")]
    pub part: Part,
    #[serde(default = "default_y_range")]
    pub y_range: [f64; 2],
    /// Frequency scale of the sweep. Overrides `[crystal] hbar`, which only
    /// applies to the fine sweep.
    #[serde(default = "default_sweep_hbar")]
    pub hbar: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_thickness: default_max_thickness(),
            max_frequency: None,
            transform: default_sweep_transform(),
            part: default_sweep_part(),
            y_range: default_y_range(),
            hbar: default_sweep_hbar(),
        }
    }
}

fn default_max_thickness() -> u32 {
    200
}
fn default_sweep_transform() -> Transform {
    Transform::DiscreteFourier
}
fn default_sweep_part() -> Part {
    Part::Imaginary
}
fn default_y_range() -> [f64; 2] {
    [-0.025, 0.015]
}
fn default_sweep_hbar() -> f64 {
    REDUCED_PLANCK_SI
}

/// Fine (single thickness) sweep parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FineConfig {
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default = "default_max_frequency")]
    pub max_frequency: f64,
    #[serde(default = "default_samples_per_unit")]
    pub samples_per_unit: usize,
    #[serde(default = "default_window")]
    pub window: [f64; 2],
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub part: Part,
    #[serde(default = "default_true")]
    pub log_y: bool,
}

impl Default for FineConfig {
    fn default() -> Self {
        Self {
            thickness: default_thickness(),
            max_frequency: default_max_frequency(),
            samples_per_unit: default_samples_per_unit(),
            window: default_window(),
            transform: Transform::None,
            part: Part::Real,
            log_y: true,
        }
    }
}

fn default_thickness() -> f64 {
    5.0
}
fn default_max_frequency() -> f64 {
    200.0
}
fn default_samples_per_unit() -> usize {
    100
}
fn default_window() -> [f64; 2] {
    [0.0, 20.0]
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory (default: current directory).
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// File name of the animation inside `directory`.
    #[serde(default = "default_animation")]
    pub animation: String,
    /// Delay between animation frames in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
    /// Frame size in pixels.
    #[serde(default = "default_frame_size")]
    pub frame_size: [u32; 2],
    /// Whether the fine sweep also writes `response.csv` (default: false).
    #[serde(default)]
    pub save_csv: bool,
    /// Whether the fine sweep also writes `response.json` (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            animation: default_animation(),
            frame_delay_ms: default_frame_delay_ms(),
            frame_size: default_frame_size(),
            save_csv: false,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}
fn default_animation() -> String {
    "movie.gif".into()
}
fn default_frame_delay_ms() -> u32 {
    100
}
fn default_frame_size() -> [u32; 2] {
    [640, 480]
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    pub fn thickness_sweep(&self) -> ThicknessSweep {
        ThicknessSweep {
            max_thickness: self.sweep.max_thickness,
            max_frequency: self.sweep.max_frequency.unwrap_or(self.sweep.max_thickness),
            convention: self.model.convention,
            transform: self.sweep.transform,
            part: self.sweep.part,
            y_range: self.sweep.y_range,
            hbar: self.sweep.hbar,
        }
    }

    pub fn fine_sweep(&self) -> FineSweep {
        FineSweep {
            thickness: self.fine.thickness,
            max_frequency: self.fine.max_frequency,
            samples_per_unit: self.fine.samples_per_unit,
            window: self.fine.window,
            convention: self.model.convention,
            transform: self.fine.transform,
            part: self.fine.part,
            log_y: self.fine.log_y,
        }
    }

    /// Check the crystal and both sweeps without computing anything.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.crystal.validate().context("[crystal]")?;
        self.thickness_sweep().validate().context("[sweep]")?;
        self.fine_sweep().validate().context("[fine]")?;
        if self.output.frame_size.iter().any(|&px| px == 0) {
            anyhow::bail!("[output] frame_size must be non-zero, got {:?}", self.output.frame_size);
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read configuration '{}'", path.display()))?;
    let config: JobConfig = toml::from_str(&content)
        .with_context(|| format!("Cannot parse configuration '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if given, otherwise use the defaults.
pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<JobConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(JobConfig::default()),
    }
}
