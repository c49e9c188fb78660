//! Viewer start-up configuration.
//!
//! Reads the same TOML job files as the command-line tool. Only the sections
//! the viewer uses are parsed; `[sweep]` and `[output]` are ignored.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use thz_core::{FineSweep, Part, Transform};
use thz_materials::{CrystalConstants, IndexConvention};

#[derive(Debug, Default, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub crystal: CrystalConstants,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub fine: FineSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelSection {
    #[serde(default)]
    pub convention: IndexConvention,
}

/// The `[fine]` table. Missing keys take the [`FineSweep`] defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FineSection {
    pub thickness: Option<f64>,
    pub max_frequency: Option<f64>,
    pub samples_per_unit: Option<usize>,
    pub window: Option<[f64; 2]>,
    pub transform: Option<Transform>,
    pub part: Option<Part>,
    pub log_y: Option<bool>,
}

impl ViewerConfig {
    pub fn fine_sweep(&self) -> FineSweep {
        let d = FineSweep::default();
        let f = &self.fine;
        FineSweep {
            thickness: f.thickness.unwrap_or(d.thickness),
            max_frequency: f.max_frequency.unwrap_or(d.max_frequency),
            samples_per_unit: f.samples_per_unit.unwrap_or(d.samples_per_unit),
            window: f.window.unwrap_or(d.window),
            convention: self.model.convention,
            transform: f.transform.unwrap_or(d.transform),
            part: f.part.unwrap_or(d.part),
            log_y: f.log_y.unwrap_or(d.log_y),
        }
    }
}

pub fn load_viewer_config(path: &Path) -> anyhow::Result<ViewerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read configuration '{}'", path.display()))?;
    let config: ViewerConfig = toml::from_str(&content)
        .with_context(|| format!("Cannot parse configuration '{}'", path.display()))?;
    config.crystal.validate().context("[crystal]")?;
    config.fine_sweep().validate().context("[fine]")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_file_sections_are_picked_up() {
        let src = r#"
            [crystal]
            gamma = 2.0
            [model]
            convention = "reciprocal"
            [sweep]
            max_thickness = 4
            [fine]
            thickness = 7.5
            window = [2.0, 12.0]
            [output]
            save_csv = true
        "#;
        let cfg: ViewerConfig = toml::from_str(src).unwrap();
        let fine = cfg.fine_sweep();
        assert_eq!(cfg.crystal.gamma, 2.0);
        assert_eq!(fine.convention, IndexConvention::Reciprocal);
        assert_eq!(fine.thickness, 7.5);
        assert_eq!(fine.window, [2.0, 12.0]);
        assert_eq!(fine.samples_per_unit, FineSweep::default().samples_per_unit);
        assert!(fine.log_y);
    }
}
