//! Sweep drivers: the per-thickness animation sweep and the single-thickness
//! fine sweep.
//!
//! Both drivers validate their parameters and the crystal constants up front,
//! then evaluate each spectrum from scratch. Resonances that fall on the
//! frequency grid are not detected; their samples come out huge, infinite or
//! NaN.

use std::ops::RangeInclusive;

use log::debug;

use thz_materials::{CrystalConstants, IndexConvention, REDUCED_PLANCK_SI};

use crate::error::ResponseError;
use crate::response::combined_response;
use crate::types::{FrequencyGrid, Part, ResponseSpectrum, Transform};

/// Lowest sampled frequency of both sweeps. Starting at 1 keeps `w = 0` off
/// the grid.
pub const GRID_START: f64 = 1.0;

/// Evaluate one spectrum: build the grid, combine the models, transform.
pub fn compute_spectrum(
    constants: &CrystalConstants,
    thickness: f64,
    max_frequency: f64,
    points: usize,
    convention: IndexConvention,
    transform: Transform,
) -> Result<ResponseSpectrum, ResponseError> {
    let grid = FrequencyGrid::linspace(GRID_START, max_frequency, points)?;
    let response = combined_response(&grid, constants, thickness, convention)?;
    Ok(ResponseSpectrum {
        thickness,
        frequencies: grid.values().clone(),
        values: transform.apply(response),
        transform,
    })
}

/// Sweep over integer thicknesses `1..=max_thickness`, one frame each.
#[derive(Debug, Clone)]
pub struct ThicknessSweep {
    /// Largest thickness, in the thickness unit of the constants.
    pub max_thickness: u32,
    /// Upper end of the frequency grid. The grid has one sample per unit
    /// frequency, so its length equals this value.
    pub max_frequency: u32,
    pub convention: IndexConvention,
    pub transform: Transform,
    /// Component drawn for each frame.
    pub part: Part,
    /// Fixed vertical range of every frame, so frames are comparable.
    pub y_range: [f64; 2],
    /// Frequency scale used in place of `CrystalConstants::hbar` for every
    /// frame. The default SI value keeps the phonon terms at their static
    /// values, which is what the published animation shows.
    pub hbar: f64,
}

impl Default for ThicknessSweep {
    fn default() -> Self {
        Self {
            max_thickness: 200,
            max_frequency: 200,
            convention: IndexConvention::VacuumCorrection,
            transform: Transform::DiscreteFourier,
            part: Part::Imaginary,
            y_range: [-0.025, 0.015],
            hbar: REDUCED_PLANCK_SI,
        }
    }
}

impl ThicknessSweep {
    /// Sweep where thickness and frequency share the same maximum.
    pub fn up_to(max: u32) -> Self {
        Self {
            max_thickness: max,
            max_frequency: max,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ResponseError> {
        if self.max_thickness == 0 {
            return Err(ResponseError::InvalidSweep(
                "max_thickness must be at least 1".into(),
            ));
        }
        if self.max_frequency == 0 {
            return Err(ResponseError::InvalidSweep(
                "max_frequency must be at least 1".into(),
            ));
        }
        if !(self.hbar.is_finite() && self.hbar > 0.0) {
            return Err(ResponseError::InvalidSweep(format!(
                "hbar must be finite and positive, got {}",
                self.hbar
            )));
        }
        if !(self.y_range[0] < self.y_range[1]) {
            return Err(ResponseError::InvalidSweep(format!(
                "y_range must be increasing, got {:?}",
                self.y_range
            )));
        }
        Ok(())
    }

    /// The constants every frame is evaluated with: `constants` with the
    /// sweep's `hbar`.
    pub fn frame_constants(&self, constants: &CrystalConstants) -> CrystalConstants {
        CrystalConstants {
            hbar: self.hbar,
            ..*constants
        }
    }

    /// Lazily computed frames in ascending thickness order.
    ///
    /// A frame is evaluated only when the iterator is advanced, so a consumer
    /// that writes each frame finishes it before the next is computed.
    pub fn frames(&self, constants: &CrystalConstants) -> Result<ThicknessFrames<'_>, ResponseError> {
        self.validate()?;
        let constants = self.frame_constants(constants);
        constants.validate()?;
        Ok(ThicknessFrames {
            sweep: self,
            constants,
            thicknesses: 1..=self.max_thickness,
        })
    }

    /// Compute every frame eagerly.
    pub fn run(&self, constants: &CrystalConstants) -> Result<Vec<ResponseSpectrum>, ResponseError> {
        self.frames(constants)?.collect()
    }
}

/// Iterator over the frames of a [`ThicknessSweep`].
pub struct ThicknessFrames<'a> {
    sweep: &'a ThicknessSweep,
    constants: CrystalConstants,
    thicknesses: RangeInclusive<u32>,
}

impl Iterator for ThicknessFrames<'_> {
    type Item = Result<ResponseSpectrum, ResponseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let thickness = self.thicknesses.next()?;
        debug!("Computing frame for thickness {}", thickness);

        Some(compute_spectrum(
            &self.constants,
            f64::from(thickness),
            f64::from(self.sweep.max_frequency),
            self.sweep.max_frequency as usize,
            self.sweep.convention,
            self.sweep.transform,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.thicknesses.size_hint()
    }
}

/// High-resolution sweep at a single thickness.
#[derive(Debug, Clone)]
pub struct FineSweep {
    pub thickness: f64,
    /// Upper end of the frequency grid.
    pub max_frequency: f64,
    /// Grid density: the grid has `max_frequency * samples_per_unit` samples.
    pub samples_per_unit: usize,
    /// Frequency window `[lo, hi]` shown by renderers.
    pub window: [f64; 2],
    pub convention: IndexConvention,
    pub transform: Transform,
    pub part: Part,
    /// Render the vertical axis logarithmically.
    pub log_y: bool,
}

impl Default for FineSweep {
    fn default() -> Self {
        Self {
            thickness: 5.0,
            max_frequency: 200.0,
            samples_per_unit: 100,
            window: [0.0, 20.0],
            convention: IndexConvention::VacuumCorrection,
            transform: Transform::None,
            part: Part::Real,
            log_y: true,
        }
    }
}

impl FineSweep {
    /// Number of grid samples.
    pub fn points(&self) -> usize {
        (self.max_frequency * self.samples_per_unit as f64).round() as usize
    }

    pub fn validate(&self) -> Result<(), ResponseError> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(ResponseError::InvalidThickness(self.thickness));
        }
        if !(self.max_frequency.is_finite() && self.max_frequency >= GRID_START) {
            return Err(ResponseError::InvalidSweep(format!(
                "max_frequency must be at least {}, got {}",
                GRID_START, self.max_frequency
            )));
        }
        if self.samples_per_unit == 0 {
            return Err(ResponseError::InvalidSweep(
                "samples_per_unit must be at least 1".into(),
            ));
        }
        if !(self.window[0] < self.window[1]) {
            return Err(ResponseError::InvalidSweep(format!(
                "window must be increasing, got {:?}",
                self.window
            )));
        }
        Ok(())
    }

    pub fn run(&self, constants: &CrystalConstants) -> Result<ResponseSpectrum, ResponseError> {
        self.validate()?;
        constants.validate()?;
        debug!(
            "Fine sweep: d={}, {} samples over [{}, {}]",
            self.thickness,
            self.points(),
            GRID_START,
            self.max_frequency
        );
        compute_spectrum(
            constants,
            self.thickness,
            self.max_frequency,
            self.points(),
            self.convention,
            self.transform,
        )
    }

    /// The displayed curve: `(frequency, component)` inside the window.
    pub fn curve(&self, spectrum: &ResponseSpectrum) -> Vec<(f64, f64)> {
        spectrum.windowed(self.part, self.window[0], self.window[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_in_thickness_order() {
        let c = CrystalConstants::zinc_telluride();
        let sweep = ThicknessSweep::up_to(4);
        let thicknesses: Vec<f64> = sweep
            .frames(&c)
            .unwrap()
            .map(|f| f.unwrap().thickness)
            .collect();
        assert_eq!(thicknesses, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_size_hint_counts_remaining_frames() {
        let c = CrystalConstants::zinc_telluride();
        let sweep = ThicknessSweep::up_to(3);
        let mut frames = sweep.frames(&c).unwrap();
        assert_eq!(frames.size_hint(), (3, Some(3)));
        frames.next();
        assert_eq!(frames.size_hint(), (2, Some(2)));
    }

    #[test]
    fn test_invalid_sweeps_rejected() {
        let c = CrystalConstants::zinc_telluride();
        assert!(ThicknessSweep::up_to(0).frames(&c).is_err());
        let bad_damping = CrystalConstants {
            gamma: -1.0,
            ..c
        };
        assert!(matches!(
            ThicknessSweep::up_to(2).frames(&bad_damping),
            Err(ResponseError::Material(_))
        ));
        let fine = FineSweep {
            window: [20.0, 0.0],
            ..Default::default()
        };
        assert!(fine.run(&c).is_err());
    }

    #[test]
    fn test_frames_stop_at_largest_thickness() {
        let c = CrystalConstants::zinc_telluride();
        let sweep = ThicknessSweep {
            max_thickness: u32::MAX,
            max_frequency: 2,
            ..Default::default()
        };
        let mut frames = sweep.frames(&c).unwrap();
        assert_eq!(frames.size_hint().1, Some(u32::MAX as usize));

        frames.thicknesses = (u32::MAX - 1)..=u32::MAX;
        let last: Vec<f64> = frames.map(|f| f.unwrap().thickness).collect();
        assert_eq!(last, vec![f64::from(u32::MAX - 1), f64::from(u32::MAX)]);
    }

    #[test]
    fn test_non_positive_hbar_rejected() {
        let sweep = ThicknessSweep {
            hbar: 0.0,
            ..ThicknessSweep::up_to(2)
        };
        assert!(matches!(sweep.validate(), Err(ResponseError::InvalidSweep(_))));
    }

    #[test]
    fn test_fine_sweep_point_count() {
        let fine = FineSweep {
            max_frequency: 200.0,
            samples_per_unit: 100,
            ..Default::default()
        };
        assert_eq!(fine.points(), 20_000);
    }
}
