//! Physical constants of a single-phonon electro-optic crystal.
//!
//! All quantities follow one unit convention:
//!
//! | Quantity | Unit |
//! |----------|------|
//! | Frequencies ($\omega$, $\omega_{TO}$, $\omega_{LO}$, $\gamma$) | grid units (THz in the ZnTe preset) |
//! | Thickness $d$ | length unit $L$ (μm in the plots) |
//! | `speed_of_light` | $L \cdot$ grid-frequency unit |
//! | `hbar` | dimensionless: maps a grid frequency onto the phonon frequency scale |
//!
//! With `hbar = 1` and `speed_of_light = 1` the formulas are evaluated in
//! natural units. [`REDUCED_PLANCK_SI`] reproduces the SI-valued variant in
//! which the phonon term is effectively frozen at its static value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reduced Planck constant in J·s (CODATA 2018).
pub const REDUCED_PLANCK_SI: f64 = 1.054_571_817e-34;

/// Errors raised when a set of crystal constants cannot be evaluated.
#[derive(Debug, Error, PartialEq)]
pub enum MaterialError {
    #[error("Lattice damping must be strictly positive, got {0}")]
    NonPositiveDamping(f64),

    #[error("Transverse phonon frequency must be strictly positive, got {0}")]
    NonPositiveTransverseFrequency(f64),

    #[error("Effective speed of light must be strictly positive, got {0}")]
    NonPositiveSpeedOfLight(f64),

    #[error("Constant '{name}' is not finite ({value})")]
    NotFinite { name: &'static str, value: f64 },
}

/// Constants describing the THz response of a zinc-blende crystal with a
/// single transverse-optical phonon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrystalConstants {
    /// Transverse optical phonon frequency $\omega_{TO}$.
    pub w_to: f64,
    /// Longitudinal optical phonon frequency $\omega_{LO}$.
    pub w_lo: f64,
    /// Lattice damping $\gamma$.
    pub gamma: f64,
    /// High-frequency dielectric constant $\epsilon_\infty$.
    pub epsilon_inf: f64,
    /// Faust-Henry coefficient: ratio of ionic to electronic electro-optic contribution.
    pub faust_henry: f64,
    /// Group refractive index of the optical probe.
    pub group_index: f64,
    /// Electronic electro-optic coefficient $r_e$, constant in the mid/far infrared.
    pub r_electronic: f64,
    /// Effective speed of light.
    pub speed_of_light: f64,
    /// Frequency scaling factor (see the module docs).
    pub hbar: f64,
}

impl CrystalConstants {
    /// Zinc telluride with a 800 nm probe.
    pub fn zinc_telluride() -> Self {
        Self {
            w_to: 177.0,
            w_lo: 206.0,
            gamma: 3.01,
            epsilon_inf: 6.7,
            faust_henry: 0.02,
            group_index: 2.8528,
            r_electronic: 1.0,
            speed_of_light: 1.0,
            hbar: 1.0,
        }
    }

    /// Same constants with the SI reduced Planck constant as frequency scale.
    pub fn with_si_hbar(self) -> Self {
        Self {
            hbar: REDUCED_PLANCK_SI,
            ..self
        }
    }

    /// Check the constants for values that make every formula degenerate.
    ///
    /// Resonances inside a frequency grid are *not* rejected here; those are
    /// a property of the grid, not of the crystal.
    pub fn validate(&self) -> Result<(), MaterialError> {
        let named = [
            ("w_to", self.w_to),
            ("w_lo", self.w_lo),
            ("gamma", self.gamma),
            ("epsilon_inf", self.epsilon_inf),
            ("faust_henry", self.faust_henry),
            ("group_index", self.group_index),
            ("r_electronic", self.r_electronic),
            ("speed_of_light", self.speed_of_light),
            ("hbar", self.hbar),
        ];
        if let Some(&(name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MaterialError::NotFinite { name, value });
        }

        if self.gamma <= 0.0 {
            return Err(MaterialError::NonPositiveDamping(self.gamma));
        }
        if self.w_to <= 0.0 {
            return Err(MaterialError::NonPositiveTransverseFrequency(self.w_to));
        }
        if self.speed_of_light <= 0.0 {
            return Err(MaterialError::NonPositiveSpeedOfLight(self.speed_of_light));
        }
        Ok(())
    }
}

impl Default for CrystalConstants {
    fn default() -> Self {
        Self::zinc_telluride()
    }
}
