//! Errors raised while setting up a response computation.
//!
//! Numerical singularities are never reported here: values at or near a
//! phonon resonance propagate into the arrays unchanged.

use thiserror::Error;
use thz_materials::MaterialError;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Invalid frequency grid: {0}")]
    InvalidGrid(String),

    #[error("Crystal thickness must be positive and finite, got {0}")]
    InvalidThickness(f64),

    #[error("Array length mismatch: {left} samples vs {right} samples")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Invalid crystal constants: {0}")]
    Material(#[from] MaterialError),
}
