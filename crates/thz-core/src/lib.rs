//! # THz Core
//!
//! The numerical pipeline behind the ZnTe response function
//! $R(\omega) = g(\omega)\,r_{41}(\omega)$.
//!
//! ## Pipeline
//!
//! constants → [`FrequencyGrid`] → $n(\omega)$, $g(\omega)$, $r_{41}(\omega)$
//! → elementwise product → optional DFT → real or imaginary part.
//!
//! ## Modules
//!
//! - [`types`]: Frequency grid, transform/part selectors, result containers.
//! - [`thickness`]: Phase-mismatch propagation response $g(\omega)$.
//! - [`response`]: Array evaluation of the models and their product.
//! - [`transform`]: Discrete Fourier transform.
//! - [`sweep`]: Thickness sweep (animation frames) and fine sweep drivers.

pub mod error;
pub mod response;
pub mod sweep;
pub mod thickness;
pub mod transform;
pub mod types;

pub use error::ResponseError;
pub use sweep::{FineSweep, ThicknessSweep};
pub use types::{FrequencyGrid, Part, ResponseSpectrum, SpectrumRecord, Transform};
