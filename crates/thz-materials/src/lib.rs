//! # THz Materials
//!
//! Optical constants of electro-optic crystals in the terahertz band. The
//! crystal is described by a single transverse-optical phonon, which shapes
//! both the refractive index seen by the THz wave and the electro-optic
//! coefficient seen by the optical probe.
//!
//! ## Modules
//!
//! | Module | Content |
//! |--------|---------|
//! | [`constants`] | [`CrystalConstants`], the ZnTe preset and validation |
//! | [`dispersion`] | Refractive index $n(\omega)$ and its [`IndexConvention`] |
//! | [`electro_optic`] | Electro-optic coefficient $r_{41}(\omega)$ |
//!
//! Every function here is pure and evaluates one frequency; array versions
//! live in `thz-core`.

pub mod constants;
pub mod dispersion;
pub mod electro_optic;

pub use constants::{CrystalConstants, MaterialError, REDUCED_PLANCK_SI};
pub use dispersion::{refractive_index, IndexConvention};
pub use electro_optic::electro_optic_coefficient;
