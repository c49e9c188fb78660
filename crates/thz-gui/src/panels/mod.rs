//! GUI panels for the response viewer.

pub mod crystal;
pub mod plot;
pub mod sweep;
