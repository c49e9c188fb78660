//! Core types shared across the response pipeline.
//!
//! This module defines the frequency grid every model is evaluated on and the
//! container for one computed spectrum.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// An ordered, strictly increasing set of sample frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    values: Array1<f64>,
}

impl FrequencyGrid {
    /// `points` evenly spaced frequencies from `start` to `end`, both included.
    ///
    /// A single point yields `[start]`. The last sample is pinned to `end`.
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self, ResponseError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ResponseError::InvalidGrid(format!(
                "bounds must be finite, got [{}, {}]",
                start, end
            )));
        }
        if points == 0 {
            return Err(ResponseError::InvalidGrid("grid needs at least one point".into()));
        }
        if points == 1 {
            return Ok(Self {
                values: Array1::from(vec![start]),
            });
        }
        if end <= start {
            return Err(ResponseError::InvalidGrid(format!(
                "end ({}) must exceed start ({})",
                end, start
            )));
        }

        let step = (end - start) / (points - 1) as f64;
        let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
        values[points - 1] = end;

        // Steps below the f64 spacing can collapse neighbouring samples.
        Self::from_values(values)
    }

    /// Build a grid from explicit samples, checking the ordering invariant.
    pub fn from_values(values: Vec<f64>) -> Result<Self, ResponseError> {
        if values.is_empty() {
            return Err(ResponseError::InvalidGrid("grid needs at least one point".into()));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ResponseError::InvalidGrid(format!(
                "sample {} is not finite",
                i
            )));
        }
        if let Some(i) = (1..values.len()).find(|&i| values[i] <= values[i - 1]) {
            return Err(ResponseError::InvalidGrid(format!(
                "samples must be strictly increasing at index {}",
                i
            )));
        }
        Ok(Self {
            values: Array1::from(values),
        })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a grid holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

/// Optional transform applied to the combined response before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// Keep $R(\omega)$ as computed.
    #[default]
    None,
    /// Unnormalised forward discrete Fourier transform.
    #[serde(rename = "fourier")]
    DiscreteFourier,
}

/// Which component of a complex spectrum is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Part {
    #[default]
    Real,
    Imaginary,
}

impl Part {
    pub fn of(&self, z: Complex64) -> f64 {
        match self {
            Self::Real => z.re,
            Self::Imaginary => z.im,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Real => "Re",
            Self::Imaginary => "Im",
        }
    }
}

/// The response computed for one crystal thickness.
#[derive(Debug, Clone)]
pub struct ResponseSpectrum {
    /// Crystal thickness this spectrum was computed for.
    pub thickness: f64,
    /// Sample frequencies, index-aligned with `values`.
    pub frequencies: Array1<f64>,
    /// $R(\omega)$, or its transform when `transform` is not [`Transform::None`].
    pub values: Array1<Complex64>,
    /// Transform that produced `values` from $R(\omega)$.
    pub transform: Transform,
}

impl ResponseSpectrum {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Real or imaginary part of every sample.
    pub fn component(&self, part: Part) -> Array1<f64> {
        self.values.mapv(|z| part.of(z))
    }

    /// `(frequency, component)` pairs whose frequency lies in `[lo, hi]`.
    ///
    /// Values are not filtered; non-finite samples near a resonance are kept.
    pub fn windowed(&self, part: Part, lo: f64, hi: f64) -> Vec<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.values.iter())
            .filter(|(&w, _)| w >= lo && w <= hi)
            .map(|(&w, &z)| (w, part.of(z)))
            .collect()
    }

    /// Flattened, serialisable copy of this spectrum.
    pub fn record(&self) -> SpectrumRecord {
        SpectrumRecord {
            thickness: self.thickness,
            transform: self.transform,
            frequency: self.frequencies.to_vec(),
            real: self.values.iter().map(|z| z.re).collect(),
            imag: self.values.iter().map(|z| z.im).collect(),
        }
    }
}

/// Serialisable form of a [`ResponseSpectrum`].
///
/// Samples on a resonance may be infinite or NaN. JSON has no number for
/// those, so `real` and `imag` store them as the strings `"NaN"`, `"inf"`
/// and `"-inf"`; reading a record back restores the original values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumRecord {
    pub thickness: f64,
    pub transform: Transform,
    pub frequency: Vec<f64>,
    #[serde(with = "non_finite_as_text")]
    pub real: Vec<f64>,
    #[serde(with = "non_finite_as_text")]
    pub imag: Vec<f64>,
}

mod non_finite_as_text {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Sample {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|&v| {
            if v.is_finite() {
                Sample::Number(v)
            } else {
                Sample::Text(v.to_string())
            }
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Sample>::deserialize(deserializer)?
            .into_iter()
            .map(|sample| match sample {
                Sample::Number(v) => Ok(v),
                Sample::Text(text) => text
                    .parse::<f64>()
                    .map_err(|_| D::Error::custom(format!("invalid sample '{}'", text))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_keeps_non_finite_samples() {
        let spectrum = ResponseSpectrum {
            thickness: 2.0,
            frequencies: Array1::from(vec![1.0, 2.0, 3.0]),
            values: Array1::from(vec![
                Complex64::new(0.5, f64::NAN),
                Complex64::new(f64::INFINITY, -0.25),
                Complex64::new(f64::NEG_INFINITY, 1.0),
            ]),
            transform: Transform::None,
        };
        let json = serde_json::to_string(&spectrum.record()).unwrap();
        assert!(json.contains("\"NaN\""));
        assert!(json.contains("\"inf\""));
        assert!(json.contains("\"-inf\""));
        assert!(!json.contains("null"));

        let back: SpectrumRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.real[0], 0.5);
        assert_eq!(back.real[1], f64::INFINITY);
        assert_eq!(back.real[2], f64::NEG_INFINITY);
        assert!(back.imag[0].is_nan());
        assert_eq!(back.imag[1..], [-0.25, 1.0]);
    }

    #[test]
    fn test_record_json_rejects_unknown_text() {
        let json = r#"{"thickness":1.0,"transform":"none","frequency":[1.0],"real":["big"],"imag":[0.0]}"#;
        assert!(serde_json::from_str::<SpectrumRecord>(json).is_err());
    }

    #[test]
    fn test_integer_grid() {
        let grid = FrequencyGrid::linspace(1.0, 200.0, 200).unwrap();
        assert_eq!(grid.len(), 200);
        for (i, &w) in grid.values().iter().enumerate() {
            assert_eq!(w, (i + 1) as f64);
        }
    }

    #[test]
    fn test_fine_grid_endpoints() {
        let grid = FrequencyGrid::linspace(1.0, 200.0, 20_000).unwrap();
        assert_eq!(grid.first(), 1.0);
        assert_eq!(grid.last(), 200.0);
        assert!(grid.values().to_vec().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_single_point_grid() {
        let grid = FrequencyGrid::linspace(3.0, 3.0, 1).unwrap();
        assert_eq!(grid.values().to_vec(), vec![3.0]);
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(FrequencyGrid::linspace(1.0, 10.0, 0).is_err());
        assert!(FrequencyGrid::linspace(10.0, 1.0, 5).is_err());
        assert!(FrequencyGrid::linspace(1.0, f64::INFINITY, 5).is_err());
        assert!(FrequencyGrid::from_values(vec![1.0, 2.0, 2.0]).is_err());
        assert!(FrequencyGrid::from_values(vec![]).is_err());
    }

    #[test]
    fn test_windowed_keeps_only_window() {
        let spectrum = ResponseSpectrum {
            thickness: 1.0,
            frequencies: Array1::from(vec![1.0, 5.0, 10.0, 25.0]),
            values: Array1::from(vec![
                Complex64::new(1.0, -1.0),
                Complex64::new(2.0, -2.0),
                Complex64::new(3.0, -3.0),
                Complex64::new(4.0, -4.0),
            ]),
            transform: Transform::None,
        };
        let pts = spectrum.windowed(Part::Imaginary, 0.0, 10.0);
        assert_eq!(pts, vec![(1.0, -1.0), (5.0, -2.0), (10.0, -3.0)]);
    }
}
