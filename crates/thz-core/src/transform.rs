//! Discrete Fourier transform of a sampled response.
//!
//! Uses the unnormalised forward convention
//! $X_k = \sum_{n=0}^{N-1} x_n e^{-2\pi i k n / N}$, so a transform followed
//! by the matching inverse scales the input by $N$. Arbitrary lengths are
//! supported (the thickness sweep uses $N$ = maximum frequency).

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::types::Transform;

/// Forward DFT of `values`.
pub fn discrete_fourier(values: &Array1<Complex64>) -> Array1<Complex64> {
    let mut buffer = values.to_vec();
    if buffer.is_empty() {
        return Array1::from(buffer);
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    Array1::from(buffer)
}

impl Transform {
    /// Apply this transform to a combined response.
    pub fn apply(&self, values: Array1<Complex64>) -> Array1<Complex64> {
        match self {
            Self::None => values,
            Self::DiscreteFourier => discrete_fourier(&values),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DiscreteFourier => "discrete Fourier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn direct_dft(x: &[Complex64]) -> Vec<Complex64> {
        let n = x.len();
        (0..n)
            .map(|k| {
                x.iter()
                    .enumerate()
                    .map(|(j, &v)| {
                        v * Complex64::from_polar(1.0, -2.0 * PI * (k * j) as f64 / n as f64)
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_impulse_transforms_to_ones() {
        let mut x = vec![Complex64::new(0.0, 0.0); 7];
        x[0] = Complex64::new(1.0, 0.0);
        let out = discrete_fourier(&Array1::from(x));
        for z in out.iter() {
            assert_abs_diff_eq!(z.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_matches_direct_dft_for_non_power_of_two() {
        let x: Vec<Complex64> = (0..12)
            .map(|i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let fast = discrete_fourier(&Array1::from(x.clone()));
        let slow = direct_dft(&x);
        for (a, b) in fast.iter().zip(slow.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-10);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_none_is_identity() {
        let x = Array1::from(vec![Complex64::new(1.5, -2.0), Complex64::new(0.25, 4.0)]);
        assert_eq!(Transform::None.apply(x.clone()), x);
    }

    #[test]
    fn test_empty_input() {
        let out = discrete_fourier(&Array1::from(Vec::<Complex64>::new()));
        assert!(out.is_empty());
    }
}
