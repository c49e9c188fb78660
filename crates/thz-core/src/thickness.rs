//! Propagation response of a crystal of finite thickness.
//!
//! The optical probe travels with the group index $n_g$, the THz wave with the
//! phase index $n(\omega)$. Integrating the mismatched phase over the crystal
//! thickness $d$ gives
//!
//! $$
//! \int_0^d e^{-i 2\pi\omega (n_g - n) z / c}\,dz
//!   = \frac{c\left(e^{-i 2\pi\omega d (n_g - n)/c} - 1\right)}{-i 2\pi\omega (n_g - n)}
//! $$
//!
//! whose limit for $\omega \to 0$ or $n_g \to n$ is $d$. The response
//! $g(\omega)$ is the Fresnel transmission $2/(n + 1)$ times this integral
//! divided by $d$.

use ndarray::{Array1, Zip};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::ResponseError;

/// Below this phase magnitude the closed form is replaced by its series.
const SERIES_PHASE_THRESHOLD: f64 = 1e-8;

/// Accumulated mismatch phase $\varphi = 2\pi\omega d (n_g - n) / c$.
fn mismatch_phase(w: f64, d: f64, mismatch: Complex64, c: f64) -> Complex64 {
    2.0 * PI * w * d * mismatch / c
}

/// Phase-mismatch integral $\int_0^d e^{-i 2\pi\omega (n_g - n) z / c}\,dz$.
///
/// Finite everywhere: at vanishing phase it returns $d(1 - i\varphi/2)$, which
/// is exactly `d` for `w == 0` or `mismatch == 0`.
pub fn mismatch_integral(w: f64, d: f64, mismatch: Complex64, c: f64) -> Complex64 {
    let phase = mismatch_phase(w, d, mismatch, c);
    if phase.norm() < SERIES_PHASE_THRESHOLD {
        return d * (1.0 - Complex64::i() * phase / 2.0);
    }
    let numerator = c * ((-Complex64::i() * phase).exp() - 1.0);
    let denominator = -Complex64::i() * 2.0 * PI * w * mismatch;
    numerator / denominator
}

/// Thickness-normalised mismatch factor, the bracketed term of $g(\omega)$.
///
/// Tends to 1 where [`mismatch_integral`] tends to $d$.
pub fn mismatch_factor(w: f64, d: f64, mismatch: Complex64, c: f64) -> Complex64 {
    let phase = mismatch_phase(w, d, mismatch, c);
    if phase.norm() < SERIES_PHASE_THRESHOLD {
        return 1.0 - Complex64::i() * phase / 2.0;
    }
    let numerator = c * ((-Complex64::i() * phase).exp() - 1.0);
    let denominator = -Complex64::i() * 2.0 * PI * w * d * mismatch;
    numerator / denominator
}

/// Thickness response at one frequency:
/// $g = \frac{2}{n + 1} \cdot \frac{c\,(e^{-i\varphi} - 1)}{-i 2\pi\omega d (n_g - n)}$.
pub fn thickness_response_at(n_w: Complex64, c: f64, d: f64, w: f64, n_g: f64) -> Complex64 {
    let transmission = 2.0 / (n_w + 1.0);
    transmission * mismatch_factor(w, d, n_g - n_w, c)
}

/// Thickness response $g(\omega)$ over a frequency array.
///
/// `n_w` and `w` must be index-aligned.
pub fn thickness_response(
    n_w: &Array1<Complex64>,
    c: f64,
    d: f64,
    w: &Array1<f64>,
    n_g: f64,
) -> Result<Array1<Complex64>, ResponseError> {
    if n_w.len() != w.len() {
        return Err(ResponseError::LengthMismatch {
            left: n_w.len(),
            right: w.len(),
        });
    }
    if !(d.is_finite() && d > 0.0) {
        return Err(ResponseError::InvalidThickness(d));
    }
    Ok(Zip::from(n_w)
        .and(w)
        .map_collect(|&n, &freq| thickness_response_at(n, c, d, freq, n_g)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_integral_tends_to_thickness_for_small_mismatch() {
        let d = 5.0;
        for mismatch in [1e-6, 1e-7, 1e-9] {
            let integral = mismatch_integral(10.0, d, Complex64::new(mismatch, 0.0), 1.0);
            assert_relative_eq!(integral.re, d, max_relative = 1e-5);
            assert!(integral.im.abs() < 1e-2 * d);
        }
    }

    #[test]
    fn test_exact_limits_are_finite() {
        let d = 3.0;
        let at_zero_freq = mismatch_integral(0.0, d, Complex64::new(0.3, 0.01), 1.0);
        assert_eq!(at_zero_freq, Complex64::new(d, 0.0));

        let at_matched_index = mismatch_factor(12.0, d, Complex64::new(0.0, 0.0), 1.0);
        assert_eq!(at_matched_index, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_matched_index_reduces_to_fresnel_transmission() {
        let n = Complex64::new(2.8528, 0.0);
        let g = thickness_response_at(n, 1.0, 4.0, 20.0, 2.8528);
        let fresnel = 2.0 / (n + 1.0);
        assert_relative_eq!(g.re, fresnel.re, epsilon = 1e-15);
        assert_relative_eq!(g.im, fresnel.im, epsilon = 1e-15);
    }

    #[test]
    fn test_closed_form_matches_numerical_integral() {
        // Trapezoid rule on the defining integral.
        let (w, d, c) = (2.0, 1.5, 1.0);
        let mismatch = Complex64::new(0.4, 0.05);
        let steps = 20_000;
        let dz = d / steps as f64;
        let integrand =
            |z: f64| (-Complex64::i() * 2.0 * PI * w * mismatch * z / c).exp();
        let mut sum = (integrand(0.0) + integrand(d)) / 2.0;
        for k in 1..steps {
            sum += integrand(k as f64 * dz);
        }
        let numeric = sum * dz;
        let closed = mismatch_integral(w, d, mismatch, c);
        assert_relative_eq!(closed.re, numeric.re, epsilon = 1e-6);
        assert_relative_eq!(closed.im, numeric.im, epsilon = 1e-6);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let n = Array1::from(vec![Complex64::new(3.0, 0.0); 3]);
        let w = Array1::from(vec![1.0, 2.0]);
        assert!(matches!(
            thickness_response(&n, 1.0, 1.0, &w, 2.85),
            Err(ResponseError::LengthMismatch { left: 3, right: 2 })
        ));
    }
}
