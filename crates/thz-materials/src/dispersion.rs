//! Phonon-resonant refractive index in the terahertz band.
//!
//! A single Lorentz oscillator at the transverse optical phonon frequency
//! gives the resonant denominator
//!
//! $$
//! D(\omega) = \omega_{TO}^2 - (\hbar\omega)^2 - i\hbar\omega\gamma
//! $$
//!
//! and the phonon strength term $L(\omega) = (\omega_{LO}^2 - \omega_{TO}^2) / D(\omega)$.
//! Two historical conventions combine $L$ with $\epsilon_\infty$, selected by
//! [`IndexConvention`].
//!
//! # Branch convention
//!
//! Every square root is [`Complex64::sqrt`], the principal branch: the
//! result has a non-negative real part and the cut lies on the negative real
//! axis. Complex division is the ordinary one; nothing is regularised near
//! $D(\omega) = 0$.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::constants::CrystalConstants;

/// How $\epsilon_\infty$ enters the refractive index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexConvention {
    /// $n = \sqrt{1 + \epsilon_\infty L(\omega)}$: the phonon term, weighted by
    /// $\epsilon_\infty$, corrects the vacuum index.
    #[default]
    VacuumCorrection,
    /// $n = 1 / \sqrt{\epsilon_\infty (1 + L(\omega))}$: $\epsilon_\infty$ is the
    /// baseline permittivity that the phonon term corrects.
    Reciprocal,
}

impl IndexConvention {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VacuumCorrection => "vacuum correction",
            Self::Reciprocal => "reciprocal",
        }
    }
}

/// Resonant denominator $D(\omega)$.
pub fn phonon_denominator(w: f64, constants: &CrystalConstants) -> Complex64 {
    let hw = constants.hbar * w;
    Complex64::new(constants.w_to * constants.w_to - hw * hw, -hw * constants.gamma)
}

/// Phonon strength term $L(\omega) = (\omega_{LO}^2 - \omega_{TO}^2) / D(\omega)$.
pub fn phonon_term(w: f64, constants: &CrystalConstants) -> Complex64 {
    let splitting = constants.w_lo * constants.w_lo - constants.w_to * constants.w_to;
    Complex64::from(splitting) / phonon_denominator(w, constants)
}

/// Squared index under the vacuum-correction convention, $1 + \epsilon_\infty L(\omega)$.
pub fn dielectric_function(w: f64, constants: &CrystalConstants) -> Complex64 {
    1.0 + phonon_term(w, constants) * constants.epsilon_inf
}

/// Complex refractive index $n(\omega)$ at a single frequency.
pub fn refractive_index(
    w: f64,
    constants: &CrystalConstants,
    convention: IndexConvention,
) -> Complex64 {
    match convention {
        IndexConvention::VacuumCorrection => dielectric_function(w, constants).sqrt(),
        IndexConvention::Reciprocal => {
            let eps = constants.epsilon_inf * (1.0 + phonon_term(w, constants));
            eps.sqrt().inv()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_limit_matches_lyddane_sachs_teller() {
        // At w = 0, D = w_TO^2, so n^2 = 1 + eps_inf (w_LO^2 - w_TO^2) / w_TO^2.
        let c = CrystalConstants::zinc_telluride();
        let n = refractive_index(0.0, &c, IndexConvention::VacuumCorrection);
        let expected = (1.0
            + c.epsilon_inf * (c.w_lo * c.w_lo - c.w_to * c.w_to) / (c.w_to * c.w_to))
            .sqrt();
        assert_relative_eq!(n.re, expected, epsilon = 1e-14);
        assert_eq!(n.im, 0.0);
    }

    #[test]
    fn test_principal_branch_below_resonance() {
        let c = CrystalConstants::zinc_telluride();
        for convention in [IndexConvention::VacuumCorrection, IndexConvention::Reciprocal] {
            for i in 1..177 {
                let n = refractive_index(i as f64, &c, convention);
                assert!(n.re >= 0.0, "Re n < 0 at w={} ({:?})", i, convention);
            }
        }
    }

    #[test]
    fn test_principal_branch_on_negative_radicand() {
        // Inverted phonon pair: the radicand sits just below the negative real axis.
        let c = CrystalConstants {
            w_to: 6.18,
            w_lo: 5.3,
            gamma: 0.09,
            ..CrystalConstants::zinc_telluride()
        };
        let eps = dielectric_function(1.0, &c);
        assert!(eps.re < 0.0 && eps.im < 0.0);
        let n = refractive_index(1.0, &c, IndexConvention::VacuumCorrection);
        assert!(n.re > 0.0);
        assert!(n.im < 0.0);
        let square = n * n;
        assert_relative_eq!(square.re, eps.re, epsilon = 1e-12);
        assert_relative_eq!(square.im, eps.im, epsilon = 1e-12);
    }

    #[test]
    fn test_reciprocal_is_inverse_of_baseline_index() {
        let c = CrystalConstants::zinc_telluride();
        let w = 42.0;
        let n = refractive_index(w, &c, IndexConvention::Reciprocal);
        let baseline = (c.epsilon_inf * (1.0 + phonon_term(w, &c))).sqrt();
        let product = n * baseline;
        assert_relative_eq!(product.re, 1.0, epsilon = 1e-14);
        assert!(product.im.abs() < 1e-14);
    }

    #[test]
    fn test_loss_grows_toward_resonance() {
        let c = CrystalConstants::zinc_telluride();
        let far = dielectric_function(20.0, &c);
        let near = dielectric_function(170.0, &c);
        assert!(near.im.abs() > far.im.abs());
    }
}
