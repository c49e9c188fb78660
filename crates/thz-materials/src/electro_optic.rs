//! Frequency-dependent electro-optic coefficient $r_{41}(\omega)$.
//!
//! The ionic (phonon) contribution is added to the electronic one, weighted by
//! the Faust-Henry coefficient $C$:
//!
//! $$
//! r_{41}(\omega) = r_e \left(1 + \frac{C}{1 - \left((\hbar\omega)^2 - i\hbar\omega\gamma\right)/\omega_{TO}^2}\right)
//! $$

use num_complex::Complex64;

use crate::constants::CrystalConstants;

/// Complex electro-optic coefficient at a single frequency.
///
/// Singular where $(\hbar\omega)^2 - i\hbar\omega\gamma = \omega_{TO}^2$; the
/// value is returned unmasked.
pub fn electro_optic_coefficient(w: f64, constants: &CrystalConstants) -> Complex64 {
    let hw = constants.hbar * w;
    let reduced = Complex64::new(hw * hw, -hw * constants.gamma) / (constants.w_to * constants.w_to);
    let ionic = constants.faust_henry * (1.0 - reduced).inv();
    constants.r_electronic * (1.0 + ionic)
}
