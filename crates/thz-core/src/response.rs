//! Array evaluation of the three models and their product, the response
//! function $R(\omega) = g(\omega)\,r_{41}(\omega)$.

use ndarray::Array1;
use num_complex::Complex64;

use thz_materials::{dispersion, electro_optic, CrystalConstants, IndexConvention};

use crate::error::ResponseError;
use crate::thickness::thickness_response;
use crate::types::FrequencyGrid;

/// Refractive index $n(\omega)$ on every grid sample.
pub fn refractive_index(
    grid: &FrequencyGrid,
    constants: &CrystalConstants,
    convention: IndexConvention,
) -> Array1<Complex64> {
    grid.values()
        .mapv(|w| dispersion::refractive_index(w, constants, convention))
}

/// Electro-optic coefficient $r_{41}(\omega)$ on every grid sample.
pub fn electro_optic_coefficient(
    grid: &FrequencyGrid,
    constants: &CrystalConstants,
) -> Array1<Complex64> {
    grid.values()
        .mapv(|w| electro_optic::electro_optic_coefficient(w, constants))
}

/// Combined response $R(\omega)$ of a crystal of the given thickness.
pub fn combined_response(
    grid: &FrequencyGrid,
    constants: &CrystalConstants,
    thickness: f64,
    convention: IndexConvention,
) -> Result<Array1<Complex64>, ResponseError> {
    let n_w = refractive_index(grid, constants, convention);
    let g_w = thickness_response(
        &n_w,
        constants.speed_of_light,
        thickness,
        grid.values(),
        constants.group_index,
    )?;
    let r_w = electro_optic_coefficient(grid, constants);
    Ok(g_w * r_w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_align_with_grid() {
        let c = CrystalConstants::zinc_telluride();
        let grid = FrequencyGrid::linspace(1.0, 50.0, 50).unwrap();
        assert_eq!(refractive_index(&grid, &c, IndexConvention::default()).len(), 50);
        assert_eq!(electro_optic_coefficient(&grid, &c).len(), 50);
        assert_eq!(
            combined_response(&grid, &c, 2.0, IndexConvention::default())
                .unwrap()
                .len(),
            50
        );
    }

    #[test]
    fn test_combined_is_elementwise_product() {
        let c = CrystalConstants::zinc_telluride();
        let grid = FrequencyGrid::linspace(1.0, 10.0, 10).unwrap();
        let n = refractive_index(&grid, &c, IndexConvention::VacuumCorrection);
        let g = thickness_response(&n, c.speed_of_light, 3.0, grid.values(), c.group_index)
            .unwrap();
        let r = electro_optic_coefficient(&grid, &c);
        let total = combined_response(&grid, &c, 3.0, IndexConvention::VacuumCorrection).unwrap();
        for i in 0..grid.len() {
            assert_eq!(total[i], g[i] * r[i]);
        }
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let c = CrystalConstants::zinc_telluride();
        let grid = FrequencyGrid::linspace(1.0, 10.0, 10).unwrap();
        assert!(matches!(
            combined_response(&grid, &c, 0.0, IndexConvention::default()),
            Err(ResponseError::InvalidThickness(_))
        ));
    }
}
