//! Humid-air density by partial-pressure mixing of dry air and water vapour.

use crate::error::{Result, ensure_len};

use super::vapor::VaporPressureModel;

/// Specific gas constant of dry air, J/(kg·K) (R / M_d with M_d = 28.964 g/mol).
pub const R_DRY_AIR: f64 = 287.05;
/// Specific gas constant of water vapour, J/(kg·K) (R / M_v with M_v = 18.016 g/mol).
pub const R_WATER_VAPOR: f64 = 461.495;
/// Offset from degrees Celsius to kelvin.
pub const ZERO_CELSIUS_K: f64 = 273.15;

const PA_PER_HPA: f64 = 100.0;

/// Density (kg/m³) of moist air for one sample.
///
/// * `temperature_c` - air temperature (°C)
/// * `relative_humidity` - fraction in `[0, 1]`
/// * `pressure_hpa` - total barometric pressure (hPa)
///
/// No clamping is applied: a vapour pressure above the total pressure gives a
/// negative dry-air term and the result is returned as is.
pub fn humid_air_density_with(
    model: VaporPressureModel,
    temperature_c: f64,
    relative_humidity: f64,
    pressure_hpa: f64,
) -> f64 {
    let p_vapor = relative_humidity * model.pressure_hpa(temperature_c);
    let p_dry = pressure_hpa - p_vapor;
    let t_k = temperature_c + ZERO_CELSIUS_K;

    (p_dry * PA_PER_HPA) / (R_DRY_AIR * t_k) + (p_vapor * PA_PER_HPA) / (R_WATER_VAPOR * t_k)
}

/// Elementwise humid-air density over aligned series.
///
/// Uses the Herman Wobus vapour-pressure polynomial.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`](crate::error::ModelError::ShapeMismatch)
/// before computing anything if the three slices differ in length.
///
/// # Examples
///
/// ```
/// use wind_yield::physics::humid_air_density;
///
/// let rho = humid_air_density(&[15.0], &[0.0], &[1013.25]).unwrap();
/// assert!((rho[0] - 1.225).abs() < 1e-3);
/// ```
pub fn humid_air_density(
    temperature_c: &[f64],
    relative_humidity: &[f64],
    pressure_hpa: &[f64],
) -> Result<Vec<f64>> {
    humid_air_density_series(
        VaporPressureModel::HermanWobus,
        temperature_c,
        relative_humidity,
        pressure_hpa,
    )
}

/// [`humid_air_density`] with an explicit vapour-pressure model.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the slices differ in length.
pub fn humid_air_density_series(
    model: VaporPressureModel,
    temperature_c: &[f64],
    relative_humidity: &[f64],
    pressure_hpa: &[f64],
) -> Result<Vec<f64>> {
    let n = temperature_c.len();
    ensure_len("temperature/relative_humidity", n, relative_humidity.len())?;
    ensure_len("temperature/pressure", n, pressure_hpa.len())?;

    Ok(temperature_c
        .iter()
        .zip(relative_humidity)
        .zip(pressure_hpa)
        .map(|((&t, &rh), &p)| humid_air_density_with(model, t, rh, p))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn dry_standard_atmosphere() {
        let rho = humid_air_density(&[15.0], &[0.0], &[1013.25]).unwrap();
        assert!((rho[0] - 1.225).abs() / 1.225 < 0.01);
    }

    #[test]
    fn humid_air_is_lighter_than_dry_air() {
        let rho = humid_air_density(&[30.0, 30.0], &[0.0, 1.0], &[1013.0, 1013.0]).unwrap();
        assert!(rho[1] < rho[0]);
        assert!((rho[0] - 1.16411).abs() < 1e-4);
        assert!((rho[1] - 1.15105).abs() < 1e-4);
    }

    #[test]
    fn conformance_sample() {
        let rho = humid_air_density(&[10.0], &[0.7], &[1013.0]).unwrap();
        assert!((rho[0] - 1.242_384).abs() < 1e-5);
    }

    #[test]
    fn shape_mismatch_humidity() {
        let err = humid_air_density(&[10.0, 11.0], &[0.5], &[1000.0, 1000.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ShapeMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn shape_mismatch_pressure() {
        let err = humid_air_density(&[10.0], &[0.5], &[1000.0, 990.0]).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn output_aligned_with_input() {
        let t = [0.0, 5.0, 10.0, 15.0];
        let rh = [0.9, 0.8, 0.7, 0.6];
        let p = [1020.0, 1015.0, 1010.0, 1005.0];
        let rho = humid_air_density(&t, &rh, &p).unwrap();
        assert_eq!(rho.len(), 4);
        for w in rho.windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn no_clamping_of_unphysical_inputs() {
        // Vapour pressure above total pressure leaves a negative dry-air term.
        let rho = humid_air_density_with(VaporPressureModel::HermanWobus, 40.0, 1.0, 10.0);
        assert!(rho < 0.0);
    }

    #[test]
    fn empty_series_is_empty() {
        assert!(humid_air_density(&[], &[], &[]).unwrap().is_empty());
    }
}
