//! Kinetic wind power through the rotor disk and electrical turbine output.

use crate::error::{Result, ensure_len};
use crate::turbine::PowerCurve;

const W_PER_KW: f64 = 1000.0;

/// Kinetic power (kW) of the wind crossing a disk of `area_m2`.
///
/// `p = area * rho * v^3 / 2`, elementwise. No cut-in/cut-out gating happens
/// here; the result is the raw aerodynamic resource.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `air_density` and `wind_speed_ms` differ in length.
///
/// # Examples
///
/// ```
/// use wind_yield::physics::input_power_kw;
///
/// let area = std::f64::consts::PI * 46.5_f64.powi(2);
/// let p = input_power_kw(area, &[1.225], &[10.0]).unwrap();
/// assert!((p[0] - 4160.7).abs() < 1.0);
/// ```
pub fn input_power_kw(area_m2: f64, air_density: &[f64], wind_speed_ms: &[f64]) -> Result<Vec<f64>> {
    ensure_len("air_density/wind_speed", air_density.len(), wind_speed_ms.len())?;

    Ok(air_density
        .iter()
        .zip(wind_speed_ms)
        .map(|(&rho, &v)| area_m2 * rho * v.powi(3) / 2.0 / W_PER_KW)
        .collect())
}

/// Electrical output power (kW) of a turbine.
///
/// Applied per element, in order:
/// 1. input power is zero where `wind_speed < cut_in` or `wind_speed > cut_out`;
/// 2. `p_out = power_coefficient * p_in`;
/// 3. values above `rated_power_kw` are replaced by exactly `rated_power_kw`.
///
/// A supplied `power_curve` is accepted but does not change step 2: the
/// curve lookup is not defined yet and both branches use the Cp conversion.
///
/// The caller's `input_power_kw` slice is left untouched.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `input_power_kw` and `wind_speed_ms` differ in length.
pub fn output_power_kw(
    rated_power_kw: f64,
    input_power_kw: &[f64],
    power_coefficient: f64,
    power_curve: Option<&PowerCurve>,
    cut_in_ms: f64,
    cut_out_ms: f64,
    wind_speed_ms: &[f64],
) -> Result<Vec<f64>> {
    ensure_len("input_power/wind_speed", input_power_kw.len(), wind_speed_ms.len())?;

    // Curve lookup is not defined yet; both arms use the Cp conversion.
    let convert = |p_in: f64| match power_curve {
        None => power_coefficient * p_in,
        Some(_) => power_coefficient * p_in,
    };

    Ok(input_power_kw
        .iter()
        .zip(wind_speed_ms)
        .map(|(&p_in, &v)| {
            let gated = if v < cut_in_ms || v > cut_out_ms {
                0.0
            } else {
                p_in
            };
            let p_out = convert(gated);
            if p_out > rated_power_kw {
                rated_power_kw
            } else {
                p_out
            }
        })
        .collect())
}
