//! Saturation vapour pressure over water.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownName;

/// Saturation vapour pressure at 0 °C (hPa).
const ES0_HPA: f64 = 6.1078;

/// Herman Wobus polynomial coefficients, lowest order first.
const WOBUS: [f64; 10] = [
    0.999_996_83,
    -0.908_269_51e-2,
    0.787_361_69e-4,
    0.611_179_58e-6,
    0.438_841_87e-8,
    0.298_838_85e-10,
    0.218_744_25e-12,
    0.178_923_21e-14,
    0.111_120_18e-16,
    0.309_945_71e-19,
];

/// Wobus coefficients with alternating signs on the odd terms from c3 on.
const WOBUS_ALTERNATING: [f64; 10] = [
    0.999_996_83,
    -0.908_269_51e-2,
    0.787_361_69e-4,
    -0.611_179_58e-6,
    0.438_841_87e-8,
    -0.298_838_85e-10,
    0.218_744_25e-12,
    -0.178_923_21e-14,
    0.111_120_18e-16,
    -0.309_945_71e-19,
];

/// Formula used to evaluate saturation vapour pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VaporPressureModel {
    /// Ninth-degree Herman Wobus polynomial, `6.1078 / P(T)^8`.
    #[default]
    HermanWobus,
    /// The same polynomial with c3, c5, c7 and c9 negated. Stays monotonic up
    /// to +50 °C and tracks Tetens closely over the whole range.
    WobusAlternating,
    /// Tetens approximation, `6.1078 * 10^(7.5 T / (237.3 + T))`.
    Tetens,
}

impl VaporPressureModel {
    /// Config names accepted by [`FromStr`].
    pub const NAMES: &[&str] = &["wobus", "wobus-alternating", "tetens"];

    /// Saturation vapour pressure (hPa) at `temperature_c` (°C).
    pub fn pressure_hpa(self, temperature_c: f64) -> f64 {
        match self {
            Self::HermanWobus => saturation_vapor_pressure_hpa(temperature_c),
            Self::WobusAlternating => wobus(&WOBUS_ALTERNATING, temperature_c),
            Self::Tetens => ES0_HPA * 10f64.powf(7.5 * temperature_c / (237.3 + temperature_c)),
        }
    }
}

impl FromStr for VaporPressureModel {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wobus" => Ok(Self::HermanWobus),
            "wobus-alternating" => Ok(Self::WobusAlternating),
            "tetens" => Ok(Self::Tetens),
            other => Err(UnknownName::new("vapor model", other, Self::NAMES)),
        }
    }
}

impl fmt::Display for VaporPressureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HermanWobus => f.write_str("wobus"),
            Self::WobusAlternating => f.write_str("wobus-alternating"),
            Self::Tetens => f.write_str("tetens"),
        }
    }
}

/// Saturation vapour pressure (hPa, equivalently mbar) at `temperature_c` (°C).
///
/// Evaluates the Herman Wobus polynomial in Horner form. No range check is
/// applied; the fit is intended for roughly -50 °C to +50 °C and returns
/// non-physical values far outside it. With these coefficients the curve
/// rises with temperature up to about +35.6 °C and flattens out above.
///
/// # Examples
///
/// ```
/// use wind_yield::physics::saturation_vapor_pressure_hpa;
///
/// let p0 = saturation_vapor_pressure_hpa(0.0);
/// assert!((p0 - 6.1078).abs() < 1e-3);
/// ```
pub fn saturation_vapor_pressure_hpa(temperature_c: f64) -> f64 {
    wobus(&WOBUS, temperature_c)
}

fn wobus(coefficients: &[f64; 10], temperature_c: f64) -> f64 {
    let pol = coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| c + temperature_c * acc);
    ES0_HPA / pol.powi(8)
}

/// Elementwise [`saturation_vapor_pressure_hpa`] over a temperature series.
pub fn saturation_vapor_pressure(temperature_c: &[f64]) -> Vec<f64> {
    temperature_c
        .iter()
        .map(|&t| saturation_vapor_pressure_hpa(t))
        .collect()
}
