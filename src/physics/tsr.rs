//! Tip-speed ratio: blade-tip linear speed over free-stream wind speed.

use crate::error::{ModelError, Result};

/// Tip-speed ratio `tip_speed / wind_speed`.
///
/// # Errors
///
/// Returns [`ModelError::ZeroWindSpeed`] when `wind_speed_ms` is exactly zero.
/// Negative or non-finite inputs are divided through unchanged.
///
/// # Examples
///
/// ```
/// use wind_yield::physics::tip_speed_ratio;
///
/// assert_eq!(tip_speed_ratio(80.0, 10.0).unwrap(), 8.0);
/// assert!(tip_speed_ratio(80.0, 0.0).is_err());
/// ```
pub fn tip_speed_ratio(tip_speed_ms: f64, wind_speed_ms: f64) -> Result<f64> {
    if wind_speed_ms == 0.0 {
        return Err(ModelError::ZeroWindSpeed);
    }
    Ok(tip_speed_ms / wind_speed_ms)
}

/// Elementwise tip-speed ratio for a fixed tip speed.
///
/// Calm samples map to `None` instead of aborting the whole series.
pub fn tip_speed_ratios(tip_speed_ms: f64, wind_speed_ms: &[f64]) -> Vec<Option<f64>> {
    wind_speed_ms
        .iter()
        .map(|&v| tip_speed_ratio(tip_speed_ms, v).ok())
        .collect()
}
