//! Weather samples, validated series, and the sources that supply them.

/// Long-format CSV weather files.
pub mod csv_source;
/// Seeded synthetic weather generator.
pub mod synthetic;

pub use csv_source::CsvWeather;
pub use synthetic::{SyntheticParams, SyntheticWeather};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, ModelError, Result};
use crate::sites::Site;

/// Forecast variables for one location at one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    /// Air temperature at the reference height (°C).
    pub temperature_c: f64,
    /// Relative humidity as a fraction in `[0, 1]`.
    pub relative_humidity: f64,
    /// Surface pressure (hPa).
    pub surface_pressure_hpa: f64,
    /// Wind speed at the reference height (m/s).
    pub wind_speed_ms: f64,
}

/// Time-ordered weather samples at a fixed interval.
///
/// Construction checks that timestamps increase strictly by exactly
/// `interval`; the series is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSeries {
    samples: Vec<WeatherSample>,
    interval: TimeDelta,
}

impl WeatherSeries {
    /// Wraps `samples` spaced `interval` apart.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidSeries`] if `interval` is not positive or
    /// any consecutive pair of timestamps is not exactly `interval` apart.
    pub fn new(samples: Vec<WeatherSample>, interval: TimeDelta) -> Result<Self> {
        if interval <= TimeDelta::zero() {
            return Err(ModelError::InvalidSeries {
                reason: format!("interval must be positive, got {interval}"),
            });
        }
        if let Some((i, w)) = samples
            .windows(2)
            .enumerate()
            .find(|(_, w)| w[1].timestamp - w[0].timestamp != interval)
        {
            return Err(ModelError::InvalidSeries {
                reason: format!(
                    "samples {i} and {} are {} apart ({} -> {}), expected {interval}",
                    i + 1,
                    w[1].timestamp - w[0].timestamp,
                    w[0].timestamp,
                    w[1].timestamp
                ),
            });
        }
        Ok(Self { samples, interval })
    }

    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// Interval length in hours, used to turn power into energy.
    pub fn interval_hours(&self) -> f64 {
        self.interval.num_seconds() as f64 / 3600.0
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn temperatures_c(&self) -> Vec<f64> {
        self.column(|s| s.temperature_c)
    }

    pub fn relative_humidity(&self) -> Vec<f64> {
        self.column(|s| s.relative_humidity)
    }

    pub fn surface_pressure_hpa(&self) -> Vec<f64> {
        self.column(|s| s.surface_pressure_hpa)
    }

    pub fn wind_speed_ms(&self) -> Vec<f64> {
        self.column(|s| s.wind_speed_ms)
    }

    fn column(&self, f: impl Fn(&WeatherSample) -> f64) -> Vec<f64> {
        self.samples.iter().map(f).collect()
    }
}

/// Supplier of per-site weather series.
///
/// Implementations are consulted once per site before any computation runs.
pub trait WeatherSource {
    /// Returns the series for `site`.
    ///
    /// # Errors
    ///
    /// Returns a `DataError` if the site has no data or the data is not a
    /// valid fixed-interval series.
    fn fetch(&self, site: &Site) -> std::result::Result<WeatherSeries, DataError>;

    /// Short human-readable name of the source.
    fn source_name(&self) -> &'static str;
}
