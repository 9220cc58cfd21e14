//! Weather read from a long-format CSV file.
//!
//! Expected header:
//! `site_id,timestamp,temperature,relative_humidity,surface_pressure,wind_speed`
//! with RFC 3339 timestamps, one row per site and timestamp.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{WeatherSample, WeatherSeries, WeatherSource};
use crate::error::DataError;
use crate::sites::Site;

#[derive(Debug, Deserialize)]
struct WeatherRow {
    site_id: usize,
    timestamp: DateTime<Utc>,
    temperature: f64,
    relative_humidity: f64,
    surface_pressure: f64,
    wind_speed: f64,
}

/// Weather source backed by a CSV file loaded fully into memory.
#[derive(Debug, Clone)]
pub struct CsvWeather {
    by_site: BTreeMap<usize, Vec<WeatherSample>>,
    interval: TimeDelta,
}

impl CsvWeather {
    /// Loads `path`.
    ///
    /// With `humidity_in_percent` the humidity column is divided by 100, as
    /// forecast providers usually report percent.
    ///
    /// # Errors
    ///
    /// Returns a `DataError` if the file cannot be read or a row does not parse.
    pub fn from_path(
        path: &Path,
        interval: TimeDelta,
        humidity_in_percent: bool,
    ) -> Result<Self, DataError> {
        let file = File::open(path)?;
        let weather = Self::from_reader(file, interval, humidity_in_percent)?;
        debug!(
            path = %path.display(),
            sites = weather.by_site.len(),
            "loaded weather file"
        );
        Ok(weather)
    }

    /// Loads weather rows from any reader; see [`CsvWeather::from_path`].
    ///
    /// # Errors
    ///
    /// Returns a `DataError` if a row does not parse.
    pub fn from_reader(
        reader: impl Read,
        interval: TimeDelta,
        humidity_in_percent: bool,
    ) -> Result<Self, DataError> {
        let humidity_scale = if humidity_in_percent { 0.01 } else { 1.0 };
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut by_site: BTreeMap<usize, Vec<WeatherSample>> = BTreeMap::new();
        for row in rdr.deserialize() {
            let row: WeatherRow = row?;
            by_site.entry(row.site_id).or_default().push(WeatherSample {
                timestamp: row.timestamp,
                temperature_c: row.temperature,
                relative_humidity: row.relative_humidity * humidity_scale,
                surface_pressure_hpa: row.surface_pressure,
                wind_speed_ms: row.wind_speed,
            });
        }

        Ok(Self { by_site, interval })
    }

    /// Site ids present in the file, ascending.
    pub fn site_ids(&self) -> Vec<usize> {
        self.by_site.keys().copied().collect()
    }
}

impl WeatherSource for CsvWeather {
    fn fetch(&self, site: &Site) -> Result<WeatherSeries, DataError> {
        let samples = self
            .by_site
            .get(&site.id)
            .filter(|s| !s.is_empty())
            .ok_or(DataError::NoWeatherForSite(site.id))?;
        Ok(WeatherSeries::new(samples.clone(), self.interval)?)
    }

    fn source_name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    const DATA: &str = "\
site_id,timestamp,temperature,relative_humidity,surface_pressure,wind_speed
0,2024-03-01T00:00:00Z,10.0,70.0,1013.0,12.0
1,2024-03-01T00:00:00Z,9.0,80.0,1012.0,6.5
0,2024-03-01T01:00:00Z,9.5,72.0,1012.5,11.0
1,2024-03-01T01:00:00Z,8.5,82.0,1011.0,7.0
";

    fn site(id: usize) -> Site {
        Site {
            id,
            latitude: 53.88,
            longitude: 7.40,
        }
    }

    #[test]
    fn groups_rows_by_site() {
        let w = CsvWeather::from_reader(DATA.as_bytes(), TimeDelta::hours(1), true).unwrap();
        assert_eq!(w.site_ids(), vec![0, 1]);
        let s1 = w.fetch(&site(1)).unwrap();
        assert_eq!(s1.len(), 2);
        assert_eq!(s1.wind_speed_ms(), vec![6.5, 7.0]);
    }

    #[test]
    fn scales_percent_humidity() {
        let w = CsvWeather::from_reader(DATA.as_bytes(), TimeDelta::hours(1), true).unwrap();
        let s0 = w.fetch(&site(0)).unwrap();
        assert!((s0.relative_humidity()[0] - 0.70).abs() < 1e-12);
    }

    #[test]
    fn missing_site_is_reported() {
        let w = CsvWeather::from_reader(DATA.as_bytes(), TimeDelta::hours(1), true).unwrap();
        let err = w.fetch(&site(7)).unwrap_err();
        assert!(matches!(err, DataError::NoWeatherForSite(7)));
    }

    #[test]
    fn wrong_interval_is_invalid_series() {
        let w = CsvWeather::from_reader(DATA.as_bytes(), TimeDelta::minutes(30), true).unwrap();
        let err = w.fetch(&site(0)).unwrap_err();
        assert!(matches!(
            err,
            DataError::Model(ModelError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let bad = "site_id,timestamp,temperature,relative_humidity,surface_pressure,wind_speed\n\
                   0,yesterday,10.0,0.7,1013.0,12.0\n";
        let err = CsvWeather::from_reader(bad.as_bytes(), TimeDelta::hours(1), false).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
