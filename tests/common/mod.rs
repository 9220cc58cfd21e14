//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use wind_yield::pipeline::Turbine;
use wind_yield::sites::Site;
use wind_yield::turbine::{TurbineParams, TurbineSpec};
use wind_yield::weather::{SyntheticParams, SyntheticWeather, WeatherSample, WeatherSeries};

/// First timestamp of every fixture series.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Site `id` on the East Frisian coast.
pub fn site(id: usize) -> Site {
    Site {
        id,
        latitude: 53.88 + 0.01 * id as f64,
        longitude: 7.40 + 0.02 * id as f64,
    }
}

/// Default SWT-2.3-93 spec at `site(0)`.
pub fn default_spec() -> TurbineSpec {
    let s = site(0);
    TurbineSpec::new(&TurbineParams::default(), s.latitude, s.longitude).unwrap()
}

/// Hourly series with the given wind speeds at 10 °C, 70 % RH and 1013 hPa.
pub fn series_from_winds(winds: &[f64]) -> WeatherSeries {
    let samples = winds
        .iter()
        .enumerate()
        .map(|(i, &v)| WeatherSample {
            timestamp: start() + TimeDelta::hours(i as i64),
            temperature_c: 10.0,
            relative_humidity: 0.7,
            surface_pressure_hpa: 1013.0,
            wind_speed_ms: v,
        })
        .collect();
    WeatherSeries::new(samples, TimeDelta::hours(1)).unwrap()
}

/// `n` default turbines at consecutive sites.
pub fn default_park(n: usize) -> Vec<Turbine> {
    (0..n)
        .map(|id| {
            let site = site(id);
            let spec =
                TurbineSpec::new(&TurbineParams::default(), site.latitude, site.longitude).unwrap();
            Turbine { site, spec }
        })
        .collect()
}

/// Two days of hourly synthetic weather, seed 42.
pub fn synthetic_source() -> SyntheticWeather {
    SyntheticWeather::new(
        SyntheticParams::default(),
        start(),
        48,
        TimeDelta::hours(1),
        42,
    )
}
