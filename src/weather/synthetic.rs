//! Seeded synthetic weather for presets, demos and tests.

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{WeatherSample, WeatherSeries, WeatherSource};
use crate::error::{DataError, ModelError};
use crate::sites::Site;

/// Seed offset between consecutive site ids.
const SITE_SEED_STRIDE: u64 = 7919;
/// Hour of day (UTC) of the diurnal temperature maximum.
const TEMPERATURE_PEAK_HOUR: f64 = 15.0;
/// Relative humidity drop per degree above the mean temperature.
const HUMIDITY_PER_DEGREE: f64 = 0.02;
const HUMIDITY_NOISE: f64 = 0.02;
const HUMIDITY_MIN: f64 = 0.05;
const HUMIDITY_MAX: f64 = 1.0;
/// Maximum excursion of the pressure walk from its mean (hPa).
const PRESSURE_BAND_HPA: f64 = 30.0;

/// Shape parameters of the generated weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticParams {
    pub temperature_mean_c: f64,
    /// Half the peak-to-trough diurnal swing (°C).
    pub temperature_amplitude_c: f64,
    pub temperature_noise_c: f64,
    pub humidity_mean: f64,
    pub pressure_mean_hpa: f64,
    /// Standard deviation of one pressure random-walk step (hPa).
    pub pressure_step_std_hpa: f64,
    pub wind_mean_ms: f64,
    /// AR(1) persistence of the wind anomaly, `[0, 1)`.
    pub wind_alpha: f64,
    /// Standard deviation of the AR(1) innovation (m/s).
    pub wind_noise_ms: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            temperature_mean_c: 10.0,
            temperature_amplitude_c: 4.0,
            temperature_noise_c: 0.5,
            humidity_mean: 0.75,
            pressure_mean_hpa: 1013.0,
            pressure_step_std_hpa: 0.8,
            wind_mean_ms: 9.0,
            wind_alpha: 0.85,
            wind_noise_ms: 1.2,
        }
    }
}

/// Weather source that generates a reproducible series per site.
///
/// Temperature follows a diurnal sinusoid peaking mid-afternoon, humidity
/// moves against temperature, pressure is a bounded random walk and wind
/// speed is an AR(1) process around its mean:
///
/// ```text
/// w(t) = mean + alpha * (w(t-1) - mean) + epsilon(t)
/// ```
///
/// Each site draws from its own `StdRng`, seeded from the base seed and the
/// site id, so results do not depend on the order sites are fetched in.
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    pub params: SyntheticParams,
    pub start: DateTime<Utc>,
    pub steps: usize,
    pub interval: TimeDelta,
    pub seed: u64,
}

impl SyntheticWeather {
    pub fn new(
        params: SyntheticParams,
        start: DateTime<Utc>,
        steps: usize,
        interval: TimeDelta,
        seed: u64,
    ) -> Self {
        Self {
            params,
            start,
            steps,
            interval,
            seed,
        }
    }

    /// Seed used for `site_id`.
    pub fn site_seed(&self, site_id: usize) -> u64 {
        self.seed
            .wrapping_add(SITE_SEED_STRIDE.wrapping_mul(site_id as u64))
    }

    fn generate(&self, site: &Site) -> Result<Vec<WeatherSample>, ModelError> {
        let p = &self.params;
        let mut rng = StdRng::seed_from_u64(self.site_seed(site.id));
        let mut samples = Vec::with_capacity(self.steps);
        let mut timestamp = self.start;
        let mut wind = p.wind_mean_ms;
        let mut pressure = p.pressure_mean_hpa;

        for step in 0..self.steps {
            if step > 0 {
                timestamp = timestamp.checked_add_signed(self.interval).ok_or_else(|| {
                    ModelError::InvalidSeries {
                        reason: format!("timestamp overflow after {step} steps"),
                    }
                })?;
            }

            let hour = f64::from(timestamp.hour()) + f64::from(timestamp.minute()) / 60.0;
            let phase = 2.0 * std::f64::consts::PI * (hour - TEMPERATURE_PEAK_HOUR) / 24.0;
            let temperature = p.temperature_mean_c
                + p.temperature_amplitude_c * phase.cos()
                + gaussian_noise(&mut rng, p.temperature_noise_c);

            let humidity = (p.humidity_mean
                - HUMIDITY_PER_DEGREE * (temperature - p.temperature_mean_c)
                + gaussian_noise(&mut rng, HUMIDITY_NOISE))
            .clamp(HUMIDITY_MIN, HUMIDITY_MAX);

            pressure = (pressure + gaussian_noise(&mut rng, p.pressure_step_std_hpa)).clamp(
                p.pressure_mean_hpa - PRESSURE_BAND_HPA,
                p.pressure_mean_hpa + PRESSURE_BAND_HPA,
            );

            let epsilon = gaussian_noise(&mut rng, p.wind_noise_ms);
            wind = (p.wind_mean_ms + p.wind_alpha * (wind - p.wind_mean_ms) + epsilon).max(0.0);

            samples.push(WeatherSample {
                timestamp,
                temperature_c: temperature,
                relative_humidity: humidity,
                surface_pressure_hpa: pressure,
                wind_speed_ms: wind,
            });
        }
        Ok(samples)
    }
}

impl WeatherSource for SyntheticWeather {
    fn fetch(&self, site: &Site) -> Result<WeatherSeries, DataError> {
        let samples = self.generate(site)?;
        Ok(WeatherSeries::new(samples, self.interval)?)
    }

    fn source_name(&self) -> &'static str {
        "synthetic"
    }
}

/// Zero-mean Gaussian sample via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn site(id: usize) -> Site {
        Site {
            id,
            latitude: 54.0,
            longitude: 7.0,
        }
    }

    fn source(seed: u64) -> SyntheticWeather {
        SyntheticWeather::new(
            SyntheticParams::default(),
            start(),
            96,
            TimeDelta::hours(1),
            seed,
        )
    }

    #[test]
    fn seed_determinism() {
        let a = source(42).fetch(&site(0)).unwrap();
        let b = source(42).fetch(&site(0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sites_and_seeds_differ() {
        let w = source(42);
        let a = w.fetch(&site(0)).unwrap();
        let b = w.fetch(&site(1)).unwrap();
        assert_ne!(a.wind_speed_ms(), b.wind_speed_ms());

        let c = source(43).fetch(&site(0)).unwrap();
        assert_ne!(a.wind_speed_ms(), c.wind_speed_ms());
    }

    #[test]
    fn fetch_order_does_not_matter() {
        let w = source(7);
        let later = {
            let _ = w.fetch(&site(0)).unwrap();
            w.fetch(&site(3)).unwrap()
        };
        assert_eq!(later, w.fetch(&site(3)).unwrap());
    }

    #[test]
    fn values_stay_in_bounds() {
        let series = source(1).fetch(&site(0)).unwrap();
        let p = SyntheticParams::default();
        for s in series.samples() {
            assert!(s.wind_speed_ms >= 0.0);
            assert!((HUMIDITY_MIN..=HUMIDITY_MAX).contains(&s.relative_humidity));
            assert!((s.surface_pressure_hpa - p.pressure_mean_hpa).abs() <= PRESSURE_BAND_HPA);
        }
    }

    #[test]
    fn timestamps_follow_interval() {
        let series = source(1).fetch(&site(0)).unwrap();
        assert_eq!(series.len(), 96);
        let ts = series.timestamps();
        assert_eq!(ts[0], start());
        assert_eq!(ts[95] - ts[0], TimeDelta::hours(95));
    }

    #[test]
    fn noiseless_weather_is_flat_wind_and_diurnal_temperature() {
        let params = SyntheticParams {
            temperature_noise_c: 0.0,
            pressure_step_std_hpa: 0.0,
            wind_noise_ms: 0.0,
            ..SyntheticParams::default()
        };
        let w = SyntheticWeather::new(params.clone(), start(), 24, TimeDelta::hours(1), 0);
        let series = w.fetch(&site(0)).unwrap();
        assert!(series.wind_speed_ms().iter().all(|&v| v == params.wind_mean_ms));
        assert!(
            series
                .surface_pressure_hpa()
                .iter()
                .all(|&v| v == params.pressure_mean_hpa)
        );

        let temps = series.temperatures_c();
        let peak = temps
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 15);
    }

    #[test]
    fn zero_steps_gives_empty_series() {
        let w = SyntheticWeather::new(
            SyntheticParams::default(),
            start(),
            0,
            TimeDelta::hours(1),
            0,
        );
        assert!(w.fetch(&site(0)).unwrap().is_empty());
    }

    #[test]
    fn gaussian_noise_zero_std() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
    }
}
