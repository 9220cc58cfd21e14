//! TOML-based park configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::DataError;
use crate::physics::VaporPressureModel;
use crate::pipeline::Turbine;
use crate::sites::{Site, load_sites_csv};
use crate::turbine::{TurbineParams, TurbineSpec};
use crate::weather::{CsvWeather, SyntheticParams, SyntheticWeather, WeatherSource};

/// Top-level park configuration parsed from TOML.
///
/// All fields have defaults matching the baseline preset. Load from TOML
/// with [`ParkConfig::from_toml_file`] or use [`ParkConfig::baseline`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParkConfig {
    /// Forecast window, seed and physical model options.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Turbine model installed at every site.
    #[serde(default)]
    pub turbine: TurbineParams,
    /// Where weather comes from.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Turbine locations.
    #[serde(default)]
    pub sites: SitesConfig,
}

/// Forecast window and model options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// First timestamp, RFC 3339 string (e.g. `"2024-03-01T00:00:00Z"`).
    pub start: DateTime<Utc>,
    /// Number of synthetic timesteps (must be > 0 for synthetic weather).
    pub steps: usize,
    /// Timestep length in minutes (must be > 0).
    pub interval_minutes: i64,
    /// Master random seed for synthetic weather.
    pub seed: u64,
    /// Height the wind-speed column refers to (m).
    pub reference_height_m: f64,
    /// Saturation vapour pressure formula: `"wobus"`, `"wobus-alternating"`
    /// or `"tetens"`.
    pub vapor_model: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
                .single()
                .unwrap_or(DateTime::UNIX_EPOCH),
            steps: 72,
            interval_minutes: 60,
            seed: 42,
            reference_height_m: 120.0,
            vapor_model: "wobus".to_string(),
        }
    }
}

/// Weather source selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// `"synthetic"` or `"csv"`.
    pub source: String,
    /// Long-format weather CSV, required when `source = "csv"`.
    pub path: Option<PathBuf>,
    /// Humidity column is in percent rather than a fraction.
    pub humidity_in_percent: bool,
    /// Generator parameters for `source = "synthetic"`.
    pub synthetic: SyntheticParams,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            path: None,
            humidity_in_percent: true,
            synthetic: SyntheticParams::default(),
        }
    }
}

/// Turbine locations, inline or from a CSV file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitesConfig {
    /// Two-column latitude/longitude CSV; replaces `coordinates` when set.
    pub path: Option<PathBuf>,
    /// Whether the CSV file starts with a header row.
    pub has_header: bool,
    /// Inline `[latitude, longitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            path: None,
            has_header: true,
            coordinates: vec![[53.88, 7.40], [53.89, 7.42], [53.90, 7.44]],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"forecast.steps"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Everything needed to run a park, resolved from a [`ParkConfig`].
pub struct ParkSetup {
    pub turbines: Vec<Turbine>,
    pub weather: Box<dyn WeatherSource>,
    pub vapor_model: VaporPressureModel,
}

impl ParkConfig {
    /// Returns the baseline preset: three SWT-2.3-93 turbines, three days of
    /// hourly synthetic North Sea coast weather.
    pub fn baseline() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            turbine: TurbineParams::default(),
            weather: WeatherConfig::default(),
            sites: SitesConfig::default(),
        }
    }

    /// Returns the offshore preset: five turbines, steadier and stronger
    /// wind, damp air with a small diurnal swing.
    pub fn offshore() -> Self {
        Self {
            forecast: ForecastConfig {
                steps: 168,
                ..ForecastConfig::default()
            },
            turbine: TurbineParams::default(),
            weather: WeatherConfig {
                synthetic: SyntheticParams {
                    temperature_mean_c: 8.0,
                    temperature_amplitude_c: 1.5,
                    humidity_mean: 0.85,
                    wind_mean_ms: 11.0,
                    wind_alpha: 0.92,
                    wind_noise_ms: 1.0,
                    ..SyntheticParams::default()
                },
                ..WeatherConfig::default()
            },
            sites: SitesConfig {
                coordinates: vec![
                    [54.01, 6.58],
                    [54.02, 6.60],
                    [54.03, 6.62],
                    [54.04, 6.64],
                    [54.05, 6.66],
                ],
                ..SitesConfig::default()
            },
        }
    }

    /// Returns the storm preset: low pressure and gusty wind around the
    /// cut-out speed, at 15-minute resolution.
    pub fn storm() -> Self {
        Self {
            forecast: ForecastConfig {
                steps: 96,
                interval_minutes: 15,
                ..ForecastConfig::default()
            },
            turbine: TurbineParams::default(),
            weather: WeatherConfig {
                synthetic: SyntheticParams {
                    temperature_mean_c: 6.0,
                    temperature_amplitude_c: 1.0,
                    humidity_mean: 0.9,
                    pressure_mean_hpa: 975.0,
                    pressure_step_std_hpa: 1.5,
                    wind_mean_ms: 21.0,
                    wind_alpha: 0.8,
                    wind_noise_ms: 3.0,
                    ..SyntheticParams::default()
                },
                ..WeatherConfig::default()
            },
            sites: SitesConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "offshore", "storm"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "offshore" => Ok(Self::offshore()),
            "storm" => Ok(Self::storm()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Timestep length.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on `forecast.interval_minutes` if it is not
    /// positive or too large to represent as a duration.
    pub fn interval(&self) -> Result<TimeDelta, ConfigError> {
        let minutes = self.forecast.interval_minutes;
        if minutes <= 0 {
            return Err(ConfigError::new("forecast.interval_minutes", "must be > 0"));
        }
        TimeDelta::try_minutes(minutes).ok_or_else(|| {
            ConfigError::new(
                "forecast.interval_minutes",
                format!("{minutes} is out of range"),
            )
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Turbine
    /// invariants are checked by building a [`TurbineSpec`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let fc = &self.forecast;

        if let Err(e) = self.interval() {
            errors.push(e);
        }
        if !fc.reference_height_m.is_finite() || fc.reference_height_m <= 0.0 {
            errors.push(ConfigError::new("forecast.reference_height_m", "must be > 0"));
        }
        if let Err(e) = fc.vapor_model.parse::<VaporPressureModel>() {
            errors.push(ConfigError::new("forecast.vapor_model", e.to_string()));
        }

        if let Err(e) = TurbineSpec::new(&self.turbine, 0.0, 0.0) {
            errors.push(ConfigError::new("turbine", e.to_string()));
        }

        let w = &self.weather;
        match w.source.as_str() {
            "synthetic" => {
                if fc.steps == 0 {
                    errors.push(ConfigError::new(
                        "forecast.steps",
                        "must be > 0 for synthetic weather",
                    ));
                }
                let s = &w.synthetic;
                if !(0.0..=1.0).contains(&s.humidity_mean) {
                    errors.push(ConfigError::new(
                        "weather.synthetic.humidity_mean",
                        "must be in [0.0, 1.0]",
                    ));
                }
                if !(0.0..1.0).contains(&s.wind_alpha) {
                    errors.push(ConfigError::new(
                        "weather.synthetic.wind_alpha",
                        "must be in [0.0, 1.0)",
                    ));
                }
                if s.wind_mean_ms < 0.0 {
                    errors.push(ConfigError::new("weather.synthetic.wind_mean_ms", "must be >= 0"));
                }
                if !s.pressure_mean_hpa.is_finite() || s.pressure_mean_hpa <= 0.0 {
                    errors.push(ConfigError::new(
                        "weather.synthetic.pressure_mean_hpa",
                        "must be > 0",
                    ));
                }
            }
            "csv" => {
                if w.path.is_none() {
                    errors.push(ConfigError::new(
                        "weather.path",
                        "required when weather.source = \"csv\"",
                    ));
                }
            }
            other => errors.push(ConfigError::new(
                "weather.source",
                format!("must be \"synthetic\" or \"csv\", got \"{other}\""),
            )),
        }

        let sites = &self.sites;
        if sites.path.is_none() {
            if sites.coordinates.is_empty() {
                errors.push(ConfigError::new(
                    "sites.coordinates",
                    "at least one site is required when sites.path is not set",
                ));
            }
            for (i, &[latitude, longitude]) in sites.coordinates.iter().enumerate() {
                let site = Site {
                    id: i,
                    latitude,
                    longitude,
                };
                if let Some(reason) = site.check() {
                    errors.push(ConfigError::new(format!("sites.coordinates[{i}]"), reason));
                }
            }
        }

        errors
    }

    /// Resolves sites, turbine specs and the weather source.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure as [`DataError::Config`], or a
    /// `DataError` from loading the sites file.
    pub fn build(&self) -> Result<ParkSetup, DataError> {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(first.into());
        }
        let vapor_model = self
            .forecast
            .vapor_model
            .parse::<VaporPressureModel>()
            .map_err(|e| ConfigError::new("forecast.vapor_model", e.to_string()))?;
        let interval = self.interval()?;

        let sites = match &self.sites.path {
            Some(path) => load_sites_csv(path, self.sites.has_header)?,
            None => self
                .sites
                .coordinates
                .iter()
                .enumerate()
                .map(|(id, &[latitude, longitude])| Site {
                    id,
                    latitude,
                    longitude,
                })
                .collect(),
        };

        let turbines = sites
            .into_iter()
            .map(|site| -> Result<Turbine, DataError> {
                let spec = TurbineSpec::new(&self.turbine, site.latitude, site.longitude)?;
                Ok(Turbine { site, spec })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.turbine.hub_height_m != self.forecast.reference_height_m {
            warn!(
                hub_height_m = self.turbine.hub_height_m,
                reference_height_m = self.forecast.reference_height_m,
                "wind speed reference height differs from hub height; no correction applied"
            );
        }

        let weather: Box<dyn WeatherSource> = match (self.weather.source.as_str(), &self.weather.path) {
            ("csv", Some(path)) => Box::new(CsvWeather::from_path(
                path,
                interval,
                self.weather.humidity_in_percent,
            )?),
            _ => Box::new(SyntheticWeather::new(
                self.weather.synthetic.clone(),
                self.forecast.start,
                self.forecast.steps,
                interval,
                self.forecast.seed,
            )),
        };

        info!(
            turbines = turbines.len(),
            weather = weather.source_name(),
            %vapor_model,
            "park configured"
        );

        Ok(ParkSetup {
            turbines,
            weather,
            vapor_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ParkConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let e = ParkConfig::from_preset("nonexistent").unwrap_err();
        assert_eq!(e.field, "preset");
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ParkConfig::PRESETS {
            let cfg = ParkConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn storm_is_windier_than_baseline() {
        let base = ParkConfig::baseline();
        let storm = ParkConfig::storm();
        assert!(storm.weather.synthetic.wind_mean_ms > base.weather.synthetic.wind_mean_ms);
        assert!(storm.interval().unwrap() < base.interval().unwrap());
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[forecast]
start = "2024-06-01T00:00:00Z"
steps = 48
interval_minutes = 30
seed = 7
reference_height_m = 100.0
vapor_model = "tetens"

[turbine]
manufacturer = "Vestas"
model = "V90-2.0"
rated_power_kw = 2000.0
rotor_diameter_m = 90.0
hub_height_m = 105.0
cut_in_speed_ms = 3.5
cut_out_speed_ms = 25.0

[weather]
source = "synthetic"

[weather.synthetic]
wind_mean_ms = 7.5

[sites]
coordinates = [[55.0, 8.0], [55.1, 8.1]]
"#;
        let cfg = ParkConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.forecast.steps), Some(48));
        assert_eq!(cfg.as_ref().map(|c| c.interval().ok()), Some(Some(TimeDelta::minutes(30))));
        assert_eq!(cfg.as_ref().map(|c| &*c.turbine.model), Some("V90-2.0"));
        // unspecified turbine fields keep defaults
        assert_eq!(cfg.as_ref().map(|c| c.turbine.power_coefficient), Some(0.4));
        assert_eq!(cfg.as_ref().map(|c| c.sites.coordinates.len()), Some(2));
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[forecast]
steps = 24
bogus_field = true
"#;
        assert!(ParkConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ParkConfig::from_toml_str("[forecast]\nseed = 99\n").unwrap();
        assert_eq!(cfg.forecast.seed, 99);
        assert_eq!(cfg.forecast.steps, 72);
        assert_eq!(cfg.turbine.rated_power_kw, 2300.0);
        assert_eq!(cfg.sites.coordinates.len(), 3);
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = ParkConfig::baseline();
        cfg.forecast.interval_minutes = 0;
        cfg.forecast.vapor_model = "magnus".to_string();
        cfg.weather.synthetic.wind_alpha = 1.0;
        cfg.sites.coordinates.push([91.0, 0.0]);
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"forecast.interval_minutes".to_string()));
        assert!(fields.contains(&"forecast.vapor_model".to_string()));
        assert!(fields.contains(&"weather.synthetic.wind_alpha".to_string()));
        assert!(fields.contains(&"sites.coordinates[3]".to_string()));
    }

    #[test]
    fn oversized_interval_is_reported_not_panicking() {
        let cfg =
            ParkConfig::from_toml_str("[forecast]\ninterval_minutes = 9223372036854775807\n")
                .unwrap();
        let errors = cfg.validate();
        assert!(
            errors.iter().any(|e| e.field == "forecast.interval_minutes"),
            "expected interval error: {errors:?}"
        );

        let err = cfg.build().err().unwrap();
        assert!(matches!(err, DataError::Config(ref e) if e.field == "forecast.interval_minutes"));
    }

    #[test]
    fn interval_accepts_sub_hourly_steps() {
        let mut cfg = ParkConfig::baseline();
        cfg.forecast.interval_minutes = 15;
        assert_eq!(cfg.interval(), Ok(TimeDelta::minutes(15)));
        cfg.forecast.interval_minutes = -5;
        assert!(cfg.interval().is_err());
    }

    #[test]
    fn alternating_wobus_is_selectable() {
        let mut cfg = ParkConfig::baseline();
        cfg.forecast.vapor_model = "wobus-alternating".to_string();
        assert!(cfg.validate().is_empty());
        let setup = cfg.build().unwrap();
        assert_eq!(setup.vapor_model, VaporPressureModel::WobusAlternating);
    }

    #[test]
    fn validation_catches_bad_turbine() {
        let mut cfg = ParkConfig::baseline();
        cfg.turbine.cut_out_speed_ms = 3.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "turbine"));
    }

    #[test]
    fn validation_requires_csv_path() {
        let mut cfg = ParkConfig::baseline();
        cfg.weather.source = "csv".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "weather.path"));

        cfg.weather.source = "api".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "weather.source"));
    }

    #[test]
    fn build_baseline() {
        let setup = ParkConfig::baseline().build().unwrap();
        assert_eq!(setup.turbines.len(), 3);
        assert_eq!(setup.turbines[2].site.id, 2);
        assert_eq!(setup.turbines[1].spec.latitude(), 53.89);
        assert_eq!(setup.weather.source_name(), "synthetic");
        assert_eq!(setup.vapor_model, VaporPressureModel::HermanWobus);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut cfg = ParkConfig::baseline();
        cfg.sites.coordinates.clear();
        let err = cfg.build().err().unwrap();
        assert!(matches!(err, DataError::Config(ref e) if e.field == "sites.coordinates"));
    }

    #[test]
    fn build_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let sites = dir.path().join("sites.csv");
        let weather = dir.path().join("weather.csv");
        std::fs::write(&sites, "latitude,longitude\n53.88,7.40\n").unwrap();
        std::fs::write(
            &weather,
            "site_id,timestamp,temperature,relative_humidity,surface_pressure,wind_speed\n\
             0,2024-03-01T00:00:00Z,10.0,70.0,1013.0,12.0\n",
        )
        .unwrap();

        let mut cfg = ParkConfig::baseline();
        cfg.sites.path = Some(sites);
        cfg.weather.source = "csv".to_string();
        cfg.weather.path = Some(weather);

        let setup = cfg.build().unwrap();
        assert_eq!(setup.turbines.len(), 1);
        assert_eq!(setup.weather.source_name(), "csv");
        let series = setup.weather.fetch(&setup.turbines[0].site).unwrap();
        assert!((series.relative_humidity()[0] - 0.7).abs() < 1e-12);
    }
}
