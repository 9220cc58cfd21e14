//! Immutable physical descriptor of a wind turbine.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One point of a normalised power curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurvePoint {
    /// Hub-height wind speed (m/s).
    pub wind_speed_ms: f64,
    /// Output as a fraction of rated power, in `[0, 1]`.
    pub fraction: f64,
}

/// Manufacturer power curve: wind speed to normalised output fraction.
///
/// Points are kept sorted by strictly increasing wind speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerCurve {
    points: Vec<CurvePoint>,
}

impl PowerCurve {
    /// Validates and wraps a list of curve points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` if the list is empty, a wind speed is negative or
    /// not strictly increasing, or a fraction lies outside `[0, 1]`.
    pub fn new(points: Vec<CurvePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(invalid("power_curve", "must contain at least one point"));
        }
        for (i, p) in points.iter().enumerate() {
            if !p.wind_speed_ms.is_finite() || p.wind_speed_ms < 0.0 {
                return Err(invalid(
                    "power_curve",
                    format!("point {i}: wind speed must be finite and >= 0"),
                ));
            }
            if !(0.0..=1.0).contains(&p.fraction) {
                return Err(invalid(
                    "power_curve",
                    format!("point {i}: fraction must be in [0, 1]"),
                ));
            }
        }
        if points
            .windows(2)
            .any(|w| w[1].wind_speed_ms <= w[0].wind_speed_ms)
        {
            return Err(invalid(
                "power_curve",
                "wind speeds must be strictly increasing",
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }
}

/// Static turbine parameters as read from configuration.
///
/// Plain data with no invariants; turn it into a [`TurbineSpec`] with
/// [`TurbineSpec::new`]. Defaults describe a Siemens SWT-2.3-93.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TurbineParams {
    pub manufacturer: String,
    pub model: String,
    /// Nameplate rating (kW).
    pub rated_power_kw: f64,
    /// Wind speed at which rated power is reached, at standard density (m/s).
    pub rated_wind_speed_ms: f64,
    /// Hub height above ground (m).
    pub hub_height_m: f64,
    /// Power coefficient Cp in `[0, 1]`.
    pub power_coefficient: f64,
    /// Rotor diameter (m).
    pub rotor_diameter_m: f64,
    /// Cut-in wind speed (m/s).
    pub cut_in_speed_ms: f64,
    /// Cut-out wind speed (m/s).
    pub cut_out_speed_ms: f64,
    /// Minimum rotor speed during power production (RPM).
    pub min_speed_rpm: f64,
    /// Nominal maximum rotor speed (RPM).
    pub max_speed_rpm: f64,
    /// Optional normalised power curve.
    pub power_curve: Option<Vec<CurvePoint>>,
}

impl Default for TurbineParams {
    fn default() -> Self {
        Self {
            manufacturer: "Siemens".to_string(),
            model: "SWT-2.3-93".to_string(),
            rated_power_kw: 2300.0,
            rated_wind_speed_ms: 13.0,
            hub_height_m: 133.0,
            power_coefficient: 0.4,
            rotor_diameter_m: 93.0,
            cut_in_speed_ms: 4.0,
            cut_out_speed_ms: 25.0,
            min_speed_rpm: 6.0,
            max_speed_rpm: 16.0,
            power_curve: None,
        }
    }
}

/// Validated, immutable turbine descriptor.
///
/// Swept area and tip speeds are derived on demand and never stored. Once
/// built, a spec is shared read-only by every pipeline run; results live in
/// [`PipelineResult`](crate::pipeline::PipelineResult), not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurbineSpec {
    manufacturer: String,
    model: String,
    latitude: f64,
    longitude: f64,
    rated_power_kw: f64,
    rated_wind_speed_ms: f64,
    hub_height_m: f64,
    power_coefficient: f64,
    rotor_diameter_m: f64,
    cut_in_speed_ms: f64,
    cut_out_speed_ms: f64,
    min_speed_rpm: f64,
    max_speed_rpm: f64,
    power_curve: Option<PowerCurve>,
}

impl TurbineSpec {
    /// Builds a spec for a turbine placed at `latitude`/`longitude`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidSpec`] naming the first violated field:
    /// non-finite values, `rotor_diameter <= 0`, `rated_power <= 0`, Cp outside
    /// `[0, 1]`, `cut_in < 0`, `cut_out <= cut_in`, negative or inverted rotor
    /// speed limits, or an invalid power curve.
    pub fn new(params: &TurbineParams, latitude: f64, longitude: f64) -> Result<Self> {
        let finite = [
            ("latitude", latitude),
            ("longitude", longitude),
            ("rated_power", params.rated_power_kw),
            ("rated_wind_speed", params.rated_wind_speed_ms),
            ("hub_height", params.hub_height_m),
            ("power_coefficient", params.power_coefficient),
            ("rotor_diameter", params.rotor_diameter_m),
            ("cut_in_speed", params.cut_in_speed_ms),
            ("cut_out_speed", params.cut_out_speed_ms),
            ("min_speed", params.min_speed_rpm),
            ("max_speed", params.max_speed_rpm),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }

        if params.rotor_diameter_m <= 0.0 {
            return Err(invalid("rotor_diameter", "must be > 0"));
        }
        if params.rated_power_kw <= 0.0 {
            return Err(invalid("rated_power", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&params.power_coefficient) {
            return Err(invalid("power_coefficient", "must be in [0, 1]"));
        }
        if params.cut_in_speed_ms < 0.0 {
            return Err(invalid("cut_in_speed", "must be >= 0"));
        }
        if params.cut_out_speed_ms <= params.cut_in_speed_ms {
            return Err(invalid("cut_out_speed", "must be > cut_in_speed"));
        }
        if params.min_speed_rpm < 0.0 {
            return Err(invalid("min_speed", "must be >= 0"));
        }
        if params.max_speed_rpm < params.min_speed_rpm {
            return Err(invalid("max_speed", "must be >= min_speed"));
        }

        let power_curve = params
            .power_curve
            .as_ref()
            .map(|pts| PowerCurve::new(pts.clone()))
            .transpose()?;

        Ok(Self {
            manufacturer: params.manufacturer.clone(),
            model: params.model.clone(),
            latitude,
            longitude,
            rated_power_kw: params.rated_power_kw,
            rated_wind_speed_ms: params.rated_wind_speed_ms,
            hub_height_m: params.hub_height_m,
            power_coefficient: params.power_coefficient,
            rotor_diameter_m: params.rotor_diameter_m,
            cut_in_speed_ms: params.cut_in_speed_ms,
            cut_out_speed_ms: params.cut_out_speed_ms,
            min_speed_rpm: params.min_speed_rpm,
            max_speed_rpm: params.max_speed_rpm,
            power_curve,
        })
    }

    /// Rotor-swept area, `π (d/2)²` (m²).
    pub fn area_m2(&self) -> f64 {
        PI * (self.rotor_diameter_m / 2.0).powi(2)
    }

    /// Linear blade-tip speed (m/s) at `rpm`.
    pub fn tip_speed_ms(&self, rpm: f64) -> f64 {
        2.0 * PI * (rpm / 60.0) * (self.rotor_diameter_m / 2.0)
    }

    /// Tip speed at the minimum production rotor speed (m/s).
    pub fn min_tip_speed_ms(&self) -> f64 {
        self.tip_speed_ms(self.min_speed_rpm)
    }

    /// Tip speed at the nominal maximum rotor speed (m/s).
    pub fn max_tip_speed_ms(&self) -> f64 {
        self.tip_speed_ms(self.max_speed_rpm)
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn rated_power_kw(&self) -> f64 {
        self.rated_power_kw
    }

    pub fn rated_wind_speed_ms(&self) -> f64 {
        self.rated_wind_speed_ms
    }

    pub fn hub_height_m(&self) -> f64 {
        self.hub_height_m
    }

    pub fn power_coefficient(&self) -> f64 {
        self.power_coefficient
    }

    pub fn rotor_diameter_m(&self) -> f64 {
        self.rotor_diameter_m
    }

    pub fn cut_in_speed_ms(&self) -> f64 {
        self.cut_in_speed_ms
    }

    pub fn cut_out_speed_ms(&self) -> f64 {
        self.cut_out_speed_ms
    }

    pub fn min_speed_rpm(&self) -> f64 {
        self.min_speed_rpm
    }

    pub fn max_speed_rpm(&self) -> f64 {
        self.max_speed_rpm
    }

    pub fn power_curve(&self) -> Option<&PowerCurve> {
        self.power_curve.as_ref()
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ModelError {
    ModelError::InvalidSpec {
        field,
        reason: reason.into(),
    }
}
