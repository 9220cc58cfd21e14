//! Per-turbine result series and their per-timestep view.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sites::Site;

/// Series produced by one turbine over one weather series.
///
/// Every vector is aligned index-for-index with `timestamps`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub turbine_id: usize,
    pub site: Site,
    pub timestamps: Vec<DateTime<Utc>>,
    pub wind_speed_ms: Vec<f64>,
    pub air_density_kg_m3: Vec<f64>,
    pub input_power_kw: Vec<f64>,
    pub output_power_kw: Vec<f64>,
    /// Tip-speed ratio at maximum rotor speed; `None` in calm steps.
    pub tip_speed_ratio: Vec<Option<f64>>,
    /// Step length in hours.
    pub interval_hours: f64,
}

impl PipelineResult {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Row `index`, or `None` past the end.
    pub fn record(&self, index: usize) -> Option<StepRecord> {
        Some(StepRecord {
            index,
            timestamp: *self.timestamps.get(index)?,
            wind_speed_ms: self.wind_speed_ms[index],
            air_density_kg_m3: self.air_density_kg_m3[index],
            input_power_kw: self.input_power_kw[index],
            output_power_kw: self.output_power_kw[index],
            tip_speed_ratio: self.tip_speed_ratio[index],
        })
    }

    /// All rows in time order.
    pub fn records(&self) -> Vec<StepRecord> {
        (0..self.len()).filter_map(|i| self.record(i)).collect()
    }
}

/// One timestep of a [`PipelineResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub wind_speed_ms: f64,
    pub air_density_kg_m3: f64,
    pub input_power_kw: f64,
    pub output_power_kw: f64,
    pub tip_speed_ratio: Option<f64>,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} {} | wind={:>5.2} m/s  rho={:.4} kg/m3 | in={:>9.2} kW  out={:>8.2} kW",
            self.index,
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.wind_speed_ms,
            self.air_density_kg_m3,
            self.input_power_kw,
            self.output_power_kw,
        )?;
        match self.tip_speed_ratio {
            Some(tsr) => write!(f, "  tsr={tsr:.2}"),
            None => write!(f, "  tsr=-"),
        }
    }
}
