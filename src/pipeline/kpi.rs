//! Post-hoc yield indicators from finished pipeline results.

use std::fmt;

use serde::Serialize;

use crate::turbine::TurbineSpec;

use super::types::PipelineResult;

const KWH_PER_MWH: f64 = 1000.0;

/// Aggregate yield of one turbine over its series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldReport {
    pub turbine_id: usize,
    pub rated_power_kw: f64,
    /// Hours covered by the series (`steps * interval`).
    pub hours: f64,
    pub energy_mwh: f64,
    /// Energy produced / (rated power * hours covered).
    pub capacity_factor: f64,
    /// Energy produced / rated power.
    pub full_load_hours: f64,
    pub peak_output_kw: f64,
    pub mean_air_density_kg_m3: f64,
    /// Steps held at exactly rated power.
    pub rated_steps: usize,
    pub below_cut_in_steps: usize,
    pub above_cut_out_steps: usize,
}

impl YieldReport {
    /// Computes the report for `result`, produced by the turbine described by `spec`.
    pub fn from_result(result: &PipelineResult, spec: &TurbineSpec) -> Self {
        let rated = spec.rated_power_kw();
        let hours = result.len() as f64 * result.interval_hours;
        let energy_kwh: f64 = result
            .output_power_kw
            .iter()
            .map(|p| p * result.interval_hours)
            .sum();

        let peak = result
            .output_power_kw
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);
        let mean_density = if result.is_empty() {
            0.0
        } else {
            result.air_density_kg_m3.iter().sum::<f64>() / result.len() as f64
        };

        let capacity_factor = if hours > 0.0 {
            energy_kwh / (rated * hours)
        } else {
            0.0
        };

        Self {
            turbine_id: result.turbine_id,
            rated_power_kw: rated,
            hours,
            energy_mwh: energy_kwh / KWH_PER_MWH,
            capacity_factor,
            full_load_hours: energy_kwh / rated,
            peak_output_kw: peak,
            mean_air_density_kg_m3: mean_density,
            rated_steps: result.output_power_kw.iter().filter(|&&p| p == rated).count(),
            below_cut_in_steps: result
                .wind_speed_ms
                .iter()
                .filter(|&&v| v < spec.cut_in_speed_ms())
                .count(),
            above_cut_out_steps: result
                .wind_speed_ms
                .iter()
                .filter(|&&v| v > spec.cut_out_speed_ms())
                .count(),
        }
    }
}

impl fmt::Display for YieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Turbine {} ---", self.turbine_id)?;
        writeln!(f, "Energy:                {:.3} MWh", self.energy_mwh)?;
        writeln!(f, "Capacity factor:       {:.1}%", self.capacity_factor * 100.0)?;
        writeln!(f, "Full-load hours:       {:.1} h of {:.1} h", self.full_load_hours, self.hours)?;
        writeln!(f, "Peak output:           {:.2} kW", self.peak_output_kw)?;
        writeln!(f, "Mean air density:      {:.4} kg/m3", self.mean_air_density_kg_m3)?;
        write!(
            f,
            "Steps rated/low/high:  {} / {} / {}",
            self.rated_steps, self.below_cut_in_steps, self.above_cut_out_steps
        )
    }
}

/// Park-wide totals over a set of [`YieldReport`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkReport {
    pub turbines: usize,
    pub rated_power_kw: f64,
    pub energy_mwh: f64,
    /// Total energy / total rated energy over each turbine's covered hours.
    pub capacity_factor: f64,
    pub full_load_hours: f64,
}

impl ParkReport {
    pub fn from_reports(reports: &[YieldReport]) -> Self {
        let rated: f64 = reports.iter().map(|r| r.rated_power_kw).sum();
        let energy_mwh: f64 = reports.iter().map(|r| r.energy_mwh).sum();
        let rated_mwh: f64 = reports
            .iter()
            .map(|r| r.rated_power_kw * r.hours / KWH_PER_MWH)
            .sum();

        Self {
            turbines: reports.len(),
            rated_power_kw: rated,
            energy_mwh,
            capacity_factor: if rated_mwh > 0.0 {
                energy_mwh / rated_mwh
            } else {
                0.0
            },
            full_load_hours: if rated > 0.0 {
                energy_mwh * KWH_PER_MWH / rated
            } else {
                0.0
            },
        }
    }
}

impl fmt::Display for ParkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Park Report ---")?;
        writeln!(
            f,
            "Turbines:              {} ({:.1} MW installed)",
            self.turbines,
            self.rated_power_kw / KWH_PER_MWH
        )?;
        writeln!(f, "Energy:                {:.3} MWh", self.energy_mwh)?;
        writeln!(f, "Capacity factor:       {:.1}%", self.capacity_factor * 100.0)?;
        write!(f, "Full-load hours:       {:.1} h", self.full_load_hours)
    }
}
