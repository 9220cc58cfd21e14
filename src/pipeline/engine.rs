//! Single-turbine pipeline: weather in, power series out.

use tracing::debug;

use crate::error::Result;
use crate::physics::{
    VaporPressureModel, humid_air_density_series, input_power_kw, output_power_kw,
    tip_speed_ratios,
};
use crate::sites::Site;
use crate::turbine::TurbineSpec;
use crate::weather::WeatherSeries;

use super::types::PipelineResult;

/// Runs the physical conversion chain for one turbine.
///
/// Stages, each returning a fresh series aligned with the weather:
/// air density, kinetic input power, gated and clipped output power, and
/// the tip-speed ratio at maximum rotor speed.
#[derive(Debug, Clone, Copy)]
pub struct TurbinePipeline<'a> {
    spec: &'a TurbineSpec,
    vapor_model: VaporPressureModel,
}

impl<'a> TurbinePipeline<'a> {
    pub fn new(spec: &'a TurbineSpec) -> Self {
        Self {
            spec,
            vapor_model: VaporPressureModel::default(),
        }
    }

    /// Replaces the saturation vapour pressure formula.
    pub fn with_vapor_model(mut self, vapor_model: VaporPressureModel) -> Self {
        self.vapor_model = vapor_model;
        self
    }

    pub fn spec(&self) -> &TurbineSpec {
        self.spec
    }

    /// Computes the full result for the turbine at `site`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any stage receives misaligned series. With a
    /// validated [`WeatherSeries`] this does not happen in practice.
    pub fn run(&self, site: &Site, weather: &WeatherSeries) -> Result<PipelineResult> {
        let spec = self.spec;
        let wind = weather.wind_speed_ms();

        let density = humid_air_density_series(
            self.vapor_model,
            &weather.temperatures_c(),
            &weather.relative_humidity(),
            &weather.surface_pressure_hpa(),
        )?;
        let input = input_power_kw(spec.area_m2(), &density, &wind)?;
        let output = output_power_kw(
            spec.rated_power_kw(),
            &input,
            spec.power_coefficient(),
            spec.power_curve(),
            spec.cut_in_speed_ms(),
            spec.cut_out_speed_ms(),
            &wind,
        )?;
        let tsr = tip_speed_ratios(spec.max_tip_speed_ms(), &wind);

        debug!(
            turbine = site.id,
            steps = weather.len(),
            vapor_model = %self.vapor_model,
            "turbine pipeline finished"
        );

        Ok(PipelineResult {
            turbine_id: site.id,
            site: *site,
            timestamps: weather.timestamps(),
            wind_speed_ms: wind,
            air_density_kg_m3: density,
            input_power_kw: input,
            output_power_kw: output,
            tip_speed_ratio: tsr,
            interval_hours: weather.interval_hours(),
        })
    }
}
