//! Parallel evaluation of every turbine in a park.

use std::thread;

use tracing::{debug, info};

use crate::error::{DataError, Result, ensure_len};
use crate::physics::VaporPressureModel;
use crate::sites::Site;
use crate::turbine::TurbineSpec;
use crate::weather::{WeatherSeries, WeatherSource};

use super::engine::TurbinePipeline;
use super::kpi::{ParkReport, YieldReport};
use super::types::PipelineResult;

/// A turbine placed at a site.
#[derive(Debug, Clone, PartialEq)]
pub struct Turbine {
    pub site: Site,
    pub spec: TurbineSpec,
}

/// A finished park run with its yield reports, shared read-only by the
/// report printer, the API and the terminal viewer.
#[derive(Debug, Clone)]
pub struct ParkRun {
    pub turbines: Vec<Turbine>,
    /// Results in turbine order, aligned with `turbines`.
    pub results: Vec<PipelineResult>,
    pub reports: Vec<YieldReport>,
    pub park: ParkReport,
}

impl ParkRun {
    /// Computes the yield reports for `results` produced by `turbines`.
    pub fn new(turbines: Vec<Turbine>, results: Vec<PipelineResult>) -> Self {
        let reports: Vec<YieldReport> = turbines
            .iter()
            .zip(&results)
            .map(|(t, r)| YieldReport::from_result(r, &t.spec))
            .collect();
        let park = ParkReport::from_reports(&reports);
        Self {
            turbines,
            results,
            reports,
            park,
        }
    }
}

/// Fetches the weather series of every turbine, in turbine order.
///
/// # Errors
///
/// Returns the first `DataError` raised by `source`.
pub fn load_weather(
    source: &dyn WeatherSource,
    turbines: &[Turbine],
) -> std::result::Result<Vec<WeatherSeries>, DataError> {
    let series = turbines
        .iter()
        .map(|t| source.fetch(&t.site))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    info!(
        source = source.source_name(),
        turbines = turbines.len(),
        "weather loaded"
    );
    Ok(series)
}

/// Runs every turbine against its own weather series.
///
/// One scoped thread per turbine; specs and series are borrowed, never
/// copied. Results come back in turbine order. If any turbine fails, the
/// error of the lowest-index failing turbine is returned and no partial
/// result is produced.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `weather` does not hold one series per turbine,
/// or the first per-turbine error.
pub fn run_park(
    turbines: &[Turbine],
    weather: &[WeatherSeries],
    vapor_model: VaporPressureModel,
) -> Result<Vec<PipelineResult>> {
    ensure_len("turbines/weather", turbines.len(), weather.len())?;

    let outcomes: Vec<Result<PipelineResult>> = thread::scope(|scope| {
        let handles: Vec<_> = turbines
            .iter()
            .zip(weather)
            .map(|(turbine, series)| {
                scope.spawn(move || {
                    TurbinePipeline::new(&turbine.spec)
                        .with_vapor_model(vapor_model)
                        .run(&turbine.site, series)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let results = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
    debug!(turbines = results.len(), "park run finished");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::turbine::TurbineParams;
    use crate::weather::{SyntheticParams, SyntheticWeather};
    use chrono::{TimeDelta, TimeZone, Utc};

    fn turbines(n: usize) -> Vec<Turbine> {
        (0..n)
            .map(|id| {
                let site = Site {
                    id,
                    latitude: 54.0 + id as f64 * 0.01,
                    longitude: 7.0,
                };
                Turbine {
                    spec: TurbineSpec::new(&TurbineParams::default(), site.latitude, site.longitude)
                        .unwrap(),
                    site,
                }
            })
            .collect()
    }

    fn source() -> SyntheticWeather {
        SyntheticWeather::new(
            SyntheticParams::default(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            48,
            TimeDelta::hours(1),
            42,
        )
    }

    #[test]
    fn park_matches_sequential_runs() {
        let park = turbines(4);
        let weather = load_weather(&source(), &park).unwrap();
        let results = run_park(&park, &weather, VaporPressureModel::default()).unwrap();

        assert_eq!(results.len(), 4);
        for (i, (t, w)) in park.iter().zip(&weather).enumerate() {
            assert_eq!(results[i].turbine_id, i);
            let single = TurbinePipeline::new(&t.spec).run(&t.site, w).unwrap();
            assert_eq!(results[i], single);
        }
    }

    #[test]
    fn weather_count_must_match() {
        let park = turbines(2);
        let weather = load_weather(&source(), &park[..1]).unwrap();
        let err = run_park(&park, &weather, VaporPressureModel::default()).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn park_run_reports_every_turbine() {
        let park = turbines(3);
        let weather = load_weather(&source(), &park).unwrap();
        let results = run_park(&park, &weather, VaporPressureModel::default()).unwrap();
        let run = ParkRun::new(park, results);
        assert_eq!(run.reports.len(), 3);
        assert_eq!(run.park.turbines, 3);
        let total: f64 = run.reports.iter().map(|r| r.energy_mwh).sum();
        assert!((run.park.energy_mwh - total).abs() < 1e-9);
    }

    #[test]
    fn empty_park() {
        let results = run_park(&[], &[], VaporPressureModel::default()).unwrap();
        assert!(results.is_empty());
    }
}
