//! Turbine and park evaluation over weather series.
//!
//! [`TurbinePipeline`] runs the physical conversion chain for one turbine;
//! [`run_park`] fans it out across a park; [`YieldReport`] and [`ParkReport`]
//! summarise the finished results.

pub mod engine;
pub mod kpi;
pub mod park;
pub mod types;

pub use engine::TurbinePipeline;
pub use kpi::{ParkReport, YieldReport};
pub use park::{ParkRun, Turbine, load_weather, run_park};
pub use types::{PipelineResult, StepRecord};
