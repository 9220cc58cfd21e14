//! Wind turbine energy yield estimation from weather forecasts.
//!
//! Forecast weather per turbine site flows through humid-air density, the
//! cubic wind-power law and the turbine's cut-in/cut-out and rating limits
//! to an electrical output series. [`pipeline::run_park`] evaluates a whole
//! park in parallel.

pub mod config;
pub mod error;
pub mod io;
/// Physical models: vapour pressure, air density, tip-speed ratio, power.
pub mod physics;
/// Turbine evaluation, park fan-out and yield reports.
pub mod pipeline;
pub mod sites;
pub mod turbine;
pub mod weather;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
