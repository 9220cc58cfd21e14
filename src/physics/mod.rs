//! Physical models of the forecast-to-yield transform.
//!
//! Every function here is pure: inputs are borrowed slices, outputs are new
//! vectors, and no stage writes back into the data it was given.

/// Humid-air density from temperature, humidity and pressure.
pub mod density;
/// Kinetic input power and electrical output power.
pub mod power;
/// Tip-speed ratio helpers.
pub mod tsr;
/// Saturation vapour pressure of water.
pub mod vapor;

pub use density::{humid_air_density, humid_air_density_series, humid_air_density_with};
pub use power::{input_power_kw, output_power_kw};
pub use tsr::{tip_speed_ratio, tip_speed_ratios};
pub use vapor::{VaporPressureModel, saturation_vapor_pressure, saturation_vapor_pressure_hpa};
