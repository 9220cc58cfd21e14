//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::pipeline::{ParkReport, YieldReport};
use crate::sites::Site;
use crate::turbine::TurbineSpec;

/// Park overview: every turbine with its yield, plus park totals.
#[derive(Debug, Serialize)]
pub struct ParkResponse {
    pub park: ParkReport,
    pub turbines: Vec<TurbineEntry>,
}

/// One turbine of the park.
#[derive(Debug, Serialize)]
pub struct TurbineEntry {
    pub id: usize,
    pub site: Site,
    pub spec: TurbineSpec,
    pub report: YieldReport,
}

/// Inclusive step-index range for `/turbines/{id}/output`.
#[derive(Debug, Deserialize)]
pub struct OutputQuery {
    /// First step index (default 0).
    pub from: Option<usize>,
    /// Last step index (default: last step).
    pub to: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
