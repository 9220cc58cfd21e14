//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, OutputQuery, ParkResponse, TurbineEntry};
use crate::pipeline::StepRecord;

/// `GET /park` → 200 + `ParkResponse` JSON
pub async fn get_park(State(state): State<Arc<AppState>>) -> Json<ParkResponse> {
    let turbines = state
        .turbines
        .iter()
        .zip(&state.reports)
        .map(|(t, report)| TurbineEntry {
            id: t.site.id,
            site: t.site,
            spec: t.spec.clone(),
            report: report.clone(),
        })
        .collect();

    Json(ParkResponse {
        park: state.park.clone(),
        turbines,
    })
}

/// Returns step records of one turbine, optionally filtered by index range.
///
/// `GET /turbines/{id}/output` → 200 + `Vec<StepRecord>` JSON
/// `GET /turbines/{id}/output?from=N&to=M` → filtered range (inclusive)
/// `from > to` → 400, unknown `id` → 404, both with `ErrorResponse`
pub async fn get_turbine_output(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
    Query(query): Query<OutputQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err(error(
            StatusCode::BAD_REQUEST,
            format!("`from` ({from}) must be <= `to` ({to})"),
        ));
    }

    let Some(result) = state.results.iter().find(|r| r.turbine_id == id) else {
        return Err(error(StatusCode::NOT_FOUND, format!("no turbine with id {id}")));
    };

    let records: Vec<StepRecord> = result
        .records()
        .into_iter()
        .filter(|r| r.index >= from && r.index <= to)
        .collect();

    Ok(Json(records))
}

fn error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: message }))
}
