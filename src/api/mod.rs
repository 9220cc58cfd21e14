//! REST API over the results of a finished park run.
//!
//! Provides two GET endpoints:
//! - `/park`: turbine specs, sites, per-turbine and park yield reports
//! - `/turbines/{id}/output`: step records of one turbine with optional
//!   index range filtering

mod handlers;
mod types;

pub use types::{ErrorResponse, OutputQuery, ParkResponse, TurbineEntry};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::pipeline::ParkRun;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the park run completes and wrapped in `Arc`;
/// no locks needed since all data is read-only.
pub type AppState = ParkRun;

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/park", get(handlers::get_park))
        .route("/turbines/{id}/output", get(handlers::get_turbine_output))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process ends.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
