//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use wind_yield::api::{AppState, router};
use wind_yield::config::ParkConfig;
use wind_yield::pipeline::{ParkRun, load_weather, run_park};

/// Runs the baseline preset and returns the API state.
fn build_api_state() -> Arc<AppState> {
    let setup = ParkConfig::baseline().build().unwrap();
    let weather = load_weather(setup.weather.as_ref(), &setup.turbines).unwrap();
    let results = run_park(&setup.turbines, &weather, setup.vapor_model).unwrap();
    Arc::new(ParkRun::new(setup.turbines, results))
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn baseline_park_endpoint() {
    let state = build_api_state();
    let (status, json) = get_json(state.clone(), "/park").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["park"]["turbines"], 3);
    let energy = json["park"]["energy_mwh"].as_f64().unwrap();
    assert!((energy - state.park.energy_mwh).abs() < 1e-9);

    let turbines = json["turbines"].as_array().unwrap();
    assert_eq!(turbines.len(), 3);
    assert_eq!(turbines[2]["site"]["latitude"], 53.90);
    assert_eq!(turbines[0]["spec"]["model"], "SWT-2.3-93");
    assert_eq!(turbines[0]["report"]["hours"], 72.0);
}

#[tokio::test]
async fn baseline_output_matches_results() {
    let state = build_api_state();
    let (status, json) = get_json(state.clone(), "/turbines/1/output?from=24&to=47").await;
    assert_eq!(status, StatusCode::OK);

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 24);
    let expected = &state.results[1];
    for row in rows {
        let i = row["index"].as_u64().unwrap() as usize;
        assert_eq!(row["output_power_kw"].as_f64(), Some(expected.output_power_kw[i]));
        assert!(row["output_power_kw"].as_f64().unwrap() <= 2300.0);
    }
    assert_eq!(rows[0]["timestamp"], "2024-03-02T00:00:00Z");
}

#[tokio::test]
async fn range_past_the_end_is_truncated() {
    let (status, json) = get_json(build_api_state(), "/turbines/0/output?from=70").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn errors_carry_a_message() {
    let state = build_api_state();
    let (status, json) = get_json(state.clone(), "/turbines/3/output").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());

    let (status, json) = get_json(state, "/turbines/0/output?from=5&to=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("from"));
}
