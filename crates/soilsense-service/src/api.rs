//! REST API endpoints for the soilsense-service.
//!
//! This module provides the HTTP surface over the synthetic dataset: current
//! conditions, forecast endpoints, time series, and the irrigation log.
//!
//! # Concurrency and Lock Acquisition
//!
//! All handlers share `state.store` behind an `RwLock`. Read endpoints take
//! the read lock for the duration of the query; only `POST
//! /api/irrigation/log` takes the write lock. No handler holds more than
//! one lock at a time.
//!
//! # Error Handling
//!
//! Handlers are infallible once their extractors succeed; malformed query
//! strings and request bodies are rejected by axum with 4xx responses
//! before a handler runs.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use soilsense_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use soilsense_core::thresholds::{self, NpkStatus, NutrientThresholds, SaturationRisk};
use soilsense_core::{irrigation, npk, ph, waterlogging};
use soilsense_core::{IrrigationOutlook, NpkForecast, PhForecast, WaterloggingOutlook};
use soilsense_types::{
    Alert, FertilizationEvent, HistoryPoint, IrrigationEvent, NewIrrigation, PhSample,
};

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/api/health", get(health))
        // Current conditions
        .route("/api/status", get(get_status))
        // Forecasts
        .route("/api/npk-predictions", get(get_npk_predictions))
        .route("/api/waterlogging-risk", get(get_waterlogging_risk))
        .route("/api/irrigation-predictions", get(get_irrigation_predictions))
        .route("/api/ph-predictions", get(get_ph_predictions))
        // Time series
        .route("/api/history", get(get_history))
        .route("/api/ph-history", get(get_ph_history))
        // Alerts and event logs
        .route("/api/alerts", get(get_alerts))
        .route("/api/irrigation-history", get(get_irrigation_history))
        .route("/api/irrigation/log", post(log_irrigation))
        .route("/api/fertilization-history", get(get_fertilization_history))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

// ==========================================================================
// Current Conditions
// ==========================================================================

/// Current soil conditions with derived status fields.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub soil_moisture: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub ec: f64,
    pub soil_temp: f64,
    pub air_temp: f64,
    pub humidity: f64,
    /// Per-nutrient adequacy against the agronomic thresholds.
    pub npk_status: NpkStatus,
    /// Saturation banding over the current water-filled pore space.
    pub waterlogging_risk: SaturationRisk,
    pub wfps: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

/// Get current soil conditions and overall system status.
///
/// # Lock Acquisition
///
/// Acquires a read lock on `store` to copy the latest sample.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let current = state.store.read().await.current();

    let npk_status = NutrientThresholds::default().evaluate(&current);
    let wfps = thresholds::wfps(current.soil_moisture);
    let waterlogging_risk = thresholds::saturation_risk(wfps);

    Json(StatusResponse {
        nitrogen: current.nitrogen,
        phosphorus: current.phosphorus,
        potassium: current.potassium,
        soil_moisture: current.soil_moisture,
        ph: current.ph,
        ec: current.ec,
        soil_temp: current.soil_temp,
        air_temp: current.air_temp,
        humidity: current.humidity,
        npk_status,
        waterlogging_risk,
        wfps: (wfps * 10.0).round() / 10.0,
        last_updated: current.timestamp,
    })
}

// ==========================================================================
// Forecast Endpoints
// ==========================================================================

/// Get NPK forecast and fertilization recommendation.
async fn get_npk_predictions(State(state): State<Arc<AppState>>) -> Json<NpkForecast> {
    let current = state.store.read().await.current();
    Json(npk::forecast(&current, &NutrientThresholds::default()))
}

/// Get waterlogging prediction and action plan.
async fn get_waterlogging_risk(State(state): State<Arc<AppState>>) -> Json<WaterloggingOutlook> {
    let current = state.store.read().await.current();
    Json(waterlogging::assess(&current))
}

/// Get moisture predictions and irrigation recommendation.
async fn get_irrigation_predictions(
    State(state): State<Arc<AppState>>,
) -> Json<IrrigationOutlook> {
    let current = state.store.read().await.current();
    Json(irrigation::forecast(&current))
}

/// Get pH predictions and correction recommendations.
async fn get_ph_predictions() -> Json<PhForecast> {
    Json(ph::forecast())
}

// ==========================================================================
// Time Series
// ==========================================================================

/// Query parameters for `/api/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Parameter to fetch (nitrogen, phosphorus, potassium, soil_moisture,
    /// pH, ...).
    pub parameter: String,
    /// Number of days of history.
    #[serde(default = "default_history_days")]
    pub days: i64,
}

fn default_history_days() -> i64 {
    7
}

/// Historical data for one parameter.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub parameter: String,
    pub days: i64,
    pub data: Vec<HistoryPoint>,
}

/// Get historical data for charts.
///
/// `parameter` is required; a request without it is rejected with 400.
/// Unknown parameter names are served as zero-valued series rather than
/// errors.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let data = state.store.read().await.history(&params.parameter, params.days);

    Json(HistoryResponse {
        parameter: params.parameter,
        days: params.days,
        data,
    })
}

/// Optional window parameter accepted by the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default)]
    pub days: Option<i64>,
}

/// Historical pH readings with event markers.
#[derive(Debug, Serialize)]
pub struct PhHistoryResponse {
    pub history: Vec<PhSample>,
}

/// Get historical pH with fertilization markers.
///
/// The `days` parameter is accepted for client compatibility; the generated
/// series covers exactly 90 days and is returned whole.
async fn get_ph_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysQuery>,
) -> Json<PhHistoryResponse> {
    if let Some(days) = params.days {
        debug!("pH history requested for {days} days; returning full series");
    }

    Json(PhHistoryResponse {
        history: state.store.read().await.ph_history().to_vec(),
    })
}

// ==========================================================================
// Alerts and Event Logs
// ==========================================================================

/// Active alerts.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

/// Get active alerts.
async fn get_alerts(State(state): State<Arc<AppState>>) -> Json<AlertsResponse> {
    Json(AlertsResponse {
        alerts: state.store.read().await.alerts().to_vec(),
    })
}

/// Past irrigation events, newest first.
#[derive(Debug, Serialize)]
pub struct IrrigationHistoryResponse {
    pub events: Vec<IrrigationEvent>,
}

/// Get past irrigation events.
///
/// The `days` parameter is accepted for client compatibility; the full log
/// is returned.
async fn get_irrigation_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysQuery>,
) -> Json<IrrigationHistoryResponse> {
    if let Some(days) = params.days {
        debug!("Irrigation history requested for {days} days; returning full log");
    }

    Json(IrrigationHistoryResponse {
        events: state.store.read().await.irrigation_events().to_vec(),
    })
}

/// Response for a logged irrigation event.
#[derive(Debug, Serialize)]
pub struct LogIrrigationResponse {
    pub status: &'static str,
    pub event: IrrigationEvent,
}

/// Log a new irrigation event.
///
/// Fields missing from the request body are filled in by the store;
/// unrecognized fields are ignored.
///
/// # Lock Acquisition
///
/// Acquires the write lock on `store` to append the event.
async fn log_irrigation(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewIrrigation>,
) -> Json<LogIrrigationResponse> {
    let event = state.store.write().await.log_irrigation(new);

    Json(LogIrrigationResponse {
        status: "success",
        event,
    })
}

/// Past fertilization events, newest first.
#[derive(Debug, Serialize)]
pub struct FertilizationHistoryResponse {
    pub events: Vec<FertilizationEvent>,
}

/// Get past fertilization events.
async fn get_fertilization_history(
    State(state): State<Arc<AppState>>,
) -> Json<FertilizationHistoryResponse> {
    Json(FertilizationHistoryResponse {
        events: state.store.read().await.fertilizations().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use soilsense_store::SoilStore;

    fn create_test_state() -> Arc<AppState> {
        AppState::new(SoilStore::with_seed(42))
    }

    async fn response_body(response: axum::response::Response) -> String {
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get_json(state: &Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router().with_state(Arc::clone(state));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response_body(response).await;
        let json = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_seconds"].is_number());
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["nitrogen"].is_number());
        assert!(json["pH"].is_number());
        assert!(json.get("ph").is_none());
        assert!(json["wfps"].is_number());
        assert!(json["last_updated"].is_string());

        let nitrogen_status = json["npk_status"]["nitrogen"].as_str().unwrap();
        assert!(nitrogen_status == "adequate" || nitrogen_status == "low");

        let risk = json["waterlogging_risk"].as_str().unwrap();
        assert!(risk == "high" || risk == "medium" || risk == "low");
    }

    #[tokio::test]
    async fn test_status_wfps_consistent_with_moisture() {
        let state = create_test_state();
        let (_, json) = get_json(&state, "/api/status").await;

        let moisture = json["soil_moisture"].as_f64().unwrap();
        let wfps = json["wfps"].as_f64().unwrap();
        assert!((wfps - moisture * 2.0).abs() < 0.05 + 1e-9);
    }

    #[tokio::test]
    async fn test_npk_predictions_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/npk-predictions").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["current"]["N"].is_number());
        assert!(json["7_days"]["P"].is_number());
        assert!(json["14_days"]["K"].is_number());
        assert_eq!(json["recommendation"]["cost_savings"], 1050);

        let action = json["recommendation"]["action"].as_str().unwrap();
        assert!(action == "fertilize" || action == "monitor");
    }

    #[tokio::test]
    async fn test_waterlogging_risk_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/waterlogging-risk").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rainfall_forecast_mm"], 25);
        assert_eq!(json["time_to_event_hours"], 48);
        assert_eq!(json["cause"], "Heavy rain (25mm) forecasted");

        // Generated moisture is at least 30%, so the predicted peak always
        // clears the HIGH band
        assert_eq!(json["risk_level"], "HIGH");
        assert_eq!(json["actions"].as_array().unwrap().len(), 4);
        assert_eq!(json["potential_loss"], 20000);
    }

    #[tokio::test]
    async fn test_history_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/history?parameter=nitrogen&days=7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["parameter"], "nitrogen");
        assert_eq!(json["days"], 7);

        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 168);
        assert!(data[0]["timestamp"].is_string());
        assert!(data[0]["value"].is_number());
    }

    #[tokio::test]
    async fn test_history_defaults_to_seven_days() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/history?parameter=pH").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["days"], 7);
        assert_eq!(json["data"].as_array().unwrap().len(), 168);
    }

    #[tokio::test]
    async fn test_history_requires_parameter() {
        let state = create_test_state();
        let (status, _) = get_json(&state, "/api/history").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_rejects_non_numeric_days() {
        let state = create_test_state();
        let (status, _) = get_json(&state, "/api/history?parameter=nitrogen&days=soon").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_unknown_parameter_returns_zeros() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/history?parameter=rainfall").await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 168);
        assert!(data.iter().all(|p| p["value"] == 0.0));
    }

    #[tokio::test]
    async fn test_alerts_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/alerts").await;

        assert_eq!(status, StatusCode::OK);
        let alerts = json["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0]["id"], "alert_001");
        assert_eq!(alerts[0]["type"], "waterlogging_risk");
        assert_eq!(alerts[1]["severity"], "medium");
    }

    #[tokio::test]
    async fn test_irrigation_predictions_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/irrigation-predictions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["trend"], "decreasing");
        assert_eq!(json["confidence"], "±2.1%");
        assert_eq!(json["current_status"]["range"], "40-60%");
        assert_eq!(json["coordination"]["waterlogging_safe"], true);

        let predictions = json["predictions"].as_object().unwrap();
        for horizon in ["1h", "6h", "24h", "3d", "7d"] {
            assert!(predictions[horizon].is_number(), "missing {horizon}");
        }
    }

    #[tokio::test]
    async fn test_irrigation_history_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/irrigation-history").await;

        assert_eq!(status, StatusCode::OK);
        let events = json["events"].as_array().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0]["id"], "irr_0");
        assert!(events[0]["volume_liters"].is_number());
    }

    #[tokio::test]
    async fn test_irrigation_history_days_param_ignored() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/irrigation-history?days=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["events"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_log_irrigation_endpoint() {
        let state = create_test_state();

        let app = router().with_state(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/irrigation/log")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"volume_liters": 40000.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_body(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["event"]["id"], "irr_5");
        assert_eq!(json["event"]["volume_liters"], 40000.0);
        assert_eq!(json["event"]["cost"], 1400.0);

        // The logged event shows up first in the history listing
        let (_, history) = get_json(&state, "/api/irrigation-history").await;
        let events = history["events"].as_array().unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0]["id"], "irr_5");
    }

    #[tokio::test]
    async fn test_log_irrigation_empty_object() {
        let state = create_test_state();

        let app = router().with_state(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/irrigation/log")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_body(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["event"]["volume_liters"], 0.0);
        assert_eq!(json["event"]["cost"], 0.0);
    }

    #[tokio::test]
    async fn test_log_irrigation_rejects_malformed_json() {
        let state = create_test_state();

        let app = router().with_state(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/irrigation/log")
                    .header("content-type", "application/json")
                    .body(Body::from("volume: lots"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fertilization_history_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/fertilization-history").await;

        assert_eq!(status, StatusCode::OK);
        let events = json["events"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["id"], "fert_001");
        assert_eq!(events[0]["type"], "NPK 20-10-10");
        assert_eq!(events[1]["amount_kg"], 45);
    }

    #[tokio::test]
    async fn test_ph_predictions_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/ph-predictions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current_status"]["pH"], 6.8);
        assert_eq!(json["predictions"]["7d"], 6.75);
        assert_eq!(json["predictions"]["90d"], 6.2);
        assert_eq!(json["drift_analysis"]["rate"], -0.025);
        assert_eq!(
            json["nutrient_availability"]["current_pH_6_8"]["potassium"],
            "100%"
        );
        assert_eq!(
            json["recommendations"]["medium_term"]["action"],
            "prepare_lime"
        );
    }

    #[tokio::test]
    async fn test_ph_history_endpoint() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/ph-history").await;

        assert_eq!(status, StatusCode::OK);
        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 90);

        // Ascending order: lime marker 60 days back, fertilization 12 days back
        assert!(history[0]["event_type"].is_null());
        assert_eq!(history[29]["event_type"], "lime_application");
        assert_eq!(history[77]["event_type"], "fertilization");
    }

    #[tokio::test]
    async fn test_ph_history_days_param_ignored() {
        let state = create_test_state();
        let (status, json) = get_json(&state, "/api/ph-history?days=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["history"].as_array().unwrap().len(), 90);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = create_test_state();
        let (status, _) = get_json(&state, "/api/soil-secrets").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
