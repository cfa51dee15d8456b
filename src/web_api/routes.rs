//! API Routes

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::event_log_service::EventReport;
use crate::heartbeat_service::HeartbeatReport;
use crate::state::AppState;

/// Fixed acknowledgement body for successful ingestion
const INSERT_ACK: &str = "row inserted successfully";

/// Fixed rejection message for absent or unusable request bodies
const NO_JSON_MESSAGE: &str = "No JSON received";

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(super::health_check))
        // Intruder events
        .route("/create", post(ingest_events))
        .route("/recent", get(recent_events))
        // Device heartbeats
        .route("/status_create", post(ingest_heartbeats))
        .route("/status", get(recent_heartbeats))
        .with_state(state)
}

// ========================================
// Ingestion Handlers
// ========================================

async fn ingest_events(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let reports: Vec<EventReport> = parse_batch(&body)?;
    let stats = state.event_log.record_batch(&reports).await?;

    tracing::info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "Event batch recorded"
    );

    Ok((StatusCode::CREATED, Json(json!({ "message": INSERT_ACK }))))
}

async fn ingest_heartbeats(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let reports: Vec<HeartbeatReport> = parse_batch(&body)?;
    let stats = state.heartbeat.record_batch(&reports).await?;

    tracing::info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "Heartbeat batch recorded"
    );

    Ok((StatusCode::CREATED, Json(json!({ "message": INSERT_ACK }))))
}

// ========================================
// Window Query Handlers
// ========================================

async fn recent_events(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.event_log.recent().await?;
    Ok(Json(records))
}

async fn recent_heartbeats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.heartbeat.recent().await?;
    Ok(Json(records))
}

// ========================================
// Body Parsing
// ========================================

/// Parse an ingestion body into a batch of reports.
///
/// A single object becomes a one-item batch, an array is taken as-is.
/// An absent body, malformed JSON, an empty object or array, and any
/// other JSON shape are all rejected the same way.
fn parse_batch<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| Error::Validation(NO_JSON_MESSAGE.to_string()))?;

    match value {
        Value::Object(ref map) if map.is_empty() => {
            Err(Error::Validation(NO_JSON_MESSAGE.to_string()))
        }
        Value::Object(_) => {
            let item = serde_json::from_value(value)
                .map_err(|e| Error::Validation(format!("Invalid payload: {e}")))?;
            Ok(vec![item])
        }
        Value::Array(items) if items.is_empty() => {
            Err(Error::Validation(NO_JSON_MESSAGE.to_string()))
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| Error::Validation(format!("Invalid payload: {e}")))
            })
            .collect(),
        _ => Err(Error::Validation(NO_JSON_MESSAGE.to_string())),
    }
}
