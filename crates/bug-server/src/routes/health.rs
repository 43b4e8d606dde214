use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};

use bug_core::responses::{DbHealthResponse, HealthResponse};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/db", get(db_health))
}

#[tracing::instrument(name = "GET /api/health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Bug Tracker API is running".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[tracing::instrument(name = "GET /api/health/db", skip(state))]
pub async fn db_health(State(state): State<AppState>) -> Result<Json<DbHealthResponse>, ApiError> {
    let elapsed = state
        .bugs
        .ping()
        .await
        .map_err(|e| ApiError::internal("Database unavailable", e))?;
    Ok(Json(DbHealthResponse {
        rtt: elapsed.as_millis(),
    }))
}
