//! `/api/bugs` handlers.
//!
//! Create and update run the shared validator before anything touches the
//! database; the service then enforces the stored-record schema.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::debug;

use bug_core::entities::Bug;
use bug_core::input::BugInput;
use bug_core::responses::MessageResponse;
use bug_core::validation::{Mode, validate_bug_data};
use bug_db::updates::bug::{BugUpdate, NewBug};

use crate::error::ApiError;
use crate::state::AppState;

const FETCH_ALL_FAILED: &str = "Failed to fetch bugs";
const FETCH_FAILED: &str = "Failed to fetch bug";
const CREATE_FAILED: &str = "Failed to create bug";
const UPDATE_FAILED: &str = "Failed to update bug";
const DELETE_FAILED: &str = "Failed to delete bug";

pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and description are required";
pub const DELETED_MESSAGE: &str = "Bug deleted successfully";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bugs).post(create_bug))
        .route("/{id}", get(get_bug).put(update_bug).delete(delete_bug))
}

/// Turn the raw JSON extraction into a `BugInput`, reporting body problems
/// as 400s.
fn parse_input(body: Result<Json<Value>, JsonRejection>) -> Result<BugInput, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    BugInput::from_json(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn check(input: &BugInput, mode: Mode) -> Result<(), ApiError> {
    let report = validate_bug_data(input, mode);
    if report.is_valid {
        Ok(())
    } else {
        Err(ApiError::Validation(report.joined()))
    }
}

#[tracing::instrument(name = "GET /api/bugs", skip(state))]
pub async fn list_bugs(State(state): State<AppState>) -> Result<Json<Vec<Bug>>, ApiError> {
    let bugs = state
        .bugs
        .list_bugs()
        .await
        .map_err(|e| ApiError::from_db(FETCH_ALL_FAILED, e))?;
    debug!(count = bugs.len(), "listed bugs");
    Ok(Json(bugs))
}

#[tracing::instrument(name = "GET /api/bugs/{id}", skip(state))]
pub async fn get_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bug>, ApiError> {
    let bug = state
        .bugs
        .get_bug(&id)
        .await
        .map_err(|e| ApiError::from_db(FETCH_FAILED, e))?;
    Ok(Json(bug))
}

#[tracing::instrument(name = "POST /api/bugs", skip(state, body))]
pub async fn create_bug(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Bug>), ApiError> {
    let input = parse_input(body)?;
    if !input.has_required_fields() {
        return Err(ApiError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    check(&input, Mode::Create)?;

    let new = NewBug::try_from(input).map_err(|v| ApiError::Validation(v.to_string()))?;
    let bug = state
        .bugs
        .create_bug(new)
        .await
        .map_err(|e| ApiError::from_db(CREATE_FAILED, e))?;
    Ok((StatusCode::CREATED, Json(bug)))
}

#[tracing::instrument(name = "PUT /api/bugs/{id}", skip(state, body))]
pub async fn update_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Bug>, ApiError> {
    let input = parse_input(body)?;
    check(&input, Mode::Update)?;

    let update = BugUpdate::try_from(input).map_err(|v| ApiError::Validation(v.to_string()))?;
    let bug = state
        .bugs
        .update_bug(&id, update)
        .await
        .map_err(|e| ApiError::from_db(UPDATE_FAILED, e))?;
    Ok(Json(bug))
}

#[tracing::instrument(name = "DELETE /api/bugs/{id}", skip(state))]
pub async fn delete_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .bugs
        .delete_bug(&id)
        .await
        .map_err(|e| ApiError::from_db(DELETE_FAILED, e))?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
