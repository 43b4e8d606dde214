//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Internal
//! failures log their detail and expose only a fixed public message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use bug_core::responses::ErrorResponse;
use bug_db::error::DatabaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unusable request body.
    #[error("{0}")]
    BadRequest(String),

    /// One or more validation rules failed; messages already joined.
    #[error("{0}")]
    Validation(String),

    #[error("Bug not found")]
    NotFound,

    #[error("{public}")]
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn internal(public: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            public,
            detail: detail.to_string(),
        }
    }

    /// Map a persistence failure, using `public` as the 500 message.
    #[must_use]
    pub fn from_db(public: &'static str, err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { .. } => Self::NotFound,
            DatabaseError::SchemaValidation { errors } => Self::Validation(errors.join(", ")),
            other => Self::internal(public, other),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal { public, detail } => error!(%public, %detail, "request failed"),
            other => warn!(%status, error = %other, "request rejected"),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
