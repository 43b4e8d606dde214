//! JSON bodies returned by the HTTP API besides `Bug` itself.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// RFC 3339 time the response was produced.
    pub timestamp: String,
}

/// Response from `GET /api/health/db`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DbHealthResponse {
    /// Round-trip time of a ping query, in milliseconds.
    pub rtt: u128,
}

/// Confirmation body, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
