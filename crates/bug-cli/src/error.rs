//! Client-side error types.

use thiserror::Error;

/// Errors talking to the bug tracker API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` is the server's
    /// `error` text, unchanged.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The configured server URL cannot have API paths appended to it.
    #[error("Invalid server URL {0}")]
    InvalidUrl(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of a rejected call; `None` when no response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
