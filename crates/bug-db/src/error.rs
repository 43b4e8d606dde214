//! Database error types for bug-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No bug exists with the given identifier.
    #[error("Bug not found: {id}")]
    NotFound { id: String },

    /// The identifier is not 24 hex characters.
    #[error("Invalid bug identifier: {0}")]
    InvalidIdentifier(String),

    /// The record violates the stored-record schema.
    #[error("Schema validation failed: {}", errors.join(", "))]
    SchemaValidation { errors: Vec<String> },

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<bug_schema::SchemaError> for DatabaseError {
    fn from(err: bug_schema::SchemaError) -> Self {
        match err {
            bug_schema::SchemaError::ValidationFailed { errors } => Self::SchemaValidation { errors },
            other => Self::Other(other.into()),
        }
    }
}
