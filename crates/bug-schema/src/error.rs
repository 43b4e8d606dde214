//! Errors from checking a record against the bug schema.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The record breaks one or more schema constraints.
    #[error("Validation failed: {}", errors.join(", "))]
    ValidationFailed { errors: Vec<String> },

    /// The generated schema could not be compiled into a validator.
    #[error("Bug schema does not compile: {0}")]
    Compile(String),

    #[error("Bug record does not serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}
