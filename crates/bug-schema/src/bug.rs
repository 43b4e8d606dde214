//! The stored-record schema for `Bug`.
//!
//! Generated once from bug-core's `#[derive(JsonSchema)]` with
//! [`schemars::schema_for!`] and checked with `jsonschema` before every write.

use bug_core::entities::Bug;
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

pub struct BugSchema {
    schema: Value,
}

impl BugSchema {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: schema_for!(Bug).to_value(),
        }
    }

    /// The generated JSON Schema document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.schema
    }

    /// Check a JSON value against the bug schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing every violated
    /// constraint, or `SchemaError::Compile` if the schema itself is broken.
    pub fn validate_value(&self, instance: &Value) -> Result<(), SchemaError> {
        let validator =
            jsonschema::validator_for(&self.schema).map_err(|e| SchemaError::Compile(e.to_string()))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a bug record before it is written.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` when a stored-record constraint
    /// is violated.
    pub fn validate_bug(&self, bug: &Bug) -> Result<(), SchemaError> {
        let instance = serde_json::to_value(bug)?;
        self.validate_value(&instance)
    }
}

impl Default for BugSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bug_core::enums::{BugPriority, BugStatus};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn valid_bug() -> Bug {
        let now = Utc::now();
        Bug {
            id: "0123456789abcdef01234567".into(),
            title: "Crash on save".into(),
            description: "Saving a draft crashes the editor".into(),
            status: BugStatus::InProgress,
            priority: BugPriority::High,
            reported_by: "qa".into(),
            steps_to_reproduce: None,
            expected_behavior: None,
            actual_behavior: Some("Editor closes".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn document_requires_the_record_fields() {
        let schema = BugSchema::new();
        let required = schema.document()["required"].as_array().unwrap();
        for field in ["id", "title", "description", "status", "priority", "reportedBy"] {
            assert!(required.iter().any(|r| r == field), "{field} not required");
        }
    }

    #[test]
    fn validate_valid_bug() {
        assert!(BugSchema::new().validate_bug(&valid_bug()).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds_title() {
        let bug = Bug {
            title: "ab".into(),
            ..valid_bug()
        };
        let result = BugSchema::new().validate_bug(&bug);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert_eq!(errors.len(), 1);
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_oversized_free_text() {
        let bug = Bug {
            steps_to_reproduce: Some("s".repeat(5001)),
            ..valid_bug()
        };
        assert!(BugSchema::new().validate_bug(&bug).is_err());
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let invalid = serde_json::json!({
            "id": "0123456789abcdef01234567",
            "title": "Crash on save",
            "status": "open",
            "priority": "low",
            "reportedBy": "Anonymous",
            "createdAt": "2026-02-08T12:00:00Z",
            "updatedAt": "2026-02-08T12:00:00Z"
        });
        let result = BugSchema::new().validate_value(&invalid);
        assert!(matches!(result, Err(SchemaError::ValidationFailed { .. })));
    }
}
