//! Request bodies for creating and patching bugs.
//!
//! `BugInput` keeps every field as raw text so that invalid enum values reach
//! the validator (and produce a field message) instead of failing
//! deserialization. Title, description, and the free-text fields distinguish
//! "absent" (`None`) from "present but null" (`Some(None)`), which is what
//! partial-update semantics need.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

/// Keys a client may never set. They are removed before deserialization.
pub const PROTECTED_FIELDS: [&str; 4] = ["id", "_id", "createdAt", "updatedAt"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugInput {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub expected_behavior: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub actual_behavior: Option<Option<String>>,
}

/// Errors turning a JSON body into a `BugInput`.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl BugInput {
    /// Parse a JSON body, dropping any protected keys first.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NotAnObject` for non-object bodies and
    /// `InputError::Malformed` when a field has the wrong JSON type.
    pub fn from_json(mut value: serde_json::Value) -> Result<Self, InputError> {
        let map = value.as_object_mut().ok_or(InputError::NotAnObject)?;
        for key in PROTECTED_FIELDS {
            if map.remove(key).is_some() {
                debug!(key, "dropping protected field from bug input");
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Title text if present and non-null.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(Option::as_deref)
    }

    /// Description text if present and non-null.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref().and_then(Option::as_deref)
    }

    /// Whether both mandatory fields carry non-blank text.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        let filled = |s: Option<&str>| s.is_some_and(|s| !s.trim().is_empty());
        filled(self.title_text()) && filled(self.description_text())
    }

    /// Whether the input touches no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Deserialize a present field (including `null`) as `Some(_)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
