use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BugPriority, BugStatus};

/// Reporter name used when none is given.
pub const DEFAULT_REPORTER: &str = "Anonymous";

/// A tracked defect.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    #[schemars(length(min = 24, max = 24))]
    pub id: String,
    #[schemars(length(min = 3, max = 100))]
    pub title: String,
    #[schemars(length(min = 10, max = 5000))]
    pub description: String,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub reported_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 5000))]
    pub steps_to_reproduce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 5000))]
    pub expected_behavior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 5000))]
    pub actual_behavior: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
