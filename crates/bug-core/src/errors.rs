//! Validation error types shared by the server and the client.
//!
//! Transport and storage errors live in their own crates (`ApiError`,
//! `DatabaseError`, `ClientError`). Rule violations are defined here because
//! both tiers produce them from the same rule set.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A bug field that validation rules apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    Status,
    Priority,
    ReportedBy,
    StepsToReproduce,
    ExpectedBehavior,
    ActualBehavior,
}

impl Field {
    /// JSON key of the field on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::ReportedBy => "reportedBy",
            Self::StepsToReproduce => "stepsToReproduce",
            Self::ExpectedBehavior => "expectedBehavior",
            Self::ActualBehavior => "actualBehavior",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::ReportedBy => "Reported by",
            Self::StepsToReproduce => "Steps to reproduce",
            Self::ExpectedBehavior => "Expected behavior",
            Self::ActualBehavior => "Actual behavior",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    RequiredField,
    Length,
    Characters,
    Enum,
}

/// A single violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// A mandatory field is missing, empty, or whitespace-only.
    #[error("{field} is required")]
    RequiredField { field: Field },

    /// The trimmed value is shorter than the minimum.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: Field, min: usize },

    /// The trimmed value is longer than the maximum.
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: Field, max: usize },

    /// The value contains a control character such as NUL. Tabs and line
    /// breaks are allowed.
    #[error("{field} cannot contain control characters")]
    ControlCharacters { field: Field },

    /// The value is not one of the enumerated options.
    #[error("{field} must be either {expected}")]
    Enum {
        field: Field,
        value: String,
        expected: &'static str,
    },
}

impl RuleViolation {
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::RequiredField { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::ControlCharacters { field }
            | Self::Enum { field, .. } => *field,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        match self {
            Self::RequiredField { .. } => ViolationKind::RequiredField,
            Self::TooShort { .. } | Self::TooLong { .. } => ViolationKind::Length,
            Self::ControlCharacters { .. } => ViolationKind::Characters,
            Self::Enum { .. } => ViolationKind::Enum,
        }
    }
}
