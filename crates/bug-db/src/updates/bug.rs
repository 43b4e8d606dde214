//! Bug create payload and update builder.

use serde::Serialize;

use bug_core::enums::{BugPriority, BugStatus};
use bug_core::errors::{Field, RuleViolation};
use bug_core::input::BugInput;

/// Fields accepted when creating a bug. Text is trimmed on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub status: Option<BugStatus>,
    pub priority: Option<BugPriority>,
    pub reported_by: Option<String>,
    pub steps_to_reproduce: Option<String>,
    pub expected_behavior: Option<String>,
    pub actual_behavior: Option<String>,
}

impl NewBug {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Changed fields of a bug. `id`, `createdAt` and `updatedAt` have no
/// counterpart here and can never be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BugUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BugStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<BugPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_behavior: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_behavior: Option<Option<String>>,
}

impl BugUpdate {
    /// Whether the update changes no column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct BugUpdateBuilder(BugUpdate);

impl BugUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(BugUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: BugStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: BugPriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn reported_by(mut self, reported_by: impl Into<String>) -> Self {
        self.0.reported_by = Some(reported_by.into());
        self
    }

    #[must_use]
    pub fn steps_to_reproduce(mut self, steps: Option<String>) -> Self {
        self.0.steps_to_reproduce = Some(steps);
        self
    }

    #[must_use]
    pub fn expected_behavior(mut self, expected: Option<String>) -> Self {
        self.0.expected_behavior = Some(expected);
        self
    }

    #[must_use]
    pub fn actual_behavior(mut self, actual: Option<String>) -> Self {
        self.0.actual_behavior = Some(actual);
        self
    }

    #[must_use]
    pub fn build(self) -> BugUpdate {
        self.0
    }
}

impl Default for BugUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<BugStatus>, RuleViolation> {
    value
        .map(|s| {
            s.parse().map_err(|_| RuleViolation::Enum {
                field: Field::Status,
                value: s.to_string(),
                expected: BugStatus::EXPECTED,
            })
        })
        .transpose()
}

fn parse_priority(value: Option<&str>) -> Result<Option<BugPriority>, RuleViolation> {
    value
        .map(|s| {
            s.parse().map_err(|_| RuleViolation::Enum {
                field: Field::Priority,
                value: s.to_string(),
                expected: BugPriority::EXPECTED,
            })
        })
        .transpose()
}

fn required(field: Field, value: Option<Option<String>>) -> Result<String, RuleViolation> {
    value
        .flatten()
        .ok_or(RuleViolation::RequiredField { field })
}

impl TryFrom<BugInput> for NewBug {
    type Error = RuleViolation;

    fn try_from(input: BugInput) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(input.status.as_deref())?,
            priority: parse_priority(input.priority.as_deref())?,
            title: required(Field::Title, input.title)?,
            description: required(Field::Description, input.description)?,
            reported_by: input.reported_by,
            steps_to_reproduce: input.steps_to_reproduce.flatten(),
            expected_behavior: input.expected_behavior.flatten(),
            actual_behavior: input.actual_behavior.flatten(),
        })
    }
}

impl TryFrom<BugInput> for BugUpdate {
    type Error = RuleViolation;

    fn try_from(input: BugInput) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(input.status.as_deref())?,
            priority: parse_priority(input.priority.as_deref())?,
            title: input
                .title
                .map(|t| required(Field::Title, Some(t)))
                .transpose()?,
            description: input
                .description
                .map(|d| required(Field::Description, Some(d)))
                .transpose()?,
            reported_by: input.reported_by,
            steps_to_reproduce: input.steps_to_reproduce,
            expected_behavior: input.expected_behavior,
            actual_behavior: input.actual_behavior,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(value: serde_json::Value) -> BugInput {
        BugInput::from_json(value).unwrap()
    }

    #[test]
    fn builder_sets_only_touched_fields() {
        let update = BugUpdateBuilder::new()
            .status(BugStatus::Resolved)
            .actual_behavior(None)
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"status": "resolved", "actual_behavior": null})
        );
    }

    #[test]
    fn new_bug_from_input() {
        let new = NewBug::try_from(input(json!({
            "title": "Login bug",
            "description": "Cannot login with correct credentials",
            "priority": "high"
        })))
        .unwrap();
        assert_eq!(new.title, "Login bug");
        assert_eq!(new.priority, Some(BugPriority::High));
        assert_eq!(new.status, None);
    }

    #[test]
    fn new_bug_requires_title() {
        let err = NewBug::try_from(input(json!({"description": "long enough text"}))).unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn update_from_input_keeps_absence() {
        let update = BugUpdate::try_from(input(json!({"status": "resolved"}))).unwrap();
        assert_eq!(
            update,
            BugUpdateBuilder::new().status(BugStatus::Resolved).build()
        );
    }

    #[test]
    fn update_from_input_rejects_null_title() {
        assert!(BugUpdate::try_from(input(json!({"title": null}))).is_err());
    }

    #[test]
    fn update_from_input_rejects_unknown_priority() {
        let err = BugUpdate::try_from(input(json!({"priority": "critical"}))).unwrap_err();
        assert_eq!(err.to_string(), "Priority must be either low, medium, or high");
    }

    #[test]
    fn empty_input_is_empty_update() {
        assert!(BugUpdate::try_from(input(json!({}))).unwrap().is_empty());
    }
}
