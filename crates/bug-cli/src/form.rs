//! Create/edit form state.
//!
//! Values are held as text, the way they are typed, and checked with the
//! same rules the server applies. A form with errors never reaches the API.

use tracing::debug;

use bug_core::entities::Bug;
use bug_core::enums::{BugPriority, BugStatus};
use bug_core::errors::Field;
use bug_core::input::BugInput;
use bug_core::validation::{Mode, validate_bug_data};

use crate::api::BugApi;
use crate::error::ClientError;

/// Result of [`BugForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; see [`BugForm::errors`].
    Invalid,
    Created(Bug),
    Updated(Bug),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugForm {
    title: String,
    description: String,
    priority: String,
    status: String,
    reported_by: String,
    steps_to_reproduce: String,
    expected_behavior: String,
    actual_behavior: String,
    editing: Option<String>,
    errors: Vec<(Field, String)>,
}

impl Default for BugForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: BugPriority::default().as_str().to_string(),
            status: BugStatus::default().as_str().to_string(),
            reported_by: String::new(),
            steps_to_reproduce: String::new(),
            expected_behavior: String::new(),
            actual_behavior: String::new(),
            editing: None,
            errors: Vec::new(),
        }
    }
}

impl BugForm {
    /// Empty form for a new bug (priority medium, status open).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing record; submitting updates it.
    #[must_use]
    pub fn editing(bug: &Bug) -> Self {
        Self {
            title: bug.title.clone(),
            description: bug.description.clone(),
            priority: bug.priority.as_str().to_string(),
            status: bug.status.as_str().to_string(),
            reported_by: bug.reported_by.clone(),
            steps_to_reproduce: bug.steps_to_reproduce.clone().unwrap_or_default(),
            expected_behavior: bug.expected_behavior.clone().unwrap_or_default(),
            actual_behavior: bug.actual_behavior.clone().unwrap_or_default(),
            editing: Some(bug.id.clone()),
            errors: Vec::new(),
        }
    }

    /// Id of the bug being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Priority => &self.priority,
            Field::Status => &self.status,
            Field::ReportedBy => &self.reported_by,
            Field::StepsToReproduce => &self.steps_to_reproduce,
            Field::ExpectedBehavior => &self.expected_behavior,
            Field::ActualBehavior => &self.actual_behavior,
        }
    }

    /// Set a field and clear any error shown for it.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Priority => &mut self.priority,
            Field::Status => &mut self.status,
            Field::ReportedBy => &mut self.reported_by,
            Field::StepsToReproduce => &mut self.steps_to_reproduce,
            Field::ExpectedBehavior => &mut self.expected_behavior,
            Field::ActualBehavior => &mut self.actual_behavior,
        };
        *slot = value.into();
        self.errors.retain(|(f, _)| *f != field);
    }

    /// Message currently shown for `field`.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn errors(&self) -> &[(Field, String)] {
        &self.errors
    }

    /// Request body for the current values. Blank optional text is omitted
    /// on create and sent as `null` on edit so it clears the stored value.
    #[must_use]
    pub fn to_input(&self) -> BugInput {
        let optional = |value: &str| {
            if value.trim().is_empty() {
                self.editing.as_ref().map(|_| None)
            } else {
                Some(Some(value.to_string()))
            }
        };
        BugInput {
            title: Some(Some(self.title.clone())),
            description: Some(Some(self.description.clone())),
            status: Some(self.status.clone()),
            priority: Some(self.priority.clone()),
            reported_by: (!self.reported_by.trim().is_empty()).then(|| self.reported_by.clone()),
            steps_to_reproduce: optional(&self.steps_to_reproduce),
            expected_behavior: optional(&self.expected_behavior),
            actual_behavior: optional(&self.actual_behavior),
        }
    }

    /// Check every rule, keeping the first message per field.
    ///
    /// Returns `true` when the form can be submitted.
    pub fn validate(&mut self) -> bool {
        let report = validate_bug_data(&self.to_input(), Mode::Create);
        self.errors.clear();
        for violation in &report.errors {
            let field = violation.field();
            if self.error(field).is_none() {
                self.errors.push((field, violation.to_string()));
            }
        }
        debug!(errors = self.errors.len(), "validated bug form");
        report.is_valid
    }

    /// Validate, then create or update through `api`.
    ///
    /// # Errors
    ///
    /// Returns the `ClientError` from the API call. Local validation
    /// failures are `Ok(SubmitOutcome::Invalid)` and make no call.
    pub async fn submit<A: BugApi>(&mut self, api: &A) -> Result<SubmitOutcome, ClientError> {
        if !self.validate() {
            return Ok(SubmitOutcome::Invalid);
        }
        let input = self.to_input();
        match &self.editing {
            Some(id) => api.update(id, &input).await.map(SubmitOutcome::Updated),
            None => api.create(&input).await.map(SubmitOutcome::Created),
        }
    }
}
