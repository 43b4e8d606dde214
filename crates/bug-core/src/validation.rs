//! Validation rules for bug data.
//!
//! This is the only rule set in the system: the HTTP controller runs it on
//! request bodies and the client form runs it before submitting. The storage
//! layer enforces the same bounds through the `Bug` JSON Schema.
//!
//! Rules operate on trimmed text and count characters, not bytes.

use tracing::debug;

use crate::enums::{BugPriority, BugStatus};
use crate::errors::{Field, RuleViolation};
use crate::input::BugInput;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 5000;
/// Upper bound for the optional free-text fields.
pub const TEXT_MAX: usize = 5000;

/// Whether the data is a new record or a patch of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Title and description are mandatory.
    Create,
    /// Only fields present in the patch are checked.
    Update,
}

/// Every violated rule for one piece of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<RuleViolation>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<RuleViolation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// All messages joined with `", "`, the form used in HTTP error bodies.
    #[must_use]
    pub fn joined(&self) -> String {
        self.messages().join(", ")
    }

    /// First violation reported for `field`, if any.
    #[must_use]
    pub fn first_for(&self, field: Field) -> Option<&RuleViolation> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether `s` has between `min` and `max` characters, inclusive.
#[must_use]
pub fn is_valid_length(s: &str, min: usize, max: usize) -> bool {
    let len = s.chars().count();
    len >= min && len <= max
}

/// Whether `s` contains a control character other than tab, CR or LF.
///
/// SQLite's `length()` stops at NUL, so such text would also disagree with
/// the storage constraints.
#[must_use]
pub fn has_control_chars(s: &str) -> bool {
    s.chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
}

#[must_use]
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn check_required_text(
    field: Field,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), RuleViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RuleViolation::RequiredField { field });
    }
    if has_control_chars(trimmed) {
        return Err(RuleViolation::ControlCharacters { field });
    }
    if is_valid_length(trimmed, min, max) {
        return Ok(());
    }
    if trimmed.chars().count() < min {
        Err(RuleViolation::TooShort { field, min })
    } else {
        Err(RuleViolation::TooLong { field, max })
    }
}

/// # Errors
///
/// `RequiredField` for blank titles, `TooShort`/`TooLong` outside [3, 100].
pub fn validate_title(title: &str) -> Result<(), RuleViolation> {
    check_required_text(Field::Title, title, TITLE_MIN, TITLE_MAX)
}

/// # Errors
///
/// `RequiredField` for blank descriptions, `TooShort`/`TooLong` outside
/// [10, 5000].
pub fn validate_description(description: &str) -> Result<(), RuleViolation> {
    check_required_text(
        Field::Description,
        description,
        DESCRIPTION_MIN,
        DESCRIPTION_MAX,
    )
}

/// # Errors
///
/// `Enum` when a priority is given and is not low, medium, or high.
pub fn validate_priority(priority: Option<&str>) -> Result<(), RuleViolation> {
    match priority {
        Some(p) if p.parse::<BugPriority>().is_err() => Err(RuleViolation::Enum {
            field: Field::Priority,
            value: p.to_string(),
            expected: BugPriority::EXPECTED,
        }),
        _ => Ok(()),
    }
}

/// # Errors
///
/// `Enum` when a status is given and is not open, in-progress, or resolved.
pub fn validate_status(status: Option<&str>) -> Result<(), RuleViolation> {
    match status {
        Some(s) if s.parse::<BugStatus>().is_err() => Err(RuleViolation::Enum {
            field: Field::Status,
            value: s.to_string(),
            expected: BugStatus::EXPECTED,
        }),
        _ => Ok(()),
    }
}

/// # Errors
///
/// `ControlCharacters` for NUL and similar, `TooLong` when the trimmed text
/// exceeds [`TEXT_MAX`].
pub fn validate_optional_text(field: Field, value: Option<&str>) -> Result<(), RuleViolation> {
    match value {
        Some(text) if has_control_chars(text) => Err(RuleViolation::ControlCharacters { field }),
        Some(text) if text.trim().chars().count() > TEXT_MAX => Err(RuleViolation::TooLong {
            field,
            max: TEXT_MAX,
        }),
        _ => Ok(()),
    }
}

/// Check a create body or an update patch against every rule.
///
/// Collects all violations rather than stopping at the first one.
#[must_use]
pub fn validate_bug_data(data: &BugInput, mode: Mode) -> ValidationReport {
    debug!(?mode, "validating bug data");
    let mut errors = Vec::new();

    if mode == Mode::Create || data.title.is_some() {
        let result = data
            .title_text()
            .map_or(
                Err(RuleViolation::RequiredField {
                    field: Field::Title,
                }),
                validate_title,
            );
        errors.extend(result.err());
    }

    if mode == Mode::Create || data.description.is_some() {
        let result = data.description_text().map_or(
            Err(RuleViolation::RequiredField {
                field: Field::Description,
            }),
            validate_description,
        );
        errors.extend(result.err());
    }

    errors.extend(validate_priority(data.priority.as_deref()).err());
    errors.extend(validate_status(data.status.as_deref()).err());

    let free_text = [
        (Field::StepsToReproduce, &data.steps_to_reproduce),
        (Field::ExpectedBehavior, &data.expected_behavior),
        (Field::ActualBehavior, &data.actual_behavior),
    ];
    for (field, value) in free_text {
        let text = value.as_ref().and_then(Option::as_deref);
        errors.extend(validate_optional_text(field, text).err());
    }

    let report = ValidationReport::from_errors(errors);
    debug!(
        is_valid = report.is_valid,
        errors = report.errors.len(),
        "bug data validated"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn create_input(title: &str, description: &str) -> BugInput {
        BugInput {
            title: Some(Some(title.into())),
            description: Some(Some(description.into())),
            ..BugInput::default()
        }
    }

    #[rstest]
    #[case(3)]
    #[case(50)]
    #[case(100)]
    fn title_lengths_in_bounds_pass(#[case] len: usize) {
        assert_eq!(validate_title(&"t".repeat(len)), Ok(()));
    }

    #[rstest]
    #[case(1, RuleViolation::TooShort { field: Field::Title, min: 3 })]
    #[case(2, RuleViolation::TooShort { field: Field::Title, min: 3 })]
    #[case(101, RuleViolation::TooLong { field: Field::Title, max: 100 })]
    fn title_lengths_out_of_bounds_fail(#[case] len: usize, #[case] expected: RuleViolation) {
        assert_eq!(validate_title(&"t".repeat(len)), Err(expected));
    }

    #[test]
    fn whitespace_title_is_required_error() {
        assert_eq!(
            validate_title("   \t"),
            Err(RuleViolation::RequiredField {
                field: Field::Title
            })
        );
    }

    #[test]
    fn title_is_measured_after_trimming() {
        assert!(validate_title("  ab  ").is_err());
        assert!(validate_title("  abc  ").is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(validate_title("ñüé").is_ok());
        assert!(is_valid_length("日本語", 3, 3));
    }

    #[rstest]
    #[case(9, false)]
    #[case(10, true)]
    #[case(5000, true)]
    #[case(5001, false)]
    fn description_bounds(#[case] len: usize, #[case] ok: bool) {
        assert_eq!(validate_description(&"d".repeat(len)).is_ok(), ok);
    }

    #[rstest]
    #[case("low")]
    #[case("medium")]
    #[case("high")]
    fn known_priorities_pass(#[case] value: &str) {
        assert_eq!(validate_priority(Some(value)), Ok(()));
    }

    #[test]
    fn critical_priority_is_rejected() {
        let err = validate_priority(Some("critical")).unwrap_err();
        assert_eq!(err.to_string(), "Priority must be either low, medium, or high");
    }

    #[rstest]
    #[case("open", true)]
    #[case("in-progress", true)]
    #[case("resolved", true)]
    #[case("closed", false)]
    #[case("in_progress", false)]
    fn status_membership(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_status(Some(value)).is_ok(), ok);
    }

    #[test]
    fn absent_enums_pass() {
        assert_eq!(validate_status(None), Ok(()));
        assert_eq!(validate_priority(None), Ok(()));
    }

    #[test]
    fn create_requires_title_and_description() {
        let report = validate_bug_data(&BugInput::default(), Mode::Create);
        assert!(!report.is_valid);
        assert_eq!(
            report.messages(),
            vec!["Title is required", "Description is required"]
        );
    }

    #[test]
    fn create_collects_every_violation() {
        let mut input = create_input("ab", "short");
        input.priority = Some("urgent".into());
        input.status = Some("closed".into());
        let report = validate_bug_data(&input, Mode::Create);
        assert_eq!(report.errors.len(), 4);
        assert_eq!(
            report.joined(),
            "Title must be at least 3 characters long, \
             Description must be at least 10 characters long, \
             Priority must be either low, medium, or high, \
             Status must be either open, in-progress, or resolved"
        );
    }

    #[test]
    fn valid_create_passes() {
        let report = validate_bug_data(
            &create_input("Login bug", "Cannot login with correct credentials"),
            Mode::Create,
        );
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn update_skips_absent_fields() {
        let patch = BugInput {
            status: Some("resolved".into()),
            ..BugInput::default()
        };
        assert!(validate_bug_data(&patch, Mode::Update).is_valid);
        assert!(validate_bug_data(&BugInput::default(), Mode::Update).is_valid);
    }

    #[test]
    fn update_rejects_present_but_invalid_fields() {
        let patch = BugInput {
            title: Some(Some("x".into())),
            ..BugInput::default()
        };
        let report = validate_bug_data(&patch, Mode::Update);
        assert_eq!(
            report.first_for(Field::Title),
            Some(&RuleViolation::TooShort {
                field: Field::Title,
                min: 3
            })
        );
        assert_eq!(report.first_for(Field::Description), None);
    }

    #[test]
    fn update_with_null_title_is_required_error() {
        let patch = BugInput {
            title: Some(None),
            ..BugInput::default()
        };
        let report = validate_bug_data(&patch, Mode::Update);
        assert_eq!(report.joined(), "Title is required");
    }

    #[test]
    fn oversized_free_text_is_rejected() {
        let mut input = create_input("Login bug", "Cannot login with correct credentials");
        input.actual_behavior = Some(Some("a".repeat(TEXT_MAX + 1)));
        let report = validate_bug_data(&input, Mode::Create);
        assert_eq!(report.joined(), "Actual behavior cannot exceed 5000 characters");
    }

    #[rstest]
    #[case("ab\0cdef")]
    #[case("Login\u{7}bug")]
    #[case("Crash \u{1b}[31m")]
    fn control_characters_in_title_are_rejected(#[case] title: &str) {
        assert_eq!(
            validate_title(title),
            Err(RuleViolation::ControlCharacters {
                field: Field::Title
            })
        );
    }

    #[test]
    fn line_breaks_and_tabs_are_allowed_in_description() {
        assert_eq!(
            validate_description("Line one\n\tLine two\r\nLine three"),
            Ok(())
        );
        let err = validate_description("0123456789\0abc").unwrap_err();
        assert_eq!(err.to_string(), "Description cannot contain control characters");
    }

    #[test]
    fn nul_in_free_text_is_rejected() {
        let mut input = create_input("Login bug", "Cannot login with correct credentials");
        input.steps_to_reproduce = Some(Some("click\0submit".into()));
        let report = validate_bug_data(&input, Mode::Create);
        assert_eq!(
            report.joined(),
            "Steps to reproduce cannot contain control characters"
        );
    }
}
