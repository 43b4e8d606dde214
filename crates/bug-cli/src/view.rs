//! Text rendering of the board, bug records and form errors.

use bug_core::entities::Bug;
use bug_core::enums::{BugPriority, BugStatus};
use bug_core::responses::{HealthResponse, MessageResponse};

use crate::api::BugApi;
use crate::board::{BugBoard, ListState};
use crate::form::BugForm;
use crate::output::Tabular;
use crate::output::table::{Cell, TableOptions, Tone, paint, render_table};

pub const LOADING_TEXT: &str = "Loading bugs...";
pub const EMPTY_TITLE: &str = "No bugs reported yet";
pub const EMPTY_HINT: &str = "Be the first to report a bug!";

const LIST_HEADERS: [&str; 6] = ["ID", "TITLE", "STATUS", "PRIORITY", "REPORTED BY", "CREATED"];

#[must_use]
pub const fn status_tone(status: BugStatus) -> Tone {
    match status {
        BugStatus::Open => Tone::Blue,
        BugStatus::InProgress => Tone::Yellow,
        BugStatus::Resolved => Tone::Green,
    }
}

#[must_use]
pub const fn priority_tone(priority: BugPriority) -> Tone {
    match priority {
        BugPriority::Low => Tone::Green,
        BugPriority::Medium => Tone::Yellow,
        BugPriority::High => Tone::Red,
    }
}

fn timestamp(bug_time: &chrono::DateTime<chrono::Utc>) -> String {
    bug_time.format("%Y-%m-%d %H:%M").to_string()
}

/// The list as a table, or the empty-state text.
#[must_use]
pub fn render_bugs(bugs: &[Bug], options: TableOptions) -> String {
    if bugs.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}");
    }
    let rows = bugs
        .iter()
        .map(|bug| {
            vec![
                Cell::plain(&bug.id),
                Cell::plain(&bug.title),
                Cell::badge(bug.status.as_str(), status_tone(bug.status)),
                Cell::badge(bug.priority.as_str(), priority_tone(bug.priority)),
                Cell::plain(&bug.reported_by),
                Cell::plain(timestamp(&bug.created_at)),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&LIST_HEADERS, &rows, options)
}

/// One record as a field/value table. Absent optional text is skipped.
#[must_use]
pub fn render_bug(bug: &Bug, options: TableOptions) -> String {
    let mut rows = vec![
        vec![Cell::plain("id"), Cell::plain(&bug.id)],
        vec![Cell::plain("title"), Cell::plain(&bug.title)],
        vec![Cell::plain("description"), Cell::plain(&bug.description)],
        vec![
            Cell::plain("status"),
            Cell::badge(bug.status.as_str(), status_tone(bug.status)),
        ],
        vec![
            Cell::plain("priority"),
            Cell::badge(bug.priority.as_str(), priority_tone(bug.priority)),
        ],
        vec![Cell::plain("reported by"), Cell::plain(&bug.reported_by)],
    ];
    let optional = [
        ("steps to reproduce", &bug.steps_to_reproduce),
        ("expected behavior", &bug.expected_behavior),
        ("actual behavior", &bug.actual_behavior),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            rows.push(vec![Cell::plain(label), Cell::plain(value)]);
        }
    }
    rows.push(vec![Cell::plain("created"), Cell::plain(timestamp(&bug.created_at))]);
    rows.push(vec![Cell::plain("updated"), Cell::plain(timestamp(&bug.updated_at))]);
    render_table(&["FIELD", "VALUE"], &rows, options)
}

/// Banner (if any) above the list or its loading/empty state.
#[must_use]
pub fn render_board<A: BugApi>(board: &BugBoard<A>, options: TableOptions) -> String {
    let body = match board.state() {
        ListState::Loading => LOADING_TEXT.to_string(),
        ListState::Loaded(bugs) => render_bugs(bugs, options),
    };
    match board.banner() {
        Some(banner) => format!("{}\n\n{body}", paint(banner, Tone::Red, options.color)),
        None => body,
    }
}

/// One line per invalid field.
#[must_use]
pub fn render_form_errors(form: &BugForm) -> String {
    form.errors()
        .iter()
        .map(|(_, message)| format!("- {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Tabular for Bug {
    fn to_table(&self, options: TableOptions) -> String {
        render_bug(self, options)
    }
}

impl Tabular for Vec<Bug> {
    fn to_table(&self, options: TableOptions) -> String {
        render_bugs(self, options)
    }
}

impl Tabular for MessageResponse {
    fn to_table(&self, _options: TableOptions) -> String {
        self.message.clone()
    }
}

impl Tabular for HealthResponse {
    fn to_table(&self, _options: TableOptions) -> String {
        format!("{}: {} ({})", self.status, self.message, self.timestamp)
    }
}
