use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::table::TableOptions;

#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Decide color and width once per process from the terminal and flags.
pub fn init(flags: &GlobalFlags) {
    let color = std::io::stdout().is_terminal()
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs { color, term_width });
}

/// Current preferences; plain and unbounded until [`init`] runs.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[must_use]
pub fn table_options() -> TableOptions {
    let prefs = prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.color,
    }
}
