use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

pub use table::TableOptions;

/// Values with a human-readable table form.
pub trait Tabular {
    fn to_table(&self, options: TableOptions) -> String;
}

/// Render a response in the requested format.
pub fn render<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(value.to_table(ui::table_options())),
    }
}
