use std::io::Write;

use anyhow::{anyhow, bail};

use bug_core::errors::Field;

use crate::api::BugApi;
use crate::board::BugBoard;
use crate::cli::{CreateArgs, EditArgs, GlobalFlags, OutputFormat};
use crate::form::{BugForm, SubmitOutcome};
use crate::output::render;
use crate::{ui, view};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this bug? [y/N] ";
pub const DELETE_CANCELLED: &str = "Delete cancelled";

/// Ask on stderr/stdin; only `y` or `yes` confirms.
pub fn confirm_on_stdin() -> bool {
    eprint!("{DELETE_PROMPT}");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn failure<A: BugApi>(board: &BugBoard<A>, fallback: &str) -> anyhow::Error {
    anyhow!("{}", board.banner().unwrap_or(fallback))
}

fn fill(form: &mut BugForm, args: &CreateArgs) {
    let fields = [
        (Field::Title, &args.title),
        (Field::Description, &args.description),
        (Field::Priority, &args.priority),
        (Field::Status, &args.status),
        (Field::ReportedBy, &args.reported_by),
        (Field::StepsToReproduce, &args.steps),
        (Field::ExpectedBehavior, &args.expected),
        (Field::ActualBehavior, &args.actual),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set_field(field, value.as_str());
        }
    }
}

async fn submit<A: BugApi>(board: &mut BugBoard<A>, flags: &GlobalFlags) -> anyhow::Result<String> {
    match board.submit_form().await {
        Some(SubmitOutcome::Created(bug) | SubmitOutcome::Updated(bug)) => {
            render(&bug, flags.format)
        }
        Some(SubmitOutcome::Invalid) => {
            let errors = board.form().map(view::render_form_errors).unwrap_or_default();
            bail!("Invalid bug:\n{errors}")
        }
        None => Err(failure(board, "No bug form is open")),
    }
}

/// Render `id` from the loaded list, fetching it if it is not there.
async fn show<A: BugApi>(board: &BugBoard<A>, id: &str, flags: &GlobalFlags) -> anyhow::Result<String> {
    let loaded = board
        .bugs()
        .iter()
        .find(|b| b.id.eq_ignore_ascii_case(id))
        .cloned();
    let bug = match loaded {
        Some(bug) => bug,
        None => board.api().get(id).await?,
    };
    render(&bug, flags.format)
}

/// Handle `bugs list`.
pub async fn list<A: BugApi>(board: &mut BugBoard<A>, flags: &GlobalFlags) -> anyhow::Result<String> {
    board.reload().await;
    if let Some(banner) = board.banner() {
        bail!("{banner}");
    }
    match flags.format {
        OutputFormat::Json => render(&board.bugs().to_vec(), flags.format),
        OutputFormat::Table => Ok(view::render_board(board, ui::table_options())),
    }
}

/// Handle `bugs get`.
pub async fn get<A: BugApi>(api: &A, id: &str, flags: &GlobalFlags) -> anyhow::Result<String> {
    let bug = api.get(id).await?;
    render(&bug, flags.format)
}

/// Handle `bugs create`.
pub async fn create<A: BugApi>(
    board: &mut BugBoard<A>,
    args: &CreateArgs,
    flags: &GlobalFlags,
) -> anyhow::Result<String> {
    fill(board.open_new_form(), args);
    submit(board, flags).await
}

/// Handle `bugs edit`.
pub async fn edit<A: BugApi>(
    board: &mut BugBoard<A>,
    args: &EditArgs,
    flags: &GlobalFlags,
) -> anyhow::Result<String> {
    board.reload().await;
    if let Some(banner) = board.banner() {
        bail!("{banner}");
    }
    let Some(form) = board.open_edit_form(&args.id) else {
        bail!("Bug not found");
    };
    fill(form, &args.fields);
    submit(board, flags).await
}

/// Handle `bugs advance`.
pub async fn advance<A: BugApi>(
    board: &mut BugBoard<A>,
    id: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<String> {
    if !board.advance(id).await {
        return Err(failure(board, "Could not advance bug"));
    }
    show(board, id, flags).await
}

/// Handle `bugs resolve`.
pub async fn resolve<A: BugApi>(
    board: &mut BugBoard<A>,
    id: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<String> {
    if !board.resolve(id).await {
        return Err(failure(board, "Could not resolve bug"));
    }
    show(board, id, flags).await
}

/// Handle `bugs delete`. A declined prompt is not an error.
pub async fn delete<A: BugApi>(
    board: &mut BugBoard<A>,
    id: &str,
    confirm: impl FnOnce() -> bool,
    flags: &GlobalFlags,
) -> anyhow::Result<String> {
    match board.delete(id, confirm).await {
        Some(response) => render(&response, flags.format),
        None => match board.banner() {
            Some(banner) => bail!("{banner}"),
            None => Ok(DELETE_CANCELLED.to_string()),
        },
    }
}
