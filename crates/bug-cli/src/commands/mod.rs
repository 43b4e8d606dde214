use crate::api::BugApi;
use crate::board::BugBoard;
use crate::cli::{Commands, GlobalFlags};

pub mod bug;
pub mod health;

/// Run a parsed command against `api` and return the text to print.
///
/// `confirm` is asked before a delete unless `--yes` was given.
pub async fn dispatch<A: BugApi>(
    command: Commands,
    api: A,
    flags: &GlobalFlags,
    confirm: impl FnOnce() -> bool,
) -> anyhow::Result<String> {
    let mut board = BugBoard::new(api);
    match command {
        Commands::List => bug::list(&mut board, flags).await,
        Commands::Get { id } => bug::get(board.api(), &id, flags).await,
        Commands::Create(args) => bug::create(&mut board, &args, flags).await,
        Commands::Edit(args) => bug::edit(&mut board, &args, flags).await,
        Commands::Advance { id } => bug::advance(&mut board, &id, flags).await,
        Commands::Resolve { id } => bug::resolve(&mut board, &id, flags).await,
        Commands::Delete { id, yes } => {
            bug::delete(&mut board, &id, || yes || confirm(), flags).await
        }
        Commands::Health => health::run(board.api(), flags).await,
    }
}
