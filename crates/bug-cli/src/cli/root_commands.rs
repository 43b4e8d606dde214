use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List every bug, newest first.
    List,
    /// Show one bug.
    Get { id: String },
    /// Report a new bug.
    Create(CreateArgs),
    /// Edit an existing bug. Only the given fields change.
    Edit(EditArgs),
    /// Move a bug to the next status (open, in-progress, resolved).
    Advance { id: String },
    /// Mark a bug resolved.
    Resolve { id: String },
    /// Delete a bug.
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check that the API is up.
    Health,
}

#[derive(Clone, Debug, Default, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium, or high
    #[arg(long)]
    pub priority: Option<String>,
    /// open, in-progress, or resolved
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub reported_by: Option<String>,
    #[arg(long)]
    pub steps: Option<String>,
    #[arg(long)]
    pub expected: Option<String>,
    #[arg(long)]
    pub actual: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[command(flatten)]
    pub fields: CreateArgs,
}
