use crate::api::BugApi;
use crate::cli::GlobalFlags;
use crate::output::render;

/// Handle `bugs health`.
pub async fn run<A: BugApi>(api: &A, flags: &GlobalFlags) -> anyhow::Result<String> {
    let health = api.health().await?;
    render(&health, flags.format)
}
