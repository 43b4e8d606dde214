use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use bug_config::BugConfig;
use bug_db::service::BugService;
use bug_server::AppState;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("bug-server error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = BugConfig::load_with_dotenv().context("failed to load configuration")?;
    init_tracing(&config.log.level)?;

    info!(url = %config.database.url, "opening database");
    let service = BugService::from_config(&config.database)
        .await
        .context("failed to open bug database")?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    bug_server::serve(listener, AppState::new(service), bug_server::shutdown_signal()).await?;
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BUGTRACKER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
