use anyhow::Context;
use clap::Parser;

use bug_cli::BugClient;
use bug_cli::cli::Cli;
use bug_cli::commands::{self, bug::confirm_on_stdin};
use bug_config::BugConfig;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("bugs error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    bug_cli::ui::init(&flags);

    let server_url = match flags.server.clone() {
        Some(url) => url,
        None => {
            BugConfig::load_with_dotenv()
                .context("failed to load configuration")?
                .client
                .server_url
        }
    };
    tracing::debug!(%server_url, "using bug tracker API");

    let client = BugClient::new(&server_url)?;
    let output = commands::dispatch(cli.command, client, &flags, confirm_on_stdin).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("BUGTRACKER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
