use std::sync::Arc;

use clap::Parser;
use lexis_config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod state;

use self::cli::Cli;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::new();
    tracing::debug!("Using database {}", config.dictionary.db_path.display());

    let state = Arc::new(AppState::new(config)?);
    let output = commands::run(state, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Log to stderr so stdout stays clean JSON; `RUST_LOG` overrides the `info` default
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
