//! op-monitor - command-line client for the production-order activity tracker
//!
//! ## Commands
//!
//! - `login <login>` / `logout` / `whoami` - Session management
//! - `projects|squads|activities|users list|show|create|update|delete`
//! - `projects activities <id>`, `squads projects|activities <id>`
//! - `activities stats` - Counts by status and priority
//! - `dashboard` - Completion indicators per squad and activity type
//!
//! ## Environment
//!
//! - `OP_MONITOR_API_URL` - Backend base URL (default `http://localhost:5000/api`)
//! - `OP_MONITOR_SESSION_FILE` - Where the token and profile are kept
//! - `OP_MONITOR_TIMEOUT_SECS`, `OP_MONITOR_PER_PAGE`, `OP_MONITOR_DASHBOARD_SQUADS`
//! - `RUST_LOG` - Log filter (default `op_monitor=warn`)

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use op_monitor::cli::{self, Cli, Context, Reported};
use op_monitor::config::{AppState, Config};
use op_monitor::notify::ConsoleNotifier;
use op_monitor::session::{FileStorage, Session};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays parseable for --format json|yaml
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "op_monitor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<Reported>().is_none() {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "Configuration loaded");

    let storage = FileStorage::open(config.session_file.clone())
        .with_context(|| format!("Failed to open session file {}", config.session_file.display()))?;
    let session = Arc::new(Session::hydrate(Arc::new(storage)));
    let state = AppState::new(config, session)?;

    let ctx = Context {
        state,
        notifier: Arc::new(ConsoleNotifier),
        format: cli.format,
    };
    cli::run(cli.command, &ctx).await
}
