mod config;
mod error;
mod handlers;
mod metrics;
mod routes;
mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use atrium_ai::GeminiClient;
use atrium_payments::RazorpayClient;
use atrium_store_sqlite::SqliteStore;

use config::ServerConfig;
use routes::build_router;
use state::AppState;

// ────────────────────────────────────── CLI Types ──────────────────────────────────────

#[derive(Parser)]
#[command(name = "atrium-server")]
#[command(about = "Atrium REST server for academic collaboration groups")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db); defaults to ~/.atrium/store.db
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Listen address
        #[arg(long, default_value = "0.0.0.0:8080", env = "ATRIUM_LISTEN_ADDR")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr } => serve(cli.database_url, addr).await,
    }
}

async fn serve(database_url: Option<String>, addr: String) -> anyhow::Result<()> {
    // Missing upstream credentials halt startup; a half-configured
    // server would fail every AI and payment request at runtime.
    let config = ServerConfig::from_env()?;

    let store = match database_url {
        Some(url) => SqliteStore::open(&url).await?,
        None => SqliteStore::open_default().await?,
    };

    let metrics_handle = metrics::init_metrics();

    let state = AppState {
        store: Arc::new(store),
        text: Arc::new(GeminiClient::new(config.ai)),
        payments: Arc::new(RazorpayClient::new(config.payments)),
        metrics: metrics_handle,
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "atrium-server listening");
    axum::serve(listener, router).await?;

    Ok(())
}
