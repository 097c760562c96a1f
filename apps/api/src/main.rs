mod config;
mod db;
mod errors;
mod ingest;
mod insights;
mod listings;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(about = "Job listings dashboard API and CSV loader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard API server.
    Serve,
    /// Replace the listings store with the contents of a CSV export.
    Load {
        /// Path to the CSV file to load.
        csv_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Load { csv_path } => load(&config, &csv_path).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting JobDash API v{}", env!("CARGO_PKG_VERSION"));

    // The server only ever reads; writes happen through `load`.
    let db = db::create_read_pool(&config.database_url).await?;

    let state = AppState { db };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn load(config: &Config, csv_path: &Path) -> Result<()> {
    info!(
        "Loading '{}' into {}",
        csv_path.display(),
        config.database_url
    );

    let table = ingest::csv_source::read_csv_table(csv_path)?;
    let pool = db::create_write_pool(&config.database_url).await?;

    // The store file stays locked until the pool is closed, even on failure.
    let result = ingest::loader::replace_jobs_table(&pool, &table).await;
    pool.close().await;
    let summary = result?;

    println!(
        "Loaded {} rows ({} columns) into table '{}' at {}",
        summary.rows, summary.columns, summary.table, summary.loaded_at
    );
    Ok(())
}
