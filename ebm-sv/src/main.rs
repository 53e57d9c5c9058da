//! ebm-sv (Submissions Server) - Main entry point
//!
//! Receives completed assessments from the wizard, stores them in SQLite,
//! and serves the per-company and team-comparison aggregate views.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ebm_common::config;
use ebm_sv::{build_router, AppState};

/// Command-line arguments for ebm-sv
#[derive(Parser, Debug)]
#[command(name = "ebm-sv")]
#[command(about = "Submissions server for the EBM assessment suite")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5760", env = "EBM_SV_PORT")]
    port: u16,

    /// Root folder holding the database
    #[arg(short, long, env = "EBM_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting EBM Submissions Server (ebm-sv) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "EBM_ROOT_FOLDER");
    let db_path = config::ensure_root_folder(&root_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = ebm_common::db::init_database(&db_path).await?;
    info!("Connected to database");

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("ebm-sv listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
