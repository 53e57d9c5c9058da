//! ebm-wz (Assessment Wizard) - Main entry point
//!
//! Guides one user through the assessment in the terminal, autosaving
//! drafts locally and submitting the completed protocol to ebm-sv.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ebm_common::config;
use ebm_common::domain::UserId;
use ebm_wz::{FileDraftStore, HttpSubmissionRepository, Identity, Wizard};

/// Command-line arguments for ebm-wz
#[derive(Parser, Debug)]
#[command(name = "ebm-wz")]
#[command(about = "Interactive assessment wizard for the EBM suite")]
#[command(version)]
struct Args {
    /// Submissions server URL (falls back to the config file, then the
    /// default local server)
    #[arg(short, long, env = "EBM_SERVER_URL")]
    server_url: Option<String>,

    /// Root folder holding local drafts
    #[arg(short, long, env = "EBM_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Your email address
    #[arg(long, env = "EBM_USER")]
    user: String,

    /// Your display name
    #[arg(long, env = "EBM_NAME")]
    name: String,

    /// Company identifier, e.g. acme-corp
    #[arg(long, env = "EBM_COMPANY")]
    company: String,

    /// Company display name
    #[arg(long)]
    company_name: Option<String>,

    /// Sprint number label
    #[arg(long)]
    sprint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting EBM Assessment Wizard (ebm-wz) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let user_id = UserId::new(&args.user).context("--user must be an email address")?;

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "EBM_ROOT_FOLDER");
    config::ensure_root_folder(&root_folder)?;
    info!("Drafts folder: {}", root_folder.join(config::DRAFTS_DIR).display());

    let server_url = args
        .server_url
        .or_else(|| config::load_config_file().ok().and_then(|c| c.server_url))
        .unwrap_or_else(|| "http://127.0.0.1:5760".to_string());
    info!("Submissions server: {}", server_url);

    let store = Arc::new(FileDraftStore::new(&root_folder));
    let repo = HttpSubmissionRepository::new(server_url);

    let identity = Identity {
        user_id: user_id.as_str().to_string(),
        user_name: args.name,
        company_id: args.company,
        company_name: args.company_name,
        sprint_number: args.sprint,
    };

    let mut wizard = Wizard::new(store, repo, identity);
    match wizard.run().await {
        Ok(Some(id)) => {
            info!("Assessment submitted as {}", id);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e).context("Wizard session failed"),
    }
}
