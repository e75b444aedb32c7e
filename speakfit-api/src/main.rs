//! speakfit-api - SpeakFit speech-practice backend
//!
//! Serves the practice-session and recording-intake API and talks to the
//! external speech-analysis engine.

use anyhow::Result;
use clap::Parser;
use speakfit_api::analysis::AnalysisClient;
use speakfit_api::{build_router, AppState};
use speakfit_common::config;
use speakfit_common::db::init_database;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "speakfit-api", about = "SpeakFit speech-practice backend")]
struct Cli {
    /// Root data folder (database and staged uploads)
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification first: instant startup feedback before any I/O
    info!(
        "Starting SpeakFit API (speakfit-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();
    let toml_config = config::load_toml_config()?;

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref(), &toml_config);
    std::fs::create_dir_all(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    let pool = init_database(&db_path).await?;
    info!("Database ready: {}", db_path.display());

    let analysis_config = config::resolve_analysis_config(&toml_config)?;
    info!(
        "Analysis engine: {} (timeout {}s)",
        analysis_config.base_url,
        analysis_config.timeout.as_secs()
    );
    let analyzer = AnalysisClient::new(&analysis_config)
        .map_err(|e| anyhow::anyhow!("Failed to build analysis client: {}", e))?;

    let state = AppState::new(pool, Arc::new(analyzer), config::uploads_dir(&root_folder));
    let app = build_router(state);

    let bind_addr = config::resolve_bind_addr(cli.port, &toml_config);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("speakfit-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
