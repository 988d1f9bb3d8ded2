use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shipready::app_state::AppState;
use shipready::assessment_store::SledAssessmentStore;
use shipready::attempt_store::SledAttemptStore;
use shipready::config_loader::load_config;
use shipready::oracle::HttpScoringOracle;
use shipready::web::build_router;

#[derive(Parser, Debug)]
#[command(name = "shipready", about = "Debugging-skills assessment service")]
struct Cli {
    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,
    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let mut config = load_config()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let db = sled::open(&config.data_dir)?;
    let attempts = SledAttemptStore::new(&db)?;
    let assessments = SledAssessmentStore::new(&db)?;
    let oracle = Arc::new(HttpScoringOracle::new(&config.oracle)?);

    if config.oracle.api_key.is_none() {
        tracing::warn!("no oracle API key configured; submissions will fail to score");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, attempts, assessments, oracle);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
