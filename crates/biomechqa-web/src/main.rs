//! Biomechanics QA Web Server
//!
//! Run with: cargo run -p biomechqa-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use biomechqa_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting biomechanics QA server...");

    let config = Config::load()?;
    info!(
        python = %config.runner.python.display(),
        script = %config.runner.script.display(),
        corpus_root = %config.runner.corpus_root.display(),
        timeout_secs = config.runner.timeout_secs,
        "QA script configured"
    );

    // Create app state
    let state = biomechqa_web::state::AppState::from_config(&config);

    // Build router
    let app = biomechqa_web::router::build_router(state, &config.redirects, &config.server.static_dir);

    // Bind to port
    let addr: SocketAddr = config.server.bind.parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
