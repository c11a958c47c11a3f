//! AWS CLI generator: HTTP server turning natural-language requests into
//! AWS CLI commands with an explanation and a risk assessment.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use acg_api::config::{AppConfig, DEFAULT_CONFIG_PATH};
use acg_api::routes::build_router;
use acg_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // JSON logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "acg-api starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ACG_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = AppConfig::load(&config_path)?;
    tracing::info!(
        path = %config_path,
        default_region = %config.default_region,
        classifier_enabled = config.classifier.enabled,
        "config loaded"
    );

    let state = AppState::from_config(&config);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("acg-api stopped");
    Ok(())
}
