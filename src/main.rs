//! Cropwise server binary

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cropwise::{config, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cropwise=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Cropwise server starting...");
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Label encoder: {}", config.encoder_path.display());

    let state = AppState::load(config.clone());
    if !state.engine.is_ready() {
        tracing::warn!("Serving without a model; recommendations will return 503");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
