use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use guardian_api::{build_router, AppState};
use guardian_common::Config;
use guardian_core::{NewsOrchestrator, Session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting guardian-server");

    let config = Config::from_env();
    let news = NewsOrchestrator::from_config(&config);
    info!(
        ai_enabled = news.ai_enabled(),
        ai_probability = config.news_ai_probability,
        effect_multiplier = config.effect_multiplier,
        "News pipeline ready"
    );

    let addr = config.bind_addr();
    let app = build_router(
        AppState::new(Session::new(news), config.clone()),
        &config.allowed_origins,
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
