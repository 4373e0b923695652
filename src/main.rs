use anyhow::Context;
use tracing_subscriber::EnvFilter;

use occam_recs::{
    api::{create_router, AppState},
    config::Config,
    services::pipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("occam_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Build the full similarity matrix before accepting queries
    let recommender = pipeline::build_from_files(&config).with_context(|| {
        format!(
            "Failed to build recommendations from {} and {}",
            config.titles_path, config.credits_path
        )
    })?;

    let state = AppState::new(recommender, config.default_recommendations);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
