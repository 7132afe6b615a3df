//! AI Directory - A catalog of AI tools, repositories and models

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_directory::{
    api::{self, AppState},
    cache::create_cache,
    config::Config,
    db,
    services::{HttpTextGenerator, TextGenerator},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_directory=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AI Directory...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    let applied = db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed ({} applied)", applied);

    // Initialize cache
    let cache = create_cache(&config.cache);
    tracing::info!("Cache initialized");

    // Text generation for query interpretation
    let generator: Arc<dyn TextGenerator> = Arc::new(HttpTextGenerator::new(&config.llm)?);
    tracing::info!(
        "Text generation via {} at {} ({})",
        config.llm.provider,
        config.llm.base_url,
        config.llm.model
    );

    if config.auth.secret().is_none() {
        tracing::warn!("No auth provider secret configured; sign-ins will be refused");
    }

    // Build application state
    let state = AppState::new(pool, cache, generator, &config);

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
