//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints of the directory:
//! - Category endpoints
//! - Catalog browsing endpoints
//! - Search and recent-search endpoints
//! - Session endpoints fed by the auth provider
//! - Submission and moderation endpoints (signed-in only)

pub mod admin;
pub mod catalog;
pub mod categories;
pub mod common;
pub mod middleware;
pub mod search;
pub mod session;
pub mod submissions;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, SignedInUser};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Routes that need a signed-in session
    let protected_routes = Router::new()
        .route("/submissions/{kind}", post(submissions::create_submission))
        .route(
            "/admin/entries/{kind}/{id}/status",
            put(admin::update_entry_status),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_session,
        ));

    // Public routes
    Router::new()
        .nest("/categories", categories::router())
        .nest("/catalog", catalog::router())
        .nest("/search", search::router())
        .nest("/session", session::router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => tracing::warn!("Ignoring invalid CORS origin {:?}: {}", cors_origin, e),
    }

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::cache::create_cache;
    use crate::config::Config;
    use crate::db::repositories::catalog::tests::{model_record, repository_record, tool_record};
    use crate::db::repositories::{CatalogRepository, SqlxCatalogRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::{AuthState, EntryStatus, SessionUser};
    use crate::services::interpreter::testing::MockGenerator;
    use axum_test::TestServer;
    use std::sync::Arc;

    pub(crate) const PROVIDER_SECRET: &str = "test-provider-secret";

    /// State over a migrated in-memory store holding a small catalog:
    /// two tools, two repositories, two approved models and one pending model.
    pub(crate) async fn seeded_state(generator: Arc<MockGenerator>) -> AppState {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let repo = SqlxCatalogRepository::new(pool.clone());
        for record in [
            tool_record("text-analyzer", "machine learning text analysis suite", 4.5, 20),
            tool_record("image-tagger", "automatic image labelling", 3.9, 45),
            repository_record("ml-text", 1200, 4.1),
            repository_record("detector", 300, 4.6),
            model_record("bert-base", 4.7, 5000),
            model_record("distilbert", 4.2, 900),
        ] {
            repo.create(&record).await.expect("Failed to seed entry");
        }
        let mut hidden = model_record("hidden-model", 5.0, 1);
        hidden.status = EntryStatus::Pending;
        repo.create(&hidden).await.expect("Failed to seed entry");

        let mut config = Config::default();
        config.auth.provider_secret = Some(PROVIDER_SECRET.to_string());
        AppState::new(pool, create_cache(&config.cache), generator, &config)
    }

    pub(crate) fn test_server(state: AppState) -> TestServer {
        TestServer::new(build_router(state, "http://localhost:3000"))
            .expect("Failed to start test server")
    }

    /// Sign in as `user-42` and return the session token
    pub(crate) fn sign_in(state: &AppState) -> String {
        state
            .session
            .publish(AuthState::signed_in(SessionUser {
                id: "user-42".to_string(),
                email: "ada@example.com".to_string(),
                display_name: String::new(),
                avatar_url: None,
            }))
            .expect("A signed-in state issues a token")
    }

    pub(crate) fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("Valid header value")
    }

    pub(crate) fn provider_bearer() -> HeaderValue {
        bearer(PROVIDER_SECRET)
    }
}
