//! API middleware
//!
//! Contains:
//! - `AppState`, the services shared by every handler
//! - `ApiError`, the JSON error body and its status mapping
//! - `require_session`, which admits only requests carrying the current
//!   session token as a bearer token

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::Cache;
use crate::config::Config;
use crate::db::repositories::{SqlxCatalogRepository, SqlxCategoryRepository};
use crate::db::DynDatabasePool;
use crate::models::SessionUser;
use crate::services::{
    CatalogService, CatalogServiceError, CategoryService, CategoryServiceError, QueryInterpreter,
    RecentSearches, SearchService, SessionState, TextGenerator,
};
use crate::services::session::tokens_match;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub catalog_service: Arc<CatalogService>,
    pub category_service: Arc<CategoryService>,
    pub search_service: Arc<SearchService>,
    pub session: Arc<SessionState>,
    /// Bearer token the auth provider pushes session state with
    pub provider_secret: Option<Arc<str>>,
}

impl AppState {
    /// Wire every service from a pool, a cache and a text generator
    pub fn new(
        pool: DynDatabasePool,
        cache: Arc<Cache>,
        generator: Arc<dyn TextGenerator>,
        config: &Config,
    ) -> Self {
        let catalog_repo = SqlxCatalogRepository::boxed(pool.clone());
        let category_repo = SqlxCategoryRepository::boxed(pool.clone());

        let catalog_service = Arc::new(CatalogService::new(
            catalog_repo,
            category_repo.clone(),
            cache.clone(),
            config.search.effective_limit(),
        ));
        let category_service = Arc::new(CategoryService::new(category_repo, cache));
        let search_service = Arc::new(SearchService::new(
            QueryInterpreter::from_config(generator, &config.llm),
            catalog_service.clone(),
            Arc::new(RecentSearches::seeded(
                config.search.effective_recent_capacity(),
            )),
        ));

        Self {
            pool,
            catalog_service,
            category_service,
            search_service,
            session: Arc::new(SessionState::new()),
            provider_secret: config.auth.secret().map(Arc::from),
        }
    }

    /// Whether the request carries the auth provider's secret
    pub fn is_provider(&self, headers: &HeaderMap) -> bool {
        match (self.provider_secret.as_deref(), bearer_token(headers)) {
            (Some(secret), Some(presented)) => tokens_match(secret, presented),
            _ => false,
        }
    }

    /// The signed-in user when the request carries the current session token
    pub fn session_user(&self, headers: &HeaderMap) -> Option<SessionUser> {
        bearer_token(headers).and_then(|token| self.session.authenticate(token))
    }
}

/// Extract a bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Signed-in user extracted from the session state
#[derive(Debug, Clone)]
pub struct SignedInUser(pub SessionUser);

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<CatalogServiceError> for ApiError {
    fn from(e: CatalogServiceError) -> Self {
        match e {
            CatalogServiceError::NotFound(what) => ApiError::not_found(format!("Entry not found: {}", what)),
            CatalogServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            CatalogServiceError::InternalError(e) => {
                tracing::error!("Catalog error: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(e: CategoryServiceError) -> Self {
        match e {
            CategoryServiceError::InternalError(e) => {
                tracing::error!("Category error: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

/// Session middleware: the request must present the current session token
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if bearer_token(request.headers()).is_none() {
        return Err(ApiError::unauthorized("Missing session token"));
    }
    let user = state
        .session_user(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired session"))?;

    request.extensions_mut().insert(SignedInUser(user));
    Ok(next.run(request).await)
}
