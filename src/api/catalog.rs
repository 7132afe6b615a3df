//! Catalog API endpoints
//!
//! Handles browsing the approved catalog:
//! - GET /api/v1/catalog - All three collections after the view layer
//! - GET /api/v1/catalog/{kind} - One collection after the view layer
//!
//! Both accept `category`, `sort` and `view` query parameters.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::common::{parse_kind, ViewQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::models::Entry;
use crate::services::{DisplaySource, ViewHints};

/// Response for the full catalog
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub tools: Vec<Entry>,
    pub repositories: Vec<Entry>,
    pub models: Vec<Entry>,
    pub total: usize,
    pub view: ViewHints,
}

/// Response for one collection
#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub items: Vec<Entry>,
    pub view: ViewHints,
}

/// Build the catalog router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog))
        .route("/{kind}", get(get_collection))
}

/// GET /api/v1/catalog
async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let options = query.resolve(&state).await?;
    let catalog = state.catalog_service.list_catalog().await?;
    let result = DisplaySource::Catalog(catalog).render(&options);

    Ok(Json(CatalogResponse {
        tools: result.tools,
        repositories: result.repositories,
        models: result.models,
        total: result.total,
        view: options.hints(),
    }))
}

/// GET /api/v1/catalog/{kind}
async fn get_collection(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let options = query.resolve(&state).await?;
    let entries = state.catalog_service.list_approved(kind).await?;

    Ok(Json(CollectionResponse {
        items: options.apply_to(kind, entries),
        view: options.hints(),
    }))
}
