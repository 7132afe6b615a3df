//! Category API endpoints
//!
//! - GET /api/v1/categories - Categories with approved-entry counts

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::models::CategoryListing;

/// Build the categories router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// GET /api/v1/categories - Categories in filter-bar order plus the overall total
async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoryListing>, ApiError> {
    let listing = state.category_service.list().await?;
    Ok(Json(listing))
}
