//! Common API utilities and shared types
//!
//! This module contains the view parameters shared by the catalog and
//! search endpoints, and the path parsing they both need.

use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::ContentKind;
use crate::services::{CategoryFilter, SortKey, ViewMode, ViewOptions};

// ============================================================================
// View Query Types
// ============================================================================

/// Category, sort and presentation picked by the client
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Selected category id; absent means all categories
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
}

impl ViewQuery {
    /// Resolve into view options. Categories are only loaded when one is selected.
    pub async fn resolve(&self, state: &AppState) -> Result<ViewOptions, ApiError> {
        let category = match self.category {
            None => CategoryFilter::All,
            Some(id) => {
                let listing = state.category_service.list().await?;
                CategoryFilter::resolve(Some(id), &listing)
            }
        };

        Ok(ViewOptions {
            category,
            sort: SortKey::from_param(self.sort.as_deref()),
            mode: ViewMode::from_param(self.view.as_deref()),
        })
    }
}

// ============================================================================
// Path Helpers
// ============================================================================

/// Parse a `{kind}` path segment; unknown collections are a 404
pub fn parse_kind(kind: &str) -> Result<ContentKind, ApiError> {
    ContentKind::from_str(kind)
        .ok_or_else(|| ApiError::not_found(format!("Unknown collection: {}", kind)))
}
