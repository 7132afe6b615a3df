//! Category service
//!
//! Serves the category list with approved-entry counts, cached. The catalog
//! service invalidates the cached list whenever moderation changes counts.

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::CategoryRepository;
use crate::models::CategoryListing;
use anyhow::Context;
use std::sync::Arc;

/// Cache key for the category listing
pub(crate) const CACHE_KEY_CATEGORY_LIST: &str = "category:list";

/// Error types for category service operations
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Category service
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    cache: Arc<Cache>,
}

impl CategoryService {
    /// Create a new category service
    pub fn new(repo: Arc<dyn CategoryRepository>, cache: Arc<Cache>) -> Self {
        Self { repo, cache }
    }

    /// Categories ordered by `sort_order`, with counts and their total
    pub async fn list(&self) -> Result<CategoryListing, CategoryServiceError> {
        if let Some(listing) = self
            .cache
            .get::<CategoryListing>(CACHE_KEY_CATEGORY_LIST)
            .await
            .ok()
            .flatten()
        {
            return Ok(listing);
        }

        let categories = self
            .repo
            .list_with_counts()
            .await
            .context("Failed to list categories")?;
        let listing = CategoryListing::new(categories);

        let _ = self
            .cache
            .set(CACHE_KEY_CATEGORY_LIST, &listing, self.cache.default_ttl())
            .await;

        Ok(listing)
    }
}
