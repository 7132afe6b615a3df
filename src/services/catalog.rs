//! Catalog service
//!
//! Business logic over the three content collections:
//! - keyword lookups used by search (`lookup`, `try_lookup`)
//! - the cached approved catalog (`list_approved`, `list_catalog`)
//! - submissions, which always land as pending
//! - moderation (`set_status`)

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::{CatalogRepository, CategoryRepository};
use crate::models::{
    ContentKind, Entry, EntryDetails, EntryStatus, NewEntryInput, NewRecord, SearchParams,
    SearchResult,
};
use crate::services::category::CACHE_KEY_CATEGORY_LIST;
use crate::services::normalizer::{normalize, normalize_all};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Cache key prefix for approved listings, followed by the kind
const CACHE_KEY_CATALOG: &str = "catalog:";

/// Error types for catalog service operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Catalog service for lookups, listings and submissions
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    categories: Arc<dyn CategoryRepository>,
    cache: Arc<Cache>,
    result_limit: usize,
}

impl CatalogService {
    /// Create a new catalog service. `result_limit` caps keyword lookups.
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        categories: Arc<dyn CategoryRepository>,
        cache: Arc<Cache>,
        result_limit: usize,
    ) -> Self {
        Self {
            repo,
            categories,
            cache,
            result_limit,
        }
    }

    /// Keyword lookup over one collection.
    ///
    /// Failures are logged and yield an empty list.
    pub async fn lookup(&self, kind: ContentKind, params: &SearchParams) -> Vec<Entry> {
        match self.try_lookup(kind, params).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Lookup over {} failed: {:#}", kind, e);
                Vec::new()
            }
        }
    }

    /// Keyword lookup that reports store failures to the caller
    pub async fn try_lookup(&self, kind: ContentKind, params: &SearchParams) -> Result<Vec<Entry>> {
        let needle = params.needle();
        let records = self
            .repo
            .search(kind, &needle, self.result_limit)
            .await
            .with_context(|| format!("Failed to look up {} matching {:?}", kind, needle))?;

        let mut entries = normalize_all(records);
        // The store filters too; never let a hidden record through.
        entries.retain(Entry::is_approved);
        entries.truncate(self.result_limit);
        Ok(entries)
    }

    /// All approved entries of a kind, in ranking order
    pub async fn list_approved(&self, kind: ContentKind) -> Result<Vec<Entry>, CatalogServiceError> {
        let cache_key = format!("{}{}", CACHE_KEY_CATALOG, kind);
        if let Some(entries) = self.cache.get::<Vec<Entry>>(&cache_key).await.ok().flatten() {
            return Ok(entries);
        }

        let records = self
            .repo
            .list_approved(kind)
            .await
            .with_context(|| format!("Failed to list approved {}", kind))?;
        let mut entries = normalize_all(records);
        entries.retain(Entry::is_approved);

        let _ = self
            .cache
            .set(&cache_key, &entries, self.cache.default_ttl())
            .await;

        Ok(entries)
    }

    /// The full approved catalog, all three kinds
    pub async fn list_catalog(&self) -> Result<SearchResult, CatalogServiceError> {
        let (tools, repositories, models) = tokio::try_join!(
            self.list_approved(ContentKind::Tools),
            self.list_approved(ContentKind::Repositories),
            self.list_approved(ContentKind::Models),
        )?;
        Ok(SearchResult::new(tools, repositories, models))
    }

    /// Store a new entry for moderation.
    ///
    /// The entry is saved as pending with no rating or reviews, whatever the
    /// input carries.
    pub async fn submit(
        &self,
        mut input: NewEntryInput,
        user_id: &str,
    ) -> Result<Entry, CatalogServiceError> {
        validate_input(&mut input)?;

        if let Some(category_id) = input.category_id {
            let exists = self
                .categories
                .exists(category_id)
                .await
                .context("Failed to check category")?;
            if !exists {
                return Err(CatalogServiceError::ValidationError(format!(
                    "Unknown category id: {}",
                    category_id
                )));
            }
        }

        let record = NewRecord::submission(input, user_id);
        let kind = record.kind();
        let id = self
            .repo
            .create(&record)
            .await
            .context("Failed to store submission")?;

        tracing::info!("New {} submission {} from {}", kind, id, user_id);

        self.get_by_id(kind, id).await
    }

    /// Get an entry by ID regardless of status
    pub async fn get_by_id(&self, kind: ContentKind, id: i64) -> Result<Entry, CatalogServiceError> {
        self.repo
            .get_by_id(kind, id)
            .await
            .context("Failed to get entry")?
            .map(normalize)
            .ok_or_else(|| CatalogServiceError::NotFound(format!("{} {}", kind, id)))
    }

    /// Moderate an entry and return it with its new status
    pub async fn set_status(
        &self,
        kind: ContentKind,
        id: i64,
        status: EntryStatus,
    ) -> Result<Entry, CatalogServiceError> {
        let updated = self
            .repo
            .update_status(kind, id, status)
            .await
            .context("Failed to update status")?;
        if !updated {
            return Err(CatalogServiceError::NotFound(format!("{} {}", kind, id)));
        }

        tracing::info!("{} {} is now {}", kind, id, status);
        self.invalidate_cache(kind).await;

        self.get_by_id(kind, id).await
    }

    async fn invalidate_cache(&self, kind: ContentKind) {
        let _ = self
            .cache
            .delete(&format!("{}{}", CACHE_KEY_CATALOG, kind))
            .await;
        let _ = self.cache.delete(CACHE_KEY_CATEGORY_LIST).await;
    }
}

fn require(value: &str, field: &str) -> Result<(), CatalogServiceError> {
    if value.trim().is_empty() {
        return Err(CatalogServiceError::ValidationError(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

fn require_url(value: &str, field: &str) -> Result<(), CatalogServiceError> {
    require(value, field)?;
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(CatalogServiceError::ValidationError(format!(
            "{} must be an http(s) URL",
            field
        )));
    }
    Ok(())
}

fn require_non_negative(value: i64, field: &str) -> Result<(), CatalogServiceError> {
    if value < 0 {
        return Err(CatalogServiceError::ValidationError(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(())
}

/// Validate a submission and tidy its free-text fields in place
fn validate_input(input: &mut NewEntryInput) -> Result<(), CatalogServiceError> {
    require(&input.name, "name")?;
    require(&input.description, "description")?;

    input.name = input.name.trim().to_string();
    input.description = input.description.trim().to_string();
    input.category = input
        .category
        .take()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let mut tags: Vec<String> = Vec::with_capacity(input.tags.len());
    for tag in input.tags.drain(..) {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    input.tags = tags;

    match &input.details {
        EntryDetails::Tool(tool) => require_url(&tool.website_url, "website_url"),
        EntryDetails::Repository(repo) => {
            require_url(&repo.github_url, "github_url")?;
            require_non_negative(repo.stars, "stars")?;
            require_non_negative(repo.forks, "forks")
        }
        EntryDetails::Model(model) => {
            require(&model.model_type, "model_type")?;
            require_non_negative(model.download_count, "download_count")
        }
    }
}
