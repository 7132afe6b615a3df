//! Search orchestrator
//!
//! One search runs in this order:
//! 1. interpret the query once;
//! 2. look up tools, repositories and models concurrently with the
//!    interpreted keywords;
//! 3. merge the three lists and count them;
//! 4. record the query as a recent search.
//!
//! A failing lookup empties its own list only. Both that and an interpreter
//! fallback mark the outcome as degraded.

use std::sync::Arc;

use crate::models::{ContentKind, Entry, SearchOutcome, SearchParams, SearchResult};
use crate::services::catalog::CatalogService;
use crate::services::interpreter::QueryInterpreter;
use crate::services::recent::RecentSearches;

/// Search service tying interpretation, lookups and recent searches together
pub struct SearchService {
    interpreter: QueryInterpreter,
    catalog: Arc<CatalogService>,
    recent: Arc<RecentSearches>,
}

impl SearchService {
    pub fn new(
        interpreter: QueryInterpreter,
        catalog: Arc<CatalogService>,
        recent: Arc<RecentSearches>,
    ) -> Self {
        Self {
            interpreter,
            catalog,
            recent,
        }
    }

    /// Run a search. Blank queries return `None` without touching the
    /// interpreter or the store.
    pub async fn search(&self, raw_query: &str) -> Option<SearchOutcome> {
        let query = raw_query.trim();
        if query.is_empty() {
            return None;
        }

        let interpretation = self.interpreter.interpret(query).await;
        let params = &interpretation.params;

        let (tools, repositories, models) = tokio::join!(
            self.branch(ContentKind::Tools, params),
            self.branch(ContentKind::Repositories, params),
            self.branch(ContentKind::Models, params),
        );

        let branch_failed = tools.is_none() || repositories.is_none() || models.is_none();
        let result = SearchResult::new(
            tools.unwrap_or_default(),
            repositories.unwrap_or_default(),
            models.unwrap_or_default(),
        );

        self.recent.record(query).await;

        let degraded = interpretation.is_fallback() || branch_failed;
        tracing::info!(
            query = %query,
            total = result.total,
            degraded,
            "Search completed"
        );

        Some(SearchOutcome {
            query: query.to_string(),
            intent: interpretation.params.intent,
            degraded,
            result,
        })
    }

    /// One lookup branch; `None` when the store failed
    async fn branch(&self, kind: ContentKind, params: &SearchParams) -> Option<Vec<Entry>> {
        match self.catalog.try_lookup(kind, params).await {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!("Failed to search {}: {:#}", kind, e);
                None
            }
        }
    }

    /// Recent queries, most recent first
    pub async fn recent_searches(&self) -> Vec<String> {
        self.recent.list().await
    }
}
