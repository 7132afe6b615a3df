//! Catalog repository
//!
//! Database operations for the three content collections.
//!
//! This module provides:
//! - `CatalogRepository` trait defining the interface for entry data access
//! - `SqlxCatalogRepository` implementing the trait for SQLite and MySQL
//!
//! Every read joins `categories` so callers receive both the raw `category`
//! column and the display name; records come back as `RawRecord` and are
//! normalized by the service layer.

use crate::config::DatabaseDriver;
use crate::db::{mysql_pool, sqlite_pool, DynDatabasePool};
use crate::models::{
    ContentKind, EntryDetails, EntryStatus, ModelDetails, NewRecord, RawRecord,
    RepositoryDetails, ToolDetails,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Escape character used in LIKE patterns
const LIKE_ESCAPE: char = '!';

/// Catalog repository trait
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Approved records of `kind` whose name, description or serialized tags
    /// contain `needle`, in the kind's ranking order, at most `limit` rows.
    async fn search(&self, kind: ContentKind, needle: &str, limit: usize)
        -> Result<Vec<RawRecord>>;

    /// All approved records of `kind` in the kind's ranking order
    async fn list_approved(&self, kind: ContentKind) -> Result<Vec<RawRecord>>;

    /// Get a record by ID regardless of status
    async fn get_by_id(&self, kind: ContentKind, id: i64) -> Result<Option<RawRecord>>;

    /// Insert a record, returning its ID
    async fn create(&self, record: &NewRecord) -> Result<i64>;

    /// Change the moderation status. Returns false when no row has this ID.
    async fn update_status(&self, kind: ContentKind, id: i64, status: EntryStatus)
        -> Result<bool>;
}

/// SQLx-based catalog repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxCatalogRepository {
    pool: DynDatabasePool,
}

impl SqlxCatalogRepository {
    /// Create a new SQLx catalog repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CatalogRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CatalogRepository for SqlxCatalogRepository {
    async fn search(
        &self,
        kind: ContentKind,
        needle: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>> {
        let pattern = like_pattern(needle);
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                search_sqlite(sqlite_pool(&self.pool)?, kind, &pattern, limit).await
            }
            DatabaseDriver::Mysql => {
                search_mysql(mysql_pool(&self.pool)?, kind, &pattern, limit).await
            }
        }
    }

    async fn list_approved(&self, kind: ContentKind) -> Result<Vec<RawRecord>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_approved_sqlite(sqlite_pool(&self.pool)?, kind).await,
            DatabaseDriver::Mysql => list_approved_mysql(mysql_pool(&self.pool)?, kind).await,
        }
    }

    async fn get_by_id(&self, kind: ContentKind, id: i64) -> Result<Option<RawRecord>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(sqlite_pool(&self.pool)?, kind, id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(mysql_pool(&self.pool)?, kind, id).await,
        }
    }

    async fn create(&self, record: &NewRecord) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(sqlite_pool(&self.pool)?, record).await,
            DatabaseDriver::Mysql => create_mysql(mysql_pool(&self.pool)?, record).await,
        }
    }

    async fn update_status(
        &self,
        kind: ContentKind,
        id: i64,
        status: EntryStatus,
    ) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_status_sqlite(sqlite_pool(&self.pool)?, kind, id, status).await
            }
            DatabaseDriver::Mysql => {
                update_status_mysql(mysql_pool(&self.pool)?, kind, id, status).await
            }
        }
    }
}

// ============================================================================
// SQL building helpers
// ============================================================================

/// Wrap `needle` for a substring LIKE match, escaping wildcard characters
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn detail_columns(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Tools => "e.website_url, e.github_url, e.logo_url",
        ContentKind::Repositories => "e.github_url, e.language, e.stars, e.forks, e.image_url",
        ContentKind::Models => {
            "e.model_type, e.parameters, e.license, e.download_count, \
             e.huggingface_url, e.paper_url, e.demo_url, e.image_url"
        }
    }
}

/// Ranking order per kind; `e.id` keeps ties deterministic
fn order_clause(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Tools => "e.rating DESC, e.review_count DESC, e.id ASC",
        ContentKind::Repositories => "e.stars DESC, e.rating DESC, e.id ASC",
        ContentKind::Models => "e.rating DESC, e.download_count DESC, e.id ASC",
    }
}

fn select_sql(kind: ContentKind, filter: &str) -> String {
    format!(
        "SELECT e.id, e.name, e.description, e.category, c.name AS category_name, \
         e.tags, e.rating, e.review_count, e.status, e.user_id, e.created_at, \
         e.updated_at, {columns} \
         FROM {table} e LEFT JOIN categories c ON c.id = e.category_id \
         WHERE {filter}",
        columns = detail_columns(kind),
        table = kind.as_str(),
        filter = filter,
    )
}

fn search_sql(kind: ContentKind) -> String {
    let filter = format!(
        "e.status = 'approved' AND (e.name LIKE ? ESCAPE '{esc}' \
         OR e.description LIKE ? ESCAPE '{esc}' OR e.tags LIKE ? ESCAPE '{esc}')",
        esc = LIKE_ESCAPE
    );
    format!(
        "{} ORDER BY {} LIMIT ?",
        select_sql(kind, &filter),
        order_clause(kind)
    )
}

fn list_approved_sql(kind: ContentKind) -> String {
    format!(
        "{} ORDER BY {}",
        select_sql(kind, "e.status = 'approved'"),
        order_clause(kind)
    )
}

fn insert_sql(kind: ContentKind) -> String {
    let (columns, placeholders) = match kind {
        ContentKind::Tools => ("website_url, github_url, logo_url", "?, ?, ?"),
        ContentKind::Repositories => (
            "github_url, language, stars, forks, image_url",
            "?, ?, ?, ?, ?",
        ),
        ContentKind::Models => (
            "model_type, parameters, license, download_count, huggingface_url, \
             paper_url, demo_url, image_url",
            "?, ?, ?, ?, ?, ?, ?, ?",
        ),
    };
    format!(
        "INSERT INTO {table} (name, description, category, category_id, tags, rating, \
         review_count, status, user_id, created_at, updated_at, {columns}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, {placeholders})",
        table = kind.as_str(),
    )
}

fn serialize_tags(record: &NewRecord) -> Result<String> {
    serde_json::to_string(&record.input.tags).context("Failed to serialize tags")
}

/// Map a joined row onto a `RawRecord`; expanded once per driver row type
macro_rules! row_to_raw_record {
    ($kind:expr, $row:expr) => {{
        let row = $row;
        let details = match $kind {
            ContentKind::Tools => EntryDetails::Tool(ToolDetails {
                website_url: row.try_get("website_url")?,
                github_url: row.try_get("github_url")?,
                logo_url: row.try_get("logo_url")?,
            }),
            ContentKind::Repositories => EntryDetails::Repository(RepositoryDetails {
                github_url: row.try_get("github_url")?,
                language: row.try_get("language")?,
                stars: row.try_get("stars")?,
                forks: row.try_get("forks")?,
                image_url: row.try_get("image_url")?,
            }),
            ContentKind::Models => EntryDetails::Model(ModelDetails {
                model_type: row.try_get("model_type")?,
                parameters: row.try_get("parameters")?,
                license: row.try_get("license")?,
                download_count: row.try_get("download_count")?,
                huggingface_url: row.try_get("huggingface_url")?,
                paper_url: row.try_get("paper_url")?,
                demo_url: row.try_get("demo_url")?,
                image_url: row.try_get("image_url")?,
            }),
        };
        Ok(RawRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            category_name: row.try_get("category_name")?,
            tags: row.try_get("tags")?,
            rating: row.try_get("rating")?,
            review_count: row.try_get("review_count")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            details,
        })
    }};
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn search_sqlite(
    pool: &SqlitePool,
    kind: ContentKind,
    pattern: &str,
    limit: usize,
) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query(&search_sql(kind))
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to search {}", kind))?;

    rows.iter().map(|row| row_to_raw_record_sqlite(kind, row)).collect()
}

async fn list_approved_sqlite(pool: &SqlitePool, kind: ContentKind) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query(&list_approved_sql(kind))
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to list approved {}", kind))?;

    rows.iter().map(|row| row_to_raw_record_sqlite(kind, row)).collect()
}

async fn get_by_id_sqlite(
    pool: &SqlitePool,
    kind: ContentKind,
    id: i64,
) -> Result<Option<RawRecord>> {
    let row = sqlx::query(&select_sql(kind, "e.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get {} by ID", kind))?;

    row.map(|row| row_to_raw_record_sqlite(kind, &row)).transpose()
}

async fn create_sqlite(pool: &SqlitePool, record: &NewRecord) -> Result<i64> {
    let now = Utc::now();
    let input = &record.input;
    let tags = serialize_tags(record)?;
    let sql = insert_sql(record.kind());

    let query = sqlx::query(&sql)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.category_id)
        .bind(tags)
        .bind(record.rating)
        .bind(record.review_count)
        .bind(record.status.as_str())
        .bind(&record.user_id)
        .bind(now)
        .bind(now);

    let query = match &input.details {
        EntryDetails::Tool(tool) => query
            .bind(&tool.website_url)
            .bind(&tool.github_url)
            .bind(&tool.logo_url),
        EntryDetails::Repository(repo) => query
            .bind(&repo.github_url)
            .bind(&repo.language)
            .bind(repo.stars)
            .bind(repo.forks)
            .bind(&repo.image_url),
        EntryDetails::Model(model) => query
            .bind(&model.model_type)
            .bind(&model.parameters)
            .bind(&model.license)
            .bind(model.download_count)
            .bind(&model.huggingface_url)
            .bind(&model.paper_url)
            .bind(&model.demo_url)
            .bind(&model.image_url),
    };

    let result = query
        .execute(pool)
        .await
        .with_context(|| format!("Failed to create {} entry", record.kind()))?;

    Ok(result.last_insert_rowid())
}

async fn update_status_sqlite(
    pool: &SqlitePool,
    kind: ContentKind,
    id: i64,
    status: EntryStatus,
) -> Result<bool> {
    let sql = format!("UPDATE {} SET status = ?, updated_at = ? WHERE id = ?", kind.as_str());
    let result = sqlx::query(&sql)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update {} status", kind))?;

    Ok(result.rows_affected() > 0)
}

fn row_to_raw_record_sqlite(kind: ContentKind, row: &sqlx::sqlite::SqliteRow) -> Result<RawRecord> {
    row_to_raw_record!(kind, row)
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn search_mysql(
    pool: &MySqlPool,
    kind: ContentKind,
    pattern: &str,
    limit: usize,
) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query(&search_sql(kind))
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to search {}", kind))?;

    rows.iter().map(|row| row_to_raw_record_mysql(kind, row)).collect()
}

async fn list_approved_mysql(pool: &MySqlPool, kind: ContentKind) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query(&list_approved_sql(kind))
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to list approved {}", kind))?;

    rows.iter().map(|row| row_to_raw_record_mysql(kind, row)).collect()
}

async fn get_by_id_mysql(
    pool: &MySqlPool,
    kind: ContentKind,
    id: i64,
) -> Result<Option<RawRecord>> {
    let row = sqlx::query(&select_sql(kind, "e.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get {} by ID", kind))?;

    row.map(|row| row_to_raw_record_mysql(kind, &row)).transpose()
}

async fn create_mysql(pool: &MySqlPool, record: &NewRecord) -> Result<i64> {
    let now = Utc::now();
    let input = &record.input;
    let tags = serialize_tags(record)?;
    let sql = insert_sql(record.kind());

    let query = sqlx::query(&sql)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.category_id)
        .bind(tags)
        .bind(record.rating)
        .bind(record.review_count)
        .bind(record.status.as_str())
        .bind(&record.user_id)
        .bind(now)
        .bind(now);

    let query = match &input.details {
        EntryDetails::Tool(tool) => query
            .bind(&tool.website_url)
            .bind(&tool.github_url)
            .bind(&tool.logo_url),
        EntryDetails::Repository(repo) => query
            .bind(&repo.github_url)
            .bind(&repo.language)
            .bind(repo.stars)
            .bind(repo.forks)
            .bind(&repo.image_url),
        EntryDetails::Model(model) => query
            .bind(&model.model_type)
            .bind(&model.parameters)
            .bind(&model.license)
            .bind(model.download_count)
            .bind(&model.huggingface_url)
            .bind(&model.paper_url)
            .bind(&model.demo_url)
            .bind(&model.image_url),
    };

    let result = query
        .execute(pool)
        .await
        .with_context(|| format!("Failed to create {} entry", record.kind()))?;

    Ok(result.last_insert_id() as i64)
}

async fn update_status_mysql(
    pool: &MySqlPool,
    kind: ContentKind,
    id: i64,
    status: EntryStatus,
) -> Result<bool> {
    let sql = format!("UPDATE {} SET status = ?, updated_at = ? WHERE id = ?", kind.as_str());
    let result = sqlx::query(&sql)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update {} status", kind))?;

    Ok(result.rows_affected() > 0)
}

fn row_to_raw_record_mysql(kind: ContentKind, row: &sqlx::mysql::MySqlRow) -> Result<RawRecord> {
    row_to_raw_record!(kind, row)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::NewEntryInput;

    pub(crate) async fn setup_test_repo() -> (DynDatabasePool, SqlxCatalogRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxCatalogRepository::new(pool.clone());
        (pool, repo)
    }

    pub(crate) fn tool_record(name: &str, description: &str, rating: f64, reviews: i64) -> NewRecord {
        NewRecord {
            input: NewEntryInput {
                name: name.to_string(),
                description: description.to_string(),
                category: None,
                category_id: Some(1),
                tags: vec!["ai".to_string(), "nlp".to_string()],
                details: EntryDetails::Tool(ToolDetails {
                    website_url: format!("https://{}.example.com", name),
                    github_url: None,
                    logo_url: None,
                }),
            },
            rating,
            review_count: reviews,
            status: EntryStatus::Approved,
            user_id: "user1".to_string(),
        }
    }

    pub(crate) fn repository_record(name: &str, stars: i64, rating: f64) -> NewRecord {
        NewRecord {
            input: NewEntryInput {
                name: name.to_string(),
                description: format!("{} source code", name),
                category: Some("Computer Vision".to_string()),
                category_id: None,
                tags: vec!["vision".to_string()],
                details: EntryDetails::Repository(RepositoryDetails {
                    github_url: format!("https://github.com/example/{}", name),
                    language: "Python".to_string(),
                    stars,
                    forks: 10,
                    image_url: None,
                }),
            },
            rating,
            review_count: 3,
            status: EntryStatus::Approved,
            user_id: "user2".to_string(),
        }
    }

    pub(crate) fn model_record(name: &str, rating: f64, downloads: i64) -> NewRecord {
        NewRecord {
            input: NewEntryInput {
                name: name.to_string(),
                description: "machine learning model for text classification".to_string(),
                category: None,
                category_id: Some(2),
                tags: vec!["nlp".to_string(), "classification".to_string()],
                details: EntryDetails::Model(ModelDetails {
                    model_type: "text-classification".to_string(),
                    parameters: Some("110M".to_string()),
                    license: Some("apache-2.0".to_string()),
                    download_count: downloads,
                    huggingface_url: None,
                    paper_url: None,
                    demo_url: None,
                    image_url: None,
                }),
            },
            rating,
            review_count: 0,
            status: EntryStatus::Approved,
            user_id: "user3".to_string(),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("nlp"), "%nlp%");
        assert_eq!(like_pattern("100%"), "%100!%%");
        assert_eq!(like_pattern("a_b!"), "%a!_b!!%");
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let (_pool, repo) = setup_test_repo().await;
        let id = repo
            .create(&tool_record("chatbot", "conversational agent", 4.5, 10))
            .await
            .expect("Failed to create tool");

        let raw = repo
            .get_by_id(ContentKind::Tools, id)
            .await
            .expect("Failed to get tool")
            .expect("Tool should exist");

        assert_eq!(raw.name, "chatbot");
        assert_eq!(raw.category_name.as_deref(), Some("Machine Learning"));
        assert_eq!(raw.tags.as_deref(), Some(r#"["ai","nlp"]"#));
        assert_eq!(raw.status, "approved");
        assert!(matches!(raw.details, EntryDetails::Tool(_)));
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let (_pool, repo) = setup_test_repo().await;
        let raw = repo
            .get_by_id(ContentKind::Models, 999)
            .await
            .expect("Query should succeed");
        assert!(raw.is_none());
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_tags() {
        let (_pool, repo) = setup_test_repo().await;
        repo.create(&tool_record("writer", "drafts blog posts", 4.0, 1))
            .await
            .unwrap();
        repo.create(&tool_record("painter", "image generation", 4.0, 1))
            .await
            .unwrap();

        let by_name = repo.search(ContentKind::Tools, "writ", 20).await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_description = repo.search(ContentKind::Tools, "IMAGE", 20).await.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].name, "painter");

        let by_tag = repo.search(ContentKind::Tools, "nlp", 20).await.unwrap();
        assert_eq!(by_tag.len(), 2);
    }

    #[tokio::test]
    async fn test_search_excludes_non_approved() {
        let (_pool, repo) = setup_test_repo().await;
        let mut pending = tool_record("hidden", "pending tool", 5.0, 100);
        pending.status = EntryStatus::Pending;
        repo.create(&pending).await.unwrap();
        let mut rejected = tool_record("refused", "rejected tool", 5.0, 100);
        rejected.status = EntryStatus::Rejected;
        repo.create(&rejected).await.unwrap();

        let results = repo.search(ContentKind::Tools, "tool", 20).await.unwrap();
        assert!(results.is_empty());
        assert!(repo.list_approved(ContentKind::Tools).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let (_pool, repo) = setup_test_repo().await;
        repo.create(&tool_record("plain", "nothing special", 4.0, 1))
            .await
            .unwrap();
        repo.create(&tool_record("discount", "save 100% today", 4.0, 1))
            .await
            .unwrap();

        let results = repo.search(ContentKind::Tools, "100%", 20).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "discount");

        let underscore = repo.search(ContentKind::Tools, "_", 20).await.unwrap();
        assert!(underscore.is_empty());
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let (_pool, repo) = setup_test_repo().await;
        for i in 0..25 {
            repo.create(&tool_record(&format!("tool-{}", i), "bulk", 3.0, i))
                .await
                .unwrap();
        }

        let results = repo.search(ContentKind::Tools, "bulk", 20).await.unwrap();
        assert_eq!(results.len(), 20);
    }

    #[tokio::test]
    async fn test_tool_ordering_rating_then_reviews() {
        let (_pool, repo) = setup_test_repo().await;
        repo.create(&tool_record("low", "ranked", 3.0, 500)).await.unwrap();
        repo.create(&tool_record("high-few", "ranked", 4.8, 5)).await.unwrap();
        repo.create(&tool_record("high-many", "ranked", 4.8, 50)).await.unwrap();

        let names: Vec<String> = repo
            .search(ContentKind::Tools, "ranked", 20)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["high-many", "high-few", "low"]);
    }

    #[tokio::test]
    async fn test_repository_ordering_stars_then_rating() {
        let (_pool, repo) = setup_test_repo().await;
        repo.create(&repository_record("small", 10, 5.0)).await.unwrap();
        repo.create(&repository_record("big-low", 9000, 3.0)).await.unwrap();
        repo.create(&repository_record("big-high", 9000, 4.5)).await.unwrap();

        let records = repo.list_approved(ContentKind::Repositories).await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["big-high", "big-low", "small"]);
        assert_eq!(records[0].category.as_deref(), Some("Computer Vision"));
        assert_eq!(records[0].category_name, None);
    }

    #[tokio::test]
    async fn test_model_ordering_rating_then_downloads() {
        let (_pool, repo) = setup_test_repo().await;
        repo.create(&model_record("bert", 4.5, 100)).await.unwrap();
        repo.create(&model_record("roberta", 4.5, 900)).await.unwrap();
        repo.create(&model_record("gpt2", 4.9, 1)).await.unwrap();

        let names: Vec<String> = repo
            .search(ContentKind::Models, "classification", 20)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["gpt2", "roberta", "bert"]);
    }

    #[tokio::test]
    async fn test_update_status() {
        let (_pool, repo) = setup_test_repo().await;
        let mut record = tool_record("moderated", "awaiting review", 4.0, 1);
        record.status = EntryStatus::Pending;
        let id = repo.create(&record).await.unwrap();

        assert!(repo
            .update_status(ContentKind::Tools, id, EntryStatus::Approved)
            .await
            .unwrap());
        assert_eq!(repo.list_approved(ContentKind::Tools).await.unwrap().len(), 1);

        assert!(!repo
            .update_status(ContentKind::Tools, id + 100, EntryStatus::Approved)
            .await
            .unwrap());
    }
}
