//! Category repository
//!
//! Database operations for categories.
//!
//! This module provides:
//! - `CategoryRepository` trait defining the interface for category data access
//! - `SqlxCategoryRepository` implementing the trait for SQLite and MySQL
//!
//! Counts are aggregated in SQL across tools, repositories and models, and
//! only approved entries are counted. An entry belongs to the category its
//! display name resolves to: the one its `category_id` points at, or, without
//! an id, the one whose name equals its raw `category` column.

use crate::config::DatabaseDriver;
use crate::db::{mysql_pool, sqlite_pool, DynDatabasePool};
use crate::models::Category;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const LIST_WITH_COUNTS_SQL: &str = r#"
    SELECT c.id, c.name, c.description, c.icon, c.sort_order, c.created_at,
        (SELECT COUNT(*) FROM tools t WHERE t.status = 'approved'
            AND (t.category_id = c.id OR (t.category_id IS NULL AND t.category = c.name)))
        + (SELECT COUNT(*) FROM repositories r WHERE r.status = 'approved'
            AND (r.category_id = c.id OR (r.category_id IS NULL AND r.category = c.name)))
        + (SELECT COUNT(*) FROM models m WHERE m.status = 'approved'
            AND (m.category_id = c.id OR (m.category_id IS NULL AND m.category = c.name)))
        AS entry_count
    FROM categories c
    ORDER BY c.sort_order, c.id
"#;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories with their approved entry counts
    async fn list_with_counts(&self) -> Result<Vec<Category>>;

    /// Check whether a category with this ID exists
    async fn exists(&self, id: i64) -> Result<bool>;
}

/// SQLx-based category repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxCategoryRepository {
    pool: DynDatabasePool,
}

impl SqlxCategoryRepository {
    /// Create a new SQLx category repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list_with_counts(&self) -> Result<Vec<Category>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_with_counts_sqlite(sqlite_pool(&self.pool)?).await,
            DatabaseDriver::Mysql => list_with_counts_mysql(mysql_pool(&self.pool)?).await,
        }
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => exists_sqlite(sqlite_pool(&self.pool)?, id).await,
            DatabaseDriver::Mysql => exists_mysql(mysql_pool(&self.pool)?, id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_with_counts_sqlite(pool: &SqlitePool) -> Result<Vec<Category>> {
    let rows = sqlx::query(LIST_WITH_COUNTS_SQL)
        .fetch_all(pool)
        .await
        .context("Failed to list categories")?;

    rows.iter().map(row_to_category_sqlite).collect()
}

async fn exists_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM categories WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to check category existence")?;

    let count: i64 = row.try_get("count")?;
    Ok(count > 0)
}

fn row_to_category_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        sort_order: row.try_get("sort_order")?,
        count: row.try_get("entry_count")?,
        created_at: row.try_get("created_at")?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_with_counts_mysql(pool: &MySqlPool) -> Result<Vec<Category>> {
    let rows = sqlx::query(LIST_WITH_COUNTS_SQL)
        .fetch_all(pool)
        .await
        .context("Failed to list categories")?;

    rows.iter().map(row_to_category_mysql).collect()
}

async fn exists_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM categories WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to check category existence")?;

    let count: i64 = row.try_get("count")?;
    Ok(count > 0)
}

fn row_to_category_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        sort_order: row.try_get("sort_order")?,
        count: row.try_get("entry_count")?,
        created_at: row.try_get("created_at")?,
    })
}
