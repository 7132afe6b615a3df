//! Database layer
//!
//! Storage for the directory: categories plus the three content collections
//! (tools, repositories, models). SQLite is the default; MySQL is selected
//! through `database.driver` in the configuration.
//!
//! # Usage
//!
//! ```ignore
//! use ai_directory::config::DatabaseConfig;
//! use ai_directory::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

use anyhow::{anyhow, Result};
use sqlx::{MySqlPool, SqlitePool};

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};

/// Borrow the SQLite pool behind a pool whose driver reports SQLite
pub(crate) fn sqlite_pool(pool: &DynDatabasePool) -> Result<&SqlitePool> {
    pool.as_sqlite()
        .ok_or_else(|| anyhow!("database pool is not backed by SQLite"))
}

/// Borrow the MySQL pool behind a pool whose driver reports MySQL
pub(crate) fn mysql_pool(pool: &DynDatabasePool) -> Result<&MySqlPool> {
    pool.as_mysql()
        .ok_or_else(|| anyhow!("database pool is not backed by MySQL"))
}
