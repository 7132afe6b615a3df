//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the queries for one part of the schema.

pub mod catalog;
pub mod category;

pub use catalog::{CatalogRepository, SqlxCatalogRepository};
pub use category::{CategoryRepository, SqlxCategoryRepository};
