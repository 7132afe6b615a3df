//! Category model
//!
//! A category is shared by all three content kinds; its `count` aggregates
//! the approved entries of every kind that reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity with its aggregated entry count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Display name, also what entries are matched against when filtering
    pub name: String,
    /// Category description
    pub description: String,
    /// Emoji or icon name shown next to the category
    pub icon: String,
    /// Sort order in the filter bar
    pub sort_order: i32,
    /// Approved tools, repositories and models in this category
    pub count: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Categories plus the "all categories" total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListing {
    pub categories: Vec<Category>,
    pub total: i64,
}

impl CategoryListing {
    pub fn new(categories: Vec<Category>) -> Self {
        let total = categories.iter().map(|c| c.count).sum();
        Self { categories, total }
    }

    /// Resolve a category id to its display name
    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}
