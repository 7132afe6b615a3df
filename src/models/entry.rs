//! Catalog entry model
//!
//! This module provides:
//! - `ContentKind` naming the three collections (tools, repositories, models)
//! - `EntryStatus` moderation states
//! - `Entry`, the normalized in-memory shape shared by all three kinds
//! - `RawRecord`, the flat shape returned by the store before normalization
//! - `NewEntryInput` for submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three collections of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Tools,
    Repositories,
    Models,
}

impl ContentKind {
    /// All kinds, in the order results are presented
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Tools,
        ContentKind::Repositories,
        ContentKind::Models,
    ];

    /// Collection name, also used as the table name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Tools => "tools",
            ContentKind::Repositories => "repositories",
            ContentKind::Models => "models",
        }
    }

    /// Parse a collection name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tools" => Some(ContentKind::Tools),
            "repositories" => Some(ContentKind::Repositories),
            "models" => Some(ContentKind::Models),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation status of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Submitted, awaiting review - not visible
    #[default]
    Pending,
    /// Visible in listings and lookups
    Approved,
    /// Refused by a moderator - not visible
    Rejected,
}

impl EntryStatus {
    /// Convert status to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Approved => "approved",
            EntryStatus::Rejected => "rejected",
        }
    }

    /// Parse status from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(EntryStatus::Pending),
            "approved" => Some(EntryStatus::Approved),
            "rejected" => Some(EntryStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields specific to a website-hosted tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDetails {
    pub website_url: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Fields specific to a source-code repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDetails {
    pub github_url: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub forks: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Fields specific to a machine-learning model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default)]
    pub model_type: String,
    /// Parameter count as displayed, e.g. "7B"
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub download_count: i64,
    #[serde(default)]
    pub huggingface_url: Option<String>,
    #[serde(default)]
    pub paper_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Kind-specific part of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EntryDetails {
    #[serde(rename = "tools")]
    Tool(ToolDetails),
    #[serde(rename = "repositories")]
    Repository(RepositoryDetails),
    #[serde(rename = "models")]
    Model(ModelDetails),
}

impl EntryDetails {
    /// Collection this detail block belongs to
    pub fn kind(&self) -> ContentKind {
        match self {
            EntryDetails::Tool(_) => ContentKind::Tools,
            EntryDetails::Repository(_) => ContentKind::Repositories,
            EntryDetails::Model(_) => ContentKind::Models,
        }
    }
}

/// A normalized catalog entry (Tool, Repository or Model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Category display name
    pub category: String,
    pub tags: Vec<String>,
    /// 0 to 5
    pub rating: f64,
    pub review_count: i64,
    pub status: EntryStatus,
    /// Creator id issued by the auth provider
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl Entry {
    pub fn kind(&self) -> ContentKind {
        self.details.kind()
    }

    pub fn is_approved(&self) -> bool {
        self.status == EntryStatus::Approved
    }

    /// Stars for repositories, `None` for other kinds
    pub fn stars(&self) -> Option<i64> {
        match &self.details {
            EntryDetails::Repository(repo) => Some(repo.stars),
            _ => None,
        }
    }

    /// Download count for models, `None` for other kinds
    pub fn download_count(&self) -> Option<i64> {
        match &self.details {
            EntryDetails::Model(model) => Some(model.download_count),
            _ => None,
        }
    }
}

/// A record as the store returns it: tags still serialized, category both
/// as the raw column and as the joined display name.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub category_name: Option<String>,
    pub tags: Option<String>,
    pub rating: f64,
    pub review_count: i64,
    pub status: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub details: EntryDetails,
}

/// Input for inserting a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntryInput {
    pub name: String,
    pub description: String,
    /// Free-text category, kept when no category id is given
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

/// Row-level values for an insert; the service decides status and metrics
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub input: NewEntryInput,
    pub rating: f64,
    pub review_count: i64,
    pub status: EntryStatus,
    pub user_id: String,
}

impl NewRecord {
    /// A fresh submission: pending, unrated
    pub fn submission(input: NewEntryInput, user_id: impl Into<String>) -> Self {
        Self {
            input,
            rating: 0.0,
            review_count: 0,
            status: EntryStatus::Pending,
            user_id: user_id.into(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.input.details.kind()
    }
}
