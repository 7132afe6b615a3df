//! Search model
//!
//! This module provides:
//! - `SearchParams`, the structured form of a free-text query
//! - `Interpretation`, search params tagged with how they were obtained
//! - `SearchResult`, the transient bundle produced by one search
//! - `SearchOutcome`, a result plus the signals surfaced to clients

use serde::{Deserialize, Serialize};

use super::entry::{ContentKind, Entry};

/// Structured search parameters extracted from a free-text query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub keywords: Vec<String>,
    pub categories: Vec<ContentKind>,
    pub tags: Vec<String>,
    pub intent: String,
}

impl SearchParams {
    /// Deterministic params used whenever the model response is unusable
    pub fn fallback(raw_query: &str) -> Self {
        Self {
            keywords: vec![raw_query.to_string()],
            categories: ContentKind::ALL.to_vec(),
            tags: Vec::new(),
            intent: raw_query.to_string(),
        }
    }

    /// The substring every lookup matches against
    pub fn needle(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Where a set of search params came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum InterpretationSource {
    /// Parsed and validated from the generation response
    Model,
    /// The generation call or its response was unusable
    Fallback(String),
}

/// Outcome of the query interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub params: SearchParams,
    pub source: InterpretationSource,
}

impl Interpretation {
    pub fn from_model(params: SearchParams) -> Self {
        Self {
            params,
            source: InterpretationSource::Model,
        }
    }

    pub fn fallback(raw_query: &str, reason: impl Into<String>) -> Self {
        Self {
            params: SearchParams::fallback(raw_query),
            source: InterpretationSource::Fallback(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, InterpretationSource::Fallback(_))
    }
}

/// Entries found by one search, one list per content kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tools: Vec<Entry>,
    pub repositories: Vec<Entry>,
    pub models: Vec<Entry>,
    pub total: usize,
}

impl SearchResult {
    /// Assemble a result; `total` is always the sum of the three lengths
    pub fn new(tools: Vec<Entry>, repositories: Vec<Entry>, models: Vec<Entry>) -> Self {
        let total = tools.len() + repositories.len() + models.len();
        Self {
            tools,
            repositories,
            models,
            total,
        }
    }
}

/// A finished search as reported to callers
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub intent: String,
    /// The interpreter fell back or at least one lookup failed
    pub degraded: bool,
    pub result: SearchResult,
}
