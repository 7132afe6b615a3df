//! Data models
//!
//! This module contains the data structures used throughout the directory:
//! - Catalog entries (tools, repositories, models) and their raw store shape
//! - Categories with aggregated counts
//! - Search params, interpretations and results
//! - Auth session state

mod category;
mod entry;
mod search;
mod session;

pub use category::{Category, CategoryListing};
pub use entry::{
    ContentKind, Entry, EntryDetails, EntryStatus, ModelDetails, NewEntryInput, NewRecord,
    RawRecord, RepositoryDetails, ToolDetails,
};
pub use search::{Interpretation, InterpretationSource, SearchOutcome, SearchParams, SearchResult};
pub use session::{AuthState, SessionUser};
