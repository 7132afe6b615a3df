//! Services layer - Business logic
//!
//! Services implement the directory's rules on top of the repositories and
//! the cache:
//! - normalizing stored records
//! - keyword lookups, listings, submissions and moderation
//! - query interpretation and the search pipeline
//! - filtering, sorting and view selection
//! - session state

pub mod catalog;
pub mod category;
pub mod interpreter;
pub mod normalizer;
pub mod recent;
pub mod search;
pub mod session;
pub mod view;

pub use catalog::{CatalogService, CatalogServiceError};
pub use category::{CategoryService, CategoryServiceError};
pub use interpreter::{build_prompt, HttpTextGenerator, QueryInterpreter, TextGenerator};
pub use normalizer::{normalize, parse_tags};
pub use recent::{RecentSearches, DEFAULT_RECENT_SEARCHES};
pub use search::SearchService;
pub use session::SessionState;
pub use view::{CategoryFilter, DisplaySource, SortKey, ViewHints, ViewMode, ViewOptions};
