//! Filter, sort and view layer
//!
//! Pure transformations over whatever is being displayed: the latest search
//! result when there is one, otherwise the approved catalog. Nothing here
//! touches the store.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{CategoryListing, ContentKind, Entry, SearchResult};

/// Sort order selectable by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rating first
    Rating,
    /// Most reviews first (tools)
    Reviews,
    /// Most stars first (repositories)
    Stars,
    /// Most downloads first (models)
    Downloads,
    /// Name A-Z, case-insensitive
    Name,
    /// Most recently created first
    Newest,
}

impl SortKey {
    pub const DEFAULT: SortKey = SortKey::Rating;

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Some(SortKey::Rating),
            "reviews" => Some(SortKey::Reviews),
            "stars" => Some(SortKey::Stars),
            "downloads" => Some(SortKey::Downloads),
            "name" => Some(SortKey::Name),
            "newest" => Some(SortKey::Newest),
            _ => None,
        }
    }

    /// Resolve a query parameter: absent means the default key, an
    /// unrecognized value means "keep the current order".
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        match param {
            None => Some(Self::DEFAULT),
            Some(s) if s.trim().is_empty() => Some(Self::DEFAULT),
            Some(s) => Self::from_str(s),
        }
    }

    /// Whether this key orders entries of `kind`
    pub fn applies_to(&self, kind: ContentKind) -> bool {
        match self {
            SortKey::Reviews => kind == ContentKind::Tools,
            SortKey::Stars => kind == ContentKind::Repositories,
            SortKey::Downloads => kind == ContentKind::Models,
            SortKey::Rating | SortKey::Name | SortKey::Newest => true,
        }
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Reviews => b.review_count.cmp(&a.review_count),
            SortKey::Stars => b.stars().cmp(&a.stars()),
            SortKey::Downloads => b.download_count().cmp(&a.download_count()),
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Stable sort of one kind's entries. Keys that don't apply keep the order.
pub fn sort_entries(entries: &mut [Entry], kind: ContentKind, key: Option<SortKey>) {
    let Some(key) = key.filter(|k| k.applies_to(kind)) else {
        return;
    };
    entries.sort_by(|a, b| key.compare(a, b));
}

/// Grid or list presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Unknown values fall back to grid
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("list") => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    /// Widest column count a client should lay entries out in
    pub fn max_columns(&self) -> u8 {
        match self {
            ViewMode::Grid => 4,
            ViewMode::List => 1,
        }
    }
}

/// Presentation hints returned alongside entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewHints {
    pub mode: ViewMode,
    pub columns: u8,
}

impl From<ViewMode> for ViewHints {
    fn from(mode: ViewMode) -> Self {
        Self {
            mode,
            columns: mode.max_columns(),
        }
    }
}

/// Category selection after resolving the selected id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Nothing selected
    All,
    /// Entries whose category equals this display name
    Named(String),
    /// The selected id is not a known category; nothing matches
    Unknown(i64),
}

impl CategoryFilter {
    pub fn resolve(selected: Option<i64>, categories: &CategoryListing) -> Self {
        match selected {
            None => CategoryFilter::All,
            Some(id) => match categories.name_of(id) {
                Some(name) => CategoryFilter::Named(name.to_string()),
                None => CategoryFilter::Unknown(id),
            },
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => entry.category == *name,
            CategoryFilter::Unknown(_) => false,
        }
    }
}

/// Everything a client picked for the current view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub category: CategoryFilter,
    pub sort: Option<SortKey>,
    pub mode: ViewMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            sort: Some(SortKey::DEFAULT),
            mode: ViewMode::Grid,
        }
    }
}

impl ViewOptions {
    /// Filter and sort one kind's entries
    pub fn apply_to(&self, kind: ContentKind, entries: Vec<Entry>) -> Vec<Entry> {
        let mut entries: Vec<Entry> = entries
            .into_iter()
            .filter(|e| self.category.matches(e))
            .collect();
        sort_entries(&mut entries, kind, self.sort);
        entries
    }

    /// Filter and sort every list; `total` counts what remains
    pub fn apply(&self, result: SearchResult) -> SearchResult {
        SearchResult::new(
            self.apply_to(ContentKind::Tools, result.tools),
            self.apply_to(ContentKind::Repositories, result.repositories),
            self.apply_to(ContentKind::Models, result.models),
        )
    }

    pub fn hints(&self) -> ViewHints {
        self.mode.into()
    }
}

/// What the view layer is showing
#[derive(Debug, Clone, PartialEq)]
pub enum DisplaySource {
    /// The latest search result
    Search(SearchResult),
    /// The approved catalog
    Catalog(SearchResult),
}

impl DisplaySource {
    /// Apply the view and return the entries to display
    pub fn render(self, options: &ViewOptions) -> SearchResult {
        match self {
            DisplaySource::Search(result) | DisplaySource::Catalog(result) => options.apply(result),
        }
    }
}
