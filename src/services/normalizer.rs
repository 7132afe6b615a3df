//! Record normalizer
//!
//! Turns `RawRecord`s from the store into `Entry` values. This is the only
//! place stored tag text is deserialized.

use crate::models::{Entry, EntryStatus, RawRecord};

/// Deserialize a stored tag list.
///
/// Null, empty or malformed text yields an empty list. Non-string elements
/// of a JSON array are skipped.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::debug!("Ignoring malformed tag data {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

/// Prefer the joined category display name, then the raw column
fn resolve_category(category_name: Option<String>, category: Option<String>) -> String {
    category_name
        .filter(|name| !name.is_empty())
        .or(category)
        .unwrap_or_default()
}

/// Convert a stored record into an entry
pub fn normalize(raw: RawRecord) -> Entry {
    let tags = parse_tags(raw.tags.as_deref());
    let status = EntryStatus::from_str(&raw.status).unwrap_or_default();

    Entry {
        id: raw.id,
        name: raw.name,
        description: raw.description.unwrap_or_default(),
        category: resolve_category(raw.category_name, raw.category),
        tags,
        rating: raw.rating,
        review_count: raw.review_count,
        status,
        user_id: raw.user_id.unwrap_or_default(),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        details: raw.details,
    }
}

/// Normalize a batch, preserving order
pub fn normalize_all(records: Vec<RawRecord>) -> Vec<Entry> {
    records.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDetails, ToolDetails};
    use chrono::Utc;

    fn raw(tags: Option<&str>, category: Option<&str>, category_name: Option<&str>) -> RawRecord {
        let now = Utc::now();
        RawRecord {
            id: 1,
            name: "summarizer".to_string(),
            description: None,
            category: category.map(String::from),
            category_name: category_name.map(String::from),
            tags: tags.map(String::from),
            rating: 4.2,
            review_count: 12,
            status: "approved".to_string(),
            user_id: None,
            created_at: now,
            updated_at: now,
            details: EntryDetails::Tool(ToolDetails {
                website_url: "https://summarizer.example.com".to_string(),
                github_url: None,
                logo_url: None,
            }),
        }
    }

    #[test]
    fn test_parse_tags_valid() {
        assert_eq!(parse_tags(Some(r#"["nlp","text"]"#)), vec!["nlp", "text"]);
    }

    #[test]
    fn test_parse_tags_absent_or_malformed() {
        assert!(parse_tags(None).is_empty());
        assert!(parse_tags(Some("")).is_empty());
        assert!(parse_tags(Some("   ")).is_empty());
        assert!(parse_tags(Some("not json")).is_empty());
        assert!(parse_tags(Some(r#"["unterminated"#)).is_empty());
        assert!(parse_tags(Some(r#"{"a":1}"#)).is_empty());
        assert!(parse_tags(Some("null")).is_empty());
    }

    #[test]
    fn test_parse_tags_skips_non_strings() {
        assert_eq!(
            parse_tags(Some(r#"["vision", 3, null, {"x":1}, "ocr"]"#)),
            vec!["vision", "ocr"]
        );
    }

    #[test]
    fn test_category_prefers_joined_name() {
        let entry = normalize(raw(None, Some("legacy"), Some("Machine Learning")));
        assert_eq!(entry.category, "Machine Learning");

        let entry = normalize(raw(None, Some("legacy"), Some("")));
        assert_eq!(entry.category, "legacy");

        let entry = normalize(raw(None, None, None));
        assert_eq!(entry.category, "");
    }

    #[test]
    fn test_normalize_defaults() {
        let mut record = raw(Some(r#"["a"]"#), None, None);
        record.status = "archived".to_string();
        let entry = normalize(record);

        assert_eq!(entry.tags, vec!["a"]);
        assert_eq!(entry.description, "");
        assert_eq!(entry.user_id, "");
        assert_eq!(entry.status, EntryStatus::Pending);
        assert!(!entry.is_approved());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(20))]

            #[test]
            fn parse_tags_never_panics(input in ".*") {
                let _ = parse_tags(Some(&input));
            }

            #[test]
            fn serialized_string_lists_round_trip(tags in proptest::collection::vec("[a-z0-9 -]{0,12}", 0..8)) {
                let serialized = serde_json::to_string(&tags).unwrap();
                prop_assert_eq!(parse_tags(Some(&serialized)), tags);
            }
        }
    }
}
