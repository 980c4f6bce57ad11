//! Case-insensitive substring filter.
//!
//! # Invariants
//! - An empty query returns the input unchanged, in order.
//! - Output is always a subsequence of the input (order preserved).
//! - Absent fields match as empty strings.

use crate::model::invention::Invention;

/// Fields that participate in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub title: bool,
    pub details: bool,
    pub link: bool,
}

impl SearchFields {
    pub const ALL: Self = Self {
        title: true,
        details: true,
        link: true,
    };

    pub const TITLE_AND_DETAILS: Self = Self {
        title: true,
        details: true,
        link: false,
    };
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::ALL
    }
}

/// Filters `records` by `query` over all fields.
pub fn filter_inventions<'a>(records: &'a [Invention], query: &str) -> Vec<&'a Invention> {
    filter_inventions_by(records, query, SearchFields::ALL)
}

/// Filters `records` by `query` over the selected `fields`.
pub fn filter_inventions_by<'a>(
    records: &'a [Invention],
    query: &str,
    fields: SearchFields,
) -> Vec<&'a Invention> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|invention| matches(invention, &needle, fields))
        .collect()
}

fn matches(invention: &Invention, needle: &str, fields: SearchFields) -> bool {
    let contains = |value: Option<&str>| {
        value
            .unwrap_or("")
            .to_lowercase()
            .contains(needle)
    };

    (fields.title && contains(invention.title.as_deref()))
        || (fields.details && contains(invention.details.as_deref()))
        || (fields.link && contains(invention.link_string.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::{filter_inventions, filter_inventions_by, SearchFields};
    use crate::model::invention::Invention;

    fn invention(title: Option<&str>, details: Option<&str>, link: Option<&str>) -> Invention {
        let mut invention = Invention::new_default();
        invention.title = title.map(str::to_string);
        invention.details = details.map(str::to_string);
        invention.link_string = link.map(str::to_string);
        invention
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let records = vec![
            invention(Some("B"), None, None),
            invention(Some("A"), None, None),
        ];
        let result = filter_inventions(&records, "");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, records[0].id);
        assert_eq!(result[1].id, records[1].id);
    }

    #[test]
    fn matches_title_or_details_case_insensitively() {
        let records = vec![
            invention(Some("Radio"), Some("wireless"), None),
            invention(Some("Engine"), None, None),
        ];

        let radio = filter_inventions(&records, "radio");
        assert_eq!(radio.len(), 1);
        assert_eq!(radio[0].title.as_deref(), Some("Radio"));

        let wire = filter_inventions(&records, "WIRE");
        assert_eq!(wire.len(), 1);

        let both = filter_inventions(&records, "e");
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn link_matching_can_be_disabled() {
        let records = vec![invention(
            Some("Loom"),
            None,
            Some("https://jacquard.example"),
        )];
        assert_eq!(filter_inventions(&records, "jacquard").len(), 1);
        assert!(
            filter_inventions_by(&records, "jacquard", SearchFields::TITLE_AND_DETAILS).is_empty()
        );
    }

    #[test]
    fn whitespace_query_is_a_literal_substring() {
        let records = vec![
            invention(Some("Steam engine"), None, None),
            invention(Some("Lathe"), None, None),
        ];
        let result = filter_inventions(&records, " ");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title.as_deref(), Some("Steam engine"));
    }

    #[test]
    fn absent_fields_never_match_non_empty_query() {
        let records = vec![invention(None, None, None)];
        assert!(filter_inventions(&records, "untitled").is_empty());
    }
}
