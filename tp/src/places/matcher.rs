//! Substring suggestion matching

use tracing::debug;

use super::PlaceRecord;

/// Maximum number of suggestions shown at once
pub const DEFAULT_SUGGESTION_LIMIT: usize = 7;

/// Queries shorter than this produce no suggestions; configured values
/// below it are raised to it
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Match `query` against `places`, returning at most `limit` labels
///
/// Case-insensitive substring match over each place's display label,
/// in source order. Queries of one character or less match nothing.
pub fn match_places(query: &str, places: &[PlaceRecord], limit: usize) -> Vec<String> {
    SuggestionMatcher::new(limit, DEFAULT_MIN_QUERY_CHARS).matches(query, places)
}

/// Configured suggestion matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionMatcher {
    limit: usize,
    min_query_chars: usize,
}

impl Default for SuggestionMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT, DEFAULT_MIN_QUERY_CHARS)
    }
}

impl SuggestionMatcher {
    pub fn new(limit: usize, min_query_chars: usize) -> Self {
        Self {
            limit,
            min_query_chars: min_query_chars.max(DEFAULT_MIN_QUERY_CHARS),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn matches(&self, query: &str, places: &[PlaceRecord]) -> Vec<String> {
        if query.chars().count() < self.min_query_chars || places.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let matches: Vec<String> = places
            .iter()
            .map(PlaceRecord::display_label)
            .filter(|label| label.to_lowercase().contains(&needle))
            .take(self.limit)
            .collect();

        debug!(%query, count = matches.len(), "SuggestionMatcher::matches: done");
        matches
    }
}
