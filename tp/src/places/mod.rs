//! Reference set of places used for destination autocomplete

mod dataset;
mod matcher;

pub use dataset::{load_places, parse_places};
pub use matcher::{DEFAULT_MIN_QUERY_CHARS, DEFAULT_SUGGESTION_LIMIT, SuggestionMatcher, match_places};

use serde::{Deserialize, Serialize};

/// A city in the reference dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub subcountry: Option<String>,
}

impl PlaceRecord {
    pub fn new(name: impl Into<String>, country: impl Into<String>, subcountry: Option<&str>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            subcountry: subcountry.map(str::to_string),
        }
    }

    /// Label shown in the suggestion list: `name[, subcountry][, country]`
    pub fn display_label(&self) -> String {
        let mut label = self.name.clone();
        if let Some(sub) = self.subcountry.as_deref().filter(|s| !s.is_empty()) {
            label.push_str(", ");
            label.push_str(sub);
        }
        if !self.country.is_empty() {
            label.push_str(", ");
            label.push_str(&self.country);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        let place = PlaceRecord::new("Springfield", "United States", Some("Illinois"));
        assert_eq!(place.display_label(), "Springfield, Illinois, United States");

        let place = PlaceRecord::new("Monaco", "Monaco", None);
        assert_eq!(place.display_label(), "Monaco, Monaco");

        let place = PlaceRecord::new("Vatican City", "Vatican", Some(""));
        assert_eq!(place.display_label(), "Vatican City, Vatican");
    }
}
