//! Trip preferences collected from the user

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel interest that requires a free-text follow-up
pub const OTHER_INTEREST: &str = "Other";

/// Interest tags offered by the form, in display order
pub const INTEREST_OPTIONS: [&str; 10] = [
    "Culture",
    "Food",
    "Nature",
    "Adventure",
    "History",
    "Art",
    "Nightlife",
    "Shopping",
    "Relaxation",
    OTHER_INTEREST,
];

/// Default trip length used by a fresh form
pub const DEFAULT_DURATION_DAYS: i64 = 7;

/// A geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    /// Parse `LAT,LON`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected LAT,LON but got: {}", s))?;
        let lat: f64 = lat.trim().parse().map_err(|_| format!("Invalid latitude: {}", lat))?;
        let lon: f64 = lon.trim().parse().map_err(|_| format!("Invalid longitude: {}", lon))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("Coordinates out of range: {}", s));
        }
        Ok(Self { lat, lon })
    }
}

/// Everything the user told us about the trip
///
/// `interests` behaves as an insertion-ordered set: use [`add_interest`],
/// [`remove_interest`] or [`toggle_interest`] rather than pushing directly.
///
/// [`add_interest`]: TripPreferences::add_interest
/// [`remove_interest`]: TripPreferences::remove_interest
/// [`toggle_interest`]: TripPreferences::toggle_interest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub destination: String,
    pub duration: Option<i64>,
    pub budget: String,
    interests: Vec<String>,
    pub restrictions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_interest: Option<String>,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration: Some(DEFAULT_DURATION_DAYS),
            budget: String::new(),
            interests: Vec::new(),
            restrictions: String::new(),
            other_interest: None,
        }
    }
}

impl TripPreferences {
    /// Preferences with no interests selected yet
    pub fn new(
        destination: impl Into<String>,
        duration: Option<i64>,
        budget: impl Into<String>,
        restrictions: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            duration,
            budget: budget.into(),
            interests: Vec::new(),
            restrictions: restrictions.into(),
            other_interest: None,
        }
    }

    pub fn with_other_interest(mut self, other: Option<String>) -> Self {
        self.other_interest = other;
        self
    }

    /// Selected interests in the order they were added
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }

    /// Add an interest; returns false if it was already present
    pub fn add_interest(&mut self, interest: impl Into<String>) -> bool {
        let interest = interest.into();
        if self.has_interest(&interest) {
            debug!(%interest, "add_interest: already present");
            return false;
        }
        self.interests.push(interest);
        true
    }

    /// Remove an interest; returns false if it was not present
    pub fn remove_interest(&mut self, interest: &str) -> bool {
        let before = self.interests.len();
        self.interests.retain(|i| i != interest);
        before != self.interests.len()
    }

    /// Flip an interest on or off, as clicking a tag in the form does
    pub fn toggle_interest(&mut self, interest: &str) {
        debug!(%interest, "toggle_interest: called");
        if !self.remove_interest(interest) {
            self.interests.push(interest.to_string());
        }
    }

    /// Whether the sentinel "Other" tag is selected
    pub fn wants_other(&self) -> bool {
        self.has_interest(OTHER_INTEREST)
    }

    /// Interests as they should be described to the model
    ///
    /// The sentinel is replaced by the free-text interest when one was given.
    pub fn effective_interests(&self) -> Vec<String> {
        let other = self
            .other_interest
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        self.interests
            .iter()
            .filter_map(|i| {
                if i == OTHER_INTEREST {
                    other.map(str::to_string)
                } else {
                    Some(i.clone())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = TripPreferences::default();
        assert!(prefs.destination.is_empty());
        assert_eq!(prefs.duration, Some(7));
        assert!(prefs.interests().is_empty());
    }

    #[test]
    fn test_new_starts_without_interests() {
        let prefs = TripPreferences::new("Porto, Portugal", Some(3), "900", "No stairs")
            .with_other_interest(Some("Tiles".to_string()));
        assert_eq!(prefs.destination, "Porto, Portugal");
        assert_eq!(prefs.duration, Some(3));
        assert_eq!(prefs.restrictions, "No stairs");
        assert_eq!(prefs.other_interest.as_deref(), Some("Tiles"));
        assert!(prefs.interests().is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut prefs = TripPreferences::new("Oslo, Norway", Some(2), "300", "");
        prefs.add_interest("Nature");
        prefs.add_interest("Nature");

        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["interests"], serde_json::json!(["Nature"]));
        assert!(value.get("otherInterest").is_none());
    }

    #[test]
    fn test_interests_have_no_duplicates() {
        let mut prefs = TripPreferences::default();
        assert!(prefs.add_interest("Food"));
        assert!(prefs.add_interest("Art"));
        assert!(!prefs.add_interest("Food"));
        assert_eq!(prefs.interests(), &["Food".to_string(), "Art".to_string()]);
    }

    #[test]
    fn test_toggle_interest_preserves_order() {
        let mut prefs = TripPreferences::default();
        prefs.toggle_interest("History");
        prefs.toggle_interest("Food");
        prefs.toggle_interest("Nature");
        prefs.toggle_interest("Food");
        assert_eq!(prefs.interests(), &["History".to_string(), "Nature".to_string()]);

        prefs.toggle_interest("Food");
        assert_eq!(prefs.interests().last().map(String::as_str), Some("Food"));
    }

    #[test]
    fn test_effective_interests_replaces_sentinel() {
        let mut prefs = TripPreferences::default();
        prefs.add_interest("Food");
        prefs.add_interest(OTHER_INTEREST);
        prefs.other_interest = Some("  Bird watching ".to_string());
        assert_eq!(prefs.effective_interests(), vec!["Food", "Bird watching"]);

        prefs.other_interest = None;
        assert_eq!(prefs.effective_interests(), vec!["Food"]);
    }

    #[test]
    fn test_coordinates_parse() {
        let c: Coordinates = "40.4, -3.7".parse().unwrap();
        assert_eq!(c, Coordinates::new(40.4, -3.7));
        assert!("91,0".parse::<Coordinates>().is_err());
        assert!("abc".parse::<Coordinates>().is_err());
    }
}
