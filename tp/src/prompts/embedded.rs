//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when no override template
//! is found.

/// Itinerary generation prompt
pub const ITINERARY: &str = r#"You are an expert travel planner. Build a personalized, detailed and realistic itinerary from the traveler's preferences below.

**Output Language:** Write the entire response, including every title, description and justification, in {{language}}.

**Traveler Preferences:**
- Destination: {{destination}}
- Duration: {{duration}} days
- Budget: Approximately {{budget}}
- Key Interests: {{interests}}
- Specific Restrictions/Requirements: {{restrictions}}

**Instructions:**
1. **Day-by-Day Plan:** Produce a plan for every day of the trip, numbered from day 1, each with a short title and an ordered list of timed activities.
2. **Feasibility:** The schedule must be achievable. Account for travel time between locations, opening hours and a comfortable pace. Never suggest a place that would be closed at the proposed time.
3. **Budget:** Choose activities and dining that fit the stated budget, and give an estimated cost for each activity.
4. **Interests:** The activities must reflect the traveler's key interests.
5. **Justification:** Explain how the plan aligns with the traveler's interests, with the budget, and with the stated restrictions or requirements.
6. **Current Knowledge:** Draw on the most current travel guides, visitor reviews and local information such as opening hours and ticket prices. Descriptions should be engaging and informative.
7. **Location Data:** For every activity, give the place name and its approximate latitude and longitude.

**Output Format:**
Respond ONLY with a single valid JSON object that matches the required schema: a top-level "itinerary" array of days (each with "day", "title" and "activities", where every activity has "time", "description", "estimatedCost" and a "location" with "name", "latitude" and "longitude") and a top-level "justification" object with "interestsAlignment", "budgetAlignment" and "restrictionsAlignment". Do not add any text, explanation or code fences before or after the JSON object.
"#;

/// Grounded place information prompt
pub const LOCATION_INFO: &str = r#"Provide up-to-date information for a traveler about "{{place}}" in {{destination}}. Include details such as opening hours, typical visitor reviews, and any recent news or tips. Respond entirely in {{language}}.
"#;

/// Get an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "itinerary" => Some(ITINERARY),
        "location-info" => Some(LOCATION_INFO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded() {
        assert!(get_embedded("itinerary").is_some());
        assert!(get_embedded("location-info").is_some());
        assert!(get_embedded("nonexistent").is_none());
    }

    #[test]
    fn test_itinerary_names_every_schema_field() {
        for field in [
            "itinerary",
            "day",
            "title",
            "activities",
            "time",
            "description",
            "estimatedCost",
            "location",
            "name",
            "latitude",
            "longitude",
            "justification",
            "interestsAlignment",
            "budgetAlignment",
            "restrictionsAlignment",
        ] {
            assert!(ITINERARY.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
    }
}
