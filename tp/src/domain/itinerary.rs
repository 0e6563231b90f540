//! Itinerary returned by the model
//!
//! Field names mirror the JSON contract the model is constrained to
//! (camelCase on the wire). Every field is required: serde rejects a
//! response with anything missing or mistyped, and [`Itinerary::check`]
//! enforces the value ranges serde cannot express.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub itinerary: Vec<DayPlan>,
    pub justification: Justification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub description: String,
    pub estimated_cost: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Justification {
    pub interests_alignment: String,
    pub budget_alignment: String,
    pub restrictions_alignment: String,
}

impl Itinerary {
    /// Check value constraints that the type system does not carry
    ///
    /// Returns a description of the first violation found.
    pub fn check(&self) -> Result<(), String> {
        for (i, day) in self.itinerary.iter().enumerate() {
            if day.day == 0 {
                return Err(format!("itinerary[{}].day must be a positive integer", i));
            }
            for (j, activity) in day.activities.iter().enumerate() {
                activity
                    .location
                    .check()
                    .map_err(|e| format!("itinerary[{}].activities[{}].location: {}", i, j, e))?;
            }
        }
        Ok(())
    }

    /// Total number of activities across all days
    pub fn activity_count(&self) -> usize {
        self.itinerary.iter().map(|d| d.activities.len()).sum()
    }

    /// Iterate `(day, activity)` pairs in display order
    pub fn activities(&self) -> impl Iterator<Item = (&DayPlan, &Activity)> {
        self.itinerary
            .iter()
            .flat_map(|day| day.activities.iter().map(move |a| (day, a)))
    }
}

impl Location {
    fn check(&self) -> Result<(), String> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} out of range", self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude {} out of range", self.longitude));
        }
        Ok(())
    }

    /// Search link that opens this location on a map
    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}
