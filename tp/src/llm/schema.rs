//! Response schema for schema-constrained itinerary generation
//!
//! Expressed in the OpenAPI subset the Gemini API accepts. Property names
//! must stay identical to the serde names on [`crate::domain::Itinerary`].

use serde_json::{Value, json};

/// Schema the itinerary response must match
pub fn itinerary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "itinerary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "title": { "type": "STRING" },
                        "activities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "time": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "estimatedCost": { "type": "STRING" },
                                    "location": {
                                        "type": "OBJECT",
                                        "properties": {
                                            "name": { "type": "STRING" },
                                            "latitude": { "type": "NUMBER" },
                                            "longitude": { "type": "NUMBER" }
                                        },
                                        "required": ["name", "latitude", "longitude"]
                                    }
                                },
                                "required": ["time", "description", "estimatedCost", "location"]
                            }
                        }
                    },
                    "required": ["day", "title", "activities"]
                }
            },
            "justification": {
                "type": "OBJECT",
                "properties": {
                    "interestsAlignment": { "type": "STRING" },
                    "budgetAlignment": { "type": "STRING" },
                    "restrictionsAlignment": { "type": "STRING" }
                },
                "required": ["interestsAlignment", "budgetAlignment", "restrictionsAlignment"]
            }
        },
        "required": ["itinerary", "justification"]
    })
}
