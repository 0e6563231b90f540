//! Domain types for the trip planner
//!
//! - [`TripPreferences`] - what the user asked for
//! - [`Itinerary`] - what the model produced, validated on receipt
//! - [`GroundingChunk`] - citations attached to a place info panel
//! - [`Language`] - output language, passed explicitly everywhere

mod grounding;
mod itinerary;
mod language;
mod preferences;

pub use grounding::{GroundingChunk, MapsSource, PlaceAnswerSource, ReviewSnippet, WebSource};
pub use itinerary::{Activity, DayPlan, Itinerary, Justification, Location};
pub use language::Language;
pub use preferences::{Coordinates, INTEREST_OPTIONS, OTHER_INTEREST, TripPreferences};
