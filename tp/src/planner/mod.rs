//! Model-backed planning operations
//!
//! - [`ItineraryPlanner`] - turns preferences into a validated [`Itinerary`](crate::domain::Itinerary)
//! - [`LocationInfoClient`] - grounded, up-to-date details about one place
//! - [`InfoPanel`] - per-activity state machine for the info toggle

mod error;
mod itinerary;
mod location;
mod panel;

pub use error::{ItineraryGenerationError, LocationInfoError};
pub use itinerary::{ItineraryPlanner, parse_itinerary};
pub use location::{LocationInfo, LocationInfoClient};
pub use panel::{InfoPanel, PanelAction, PanelState};
