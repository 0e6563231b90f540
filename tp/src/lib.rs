//! Trip Planner - generative travel itineraries
//!
//! Collects trip preferences, asks a generative model for a day-by-day
//! itinerary constrained to a JSON schema, and fetches grounded, current
//! details about individual places on demand.
//!
//! # Core Concepts
//!
//! - **Fail Closed**: Model output is deserialized into strict types; anything
//!   off-contract is an error, never a partial itinerary
//! - **One Call, No Retry**: Every request is a single model call; retrying is
//!   the user's choice
//! - **Explicit Language**: The output language is passed through every call
//!
//! # Modules
//!
//! - [`places`] - Place dataset and destination suggestion matching
//! - [`suggest`] - Keyboard navigation over suggestions
//! - [`validation`] - Trip preference validation
//! - [`prompts`] - Prompt templates
//! - [`planner`] - Itinerary generation and place info lookups
//! - [`llm`] - Generative client trait and Gemini implementation
//! - [`export`] - CSV and printable text output
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Interactive terminal UI

pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod geo;
pub mod llm;
pub mod locale;
pub mod places;
pub mod planner;
pub mod prompts;
pub mod suggest;
pub mod tui;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use domain::{Coordinates, GroundingChunk, Itinerary, Language, TripPreferences};
pub use llm::{GeminiClient, GenerateRequest, GenerateResponse, GenerativeClient, LlmError};
pub use places::{PlaceRecord, SuggestionMatcher, match_places};
pub use planner::{
    InfoPanel, ItineraryGenerationError, ItineraryPlanner, LocationInfo, LocationInfoClient, LocationInfoError,
    PanelAction, PanelState,
};
pub use prompts::PromptBuilder;
pub use suggest::{NavOutcome, NavState, SuggestionBox};
pub use validation::{PreferencesValidator, ValidationErrors};
