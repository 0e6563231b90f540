//! Prompt templates and rendering
//!
//! Templates are handlebars; embedded defaults can be overridden per file
//! from a configured directory.

mod builder;
pub mod embedded;

pub use builder::{ItineraryPromptContext, LocationInfoPromptContext, PromptBuilder};
