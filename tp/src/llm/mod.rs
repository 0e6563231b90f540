//! Generative model client module
//!
//! Provides the [`GenerativeClient`] abstraction, the Gemini implementation
//! and the response schema used for itinerary generation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
pub mod schema;
mod types;

pub use client::GenerativeClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{FinishReason, GenerateRequest, GenerateResponse, Grounding, TokenUsage};

use crate::config::LlmConfig;

/// Create a generative client based on the provider specified in config
///
/// Supports the "gemini" provider.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn GenerativeClient>, LlmError> {
    debug!(provider = %config.provider, "create_client: called");
    match config.provider.as_str() {
        "gemini" | "google" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini",
                other
            )))
        }
    }
}
