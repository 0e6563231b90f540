//! Grounded place information
//!
//! Asks the model about one place with web search and maps retrieval
//! enabled, optionally biased toward the user's position.

use std::sync::Arc;

use tracing::{debug, warn};

use super::LocationInfoError;
use crate::config::LlmConfig;
use crate::domain::{Coordinates, GroundingChunk, Language};
use crate::llm::{GenerateRequest, GenerativeClient, Grounding};
use crate::prompts::PromptBuilder;

/// Answer text plus the citations the model used
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationInfo {
    pub text: String,
    pub chunks: Vec<GroundingChunk>,
}

/// Fetches up-to-date details about places
pub struct LocationInfoClient {
    client: Arc<dyn GenerativeClient>,
    prompts: Arc<PromptBuilder>,
    model: String,
}

impl LocationInfoClient {
    pub fn new(client: Arc<dyn GenerativeClient>, prompts: Arc<PromptBuilder>, model: impl Into<String>) -> Self {
        Self {
            client,
            prompts,
            model: model.into(),
        }
    }

    /// Client using the info model from config
    pub fn from_config(client: Arc<dyn GenerativeClient>, prompts: Arc<PromptBuilder>, config: &LlmConfig) -> Self {
        Self::new(client, prompts, &config.info_model)
    }

    /// Look up `place` in `destination`
    ///
    /// One request, no retry. Empty answer text is an error; an empty
    /// citation list is not.
    pub async fn request_location_info(
        &self,
        place: &str,
        destination: &str,
        coords: Option<Coordinates>,
        lang: Language,
    ) -> Result<LocationInfo, LocationInfoError> {
        debug!(%place, %destination, ?coords, %lang, "request_location_info: called");

        let prompt = self
            .prompts
            .build_location_info(place, destination, lang)
            .map_err(|e| LocationInfoError::Configuration(e.to_string()))?;

        let request = GenerateRequest::new(&self.model, prompt).with_grounding(Grounding::search_and_maps(coords));

        let response = self.client.generate(request).await.map_err(|e| {
            warn!(error = %e, %place, "request_location_info: model call failed");
            LocationInfoError::from(e)
        })?;

        let text = response.text.map(|t| t.trim().to_string()).unwrap_or_default();
        if text.is_empty() {
            warn!(%place, "request_location_info: empty answer");
            return Err(LocationInfoError::EmptyResponse);
        }

        debug!(chunks = response.grounding_chunks.len(), "request_location_info: answer received");
        Ok(LocationInfo {
            text,
            chunks: response.grounding_chunks,
        })
    }
}
