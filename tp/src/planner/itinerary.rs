//! Itinerary generation
//!
//! One model call per request, constrained to the itinerary JSON schema.
//! The response is parsed strictly; anything that does not fit the
//! contract is a [`ItineraryGenerationError::SchemaViolation`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ItineraryGenerationError;
use crate::config::LlmConfig;
use crate::domain::{Itinerary, Language, TripPreferences};
use crate::llm::{FinishReason, GenerateRequest, GenerativeClient, schema};
use crate::prompts::PromptBuilder;

/// Requests itineraries from a generative model
pub struct ItineraryPlanner {
    client: Arc<dyn GenerativeClient>,
    prompts: Arc<PromptBuilder>,
    model: String,
    max_output_tokens: Option<u32>,
}

impl ItineraryPlanner {
    pub fn new(client: Arc<dyn GenerativeClient>, prompts: Arc<PromptBuilder>, model: impl Into<String>) -> Self {
        Self {
            client,
            prompts,
            model: model.into(),
            max_output_tokens: None,
        }
    }

    /// Planner using the itinerary model and token cap from config
    pub fn from_config(client: Arc<dyn GenerativeClient>, prompts: Arc<PromptBuilder>, config: &LlmConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            ..Self::new(client, prompts, &config.itinerary_model)
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an itinerary for `prefs`, written in `lang`
    ///
    /// Callers validate `prefs` first. Issues exactly one request and never
    /// retries; on failure nothing is returned but the error.
    pub async fn request_itinerary(
        &self,
        prefs: &TripPreferences,
        lang: Language,
    ) -> Result<Itinerary, ItineraryGenerationError> {
        debug!(destination = %prefs.destination, %lang, model = %self.model, "request_itinerary: called");

        let prompt = self
            .prompts
            .build_itinerary(prefs, lang)
            .map_err(|e| ItineraryGenerationError::Configuration(e.to_string()))?;

        let request = GenerateRequest::new(&self.model, prompt)
            .with_schema(schema::itinerary_schema())
            .with_max_output_tokens(self.max_output_tokens);

        let response = self.client.generate(request).await.map_err(|e| {
            warn!(error = %e, "request_itinerary: model call failed");
            ItineraryGenerationError::from(e)
        })?;

        if response.finish_reason != FinishReason::Stop {
            debug!(finish_reason = ?response.finish_reason, "request_itinerary: non-stop finish");
        }

        let text = response
            .text
            .ok_or_else(|| ItineraryGenerationError::SchemaViolation("response contained no text".to_string()))?;

        let itinerary = parse_itinerary(&text).inspect_err(|e| {
            warn!(error = %e, "request_itinerary: rejected model output");
        })?;

        info!(
            days = itinerary.itinerary.len(),
            activities = itinerary.activity_count(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "request_itinerary: itinerary received"
        );
        Ok(itinerary)
    }
}

/// Parse and check the model's JSON text
pub fn parse_itinerary(text: &str) -> Result<Itinerary, ItineraryGenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ItineraryGenerationError::SchemaViolation("response text was empty".to_string()));
    }

    let itinerary: Itinerary =
        serde_json::from_str(trimmed).map_err(|e| ItineraryGenerationError::SchemaViolation(e.to_string()))?;
    itinerary.check().map_err(ItineraryGenerationError::SchemaViolation)?;
    Ok(itinerary)
}
