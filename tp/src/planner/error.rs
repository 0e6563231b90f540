//! Failure types for planning operations

use thiserror::Error;

use crate::llm::LlmError;
use crate::domain::Language;
use crate::locale::Messages;

/// Why an itinerary request produced no itinerary
#[derive(Debug, Error)]
pub enum ItineraryGenerationError {
    /// The request never produced a usable response
    #[error("transport failure: {0}")]
    Transport(LlmError),

    /// The response did not match the itinerary contract
    #[error("response violated the itinerary schema: {0}")]
    SchemaViolation(String),

    /// The client is not set up to make requests at all
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<LlmError> for ItineraryGenerationError {
    fn from(err: LlmError) -> Self {
        if err.is_configuration() {
            Self::Configuration(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

impl ItineraryGenerationError {
    /// Banner text for the user; internal detail stays in the log
    pub fn user_message(&self, lang: Language) -> &'static str {
        let messages = Messages::for_language(lang);
        match self {
            Self::Configuration(_) => messages.configuration_error,
            Self::Transport(_) | Self::SchemaViolation(_) => messages.generation_error,
        }
    }
}

/// Why a place info lookup produced nothing
#[derive(Debug, Error)]
pub enum LocationInfoError {
    #[error("transport failure: {0}")]
    Transport(LlmError),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<LlmError> for LocationInfoError {
    fn from(err: LlmError) -> Self {
        if err.is_configuration() {
            Self::Configuration(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

impl LocationInfoError {
    pub fn user_message(&self, lang: Language) -> &'static str {
        let messages = Messages::for_language(lang);
        match self {
            Self::Configuration(_) => messages.configuration_error,
            Self::Transport(_) | Self::EmptyResponse => messages.fetch_error,
        }
    }
}
