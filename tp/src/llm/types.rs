//! Request and response types for generative model calls

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, GroundingChunk};

/// Retrieval tools the model may use to ground its answer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grounding {
    pub web_search: bool,
    pub maps: bool,
    /// Bias retrieval toward this point
    pub lat_lng: Option<Coordinates>,
}

impl Grounding {
    /// Web search plus maps, optionally biased to a location
    pub fn search_and_maps(lat_lng: Option<Coordinates>) -> Self {
        Self {
            web_search: true,
            maps: true,
            lat_lng,
        }
    }
}

/// A single-turn generation request
///
/// Every request is independent; no conversation state is carried between
/// calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Model identifier, e.g. `gemini-2.5-pro`
    pub model: String,
    /// The full user prompt
    pub prompt: String,
    /// When set, the response is constrained to JSON matching this schema
    pub response_schema: Option<serde_json::Value>,
    /// When set, the model may ground its answer with retrieval tools
    pub grounding: Option<Grounding>,
    /// Cap on output tokens
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_schema: None,
            grounding: None,
            max_output_tokens: None,
        }
    }

    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_grounding(mut self, grounding: Grounding) -> Self {
        self.grounding = Some(grounding);
        self
    }

    pub fn with_max_output_tokens(mut self, max: Option<u32>) -> Self {
        self.max_output_tokens = max;
        self
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    #[default]
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
}

impl FinishReason {
    pub fn from_gemini(s: &str) -> Self {
        match s {
            "STOP" | "FINISH_REASON_UNSPECIFIED" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => Self::Safety,
            "RECITATION" => Self::Recitation,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Response from a generation request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateResponse {
    /// Concatenated text parts of the first candidate
    pub text: Option<String>,
    /// Citations from the first candidate's grounding metadata
    pub grounding_chunks: Vec<GroundingChunk>,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl GenerateResponse {
    /// Plain text response with no citations
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}
