//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the generative model
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Missing credentials cannot be fixed by trying again
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::MissingApiKey(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configuration() {
        assert!(LlmError::MissingApiKey("GEMINI_API_KEY".to_string()).is_configuration());
        assert!(!LlmError::Timeout(Duration::from_secs(30)).is_configuration());
        assert!(!LlmError::InvalidResponse("Bad JSON".to_string()).is_configuration());
    }

    #[test]
    fn test_missing_key_message_names_variable() {
        let err = LlmError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
