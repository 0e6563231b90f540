//! GenerativeClient trait definition

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, LlmError};

/// Stateless generative model client - each call is independent
///
/// Implementations issue exactly one network request per call and never
/// retry on their own; a retry is always a fresh call by the user.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send a single generation request and wait for the full response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
