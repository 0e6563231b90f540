//! Google Gemini API client implementation
//!
//! Implements the GenerativeClient trait for the `generateContent`
//! endpoint, covering schema-constrained JSON output and search/maps
//! grounding.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FinishReason, GenerateRequest, GenerateResponse, GenerativeClient, LlmError, TokenUsage};
use crate::config::LlmConfig;
use crate::domain::GroundingChunk;

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|_| LlmError::MissingApiKey(config.api_key_env.clone()))?;

        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Build the request body for the generateContent API
    fn build_request_body(&self, request: &GenerateRequest) -> serde_json::Value {
        debug!(model = %request.model, "build_request_body: called");
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(schema) = &request.response_schema {
            debug!("build_request_body: schema-constrained JSON output");
            generation_config.insert("responseMimeType".to_string(), serde_json::json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }
        if let Some(max) = request.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), serde_json::json!(max));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = serde_json::Value::Object(generation_config);
        }

        if let Some(grounding) = &request.grounding {
            debug!(?grounding, "build_request_body: grounding enabled");
            let mut tools = Vec::new();
            if grounding.web_search {
                tools.push(serde_json::json!({ "googleSearch": {} }));
            }
            if grounding.maps {
                tools.push(serde_json::json!({ "googleMaps": {} }));
            }
            if !tools.is_empty() {
                body["tools"] = serde_json::Value::Array(tools);
            }
            if let Some(coords) = grounding.lat_lng {
                body["toolConfig"] = serde_json::json!({
                    "retrievalConfig": {
                        "latLng": {
                            "latitude": coords.lat,
                            "longitude": coords.lon,
                        }
                    }
                });
            }
        }

        body
    }

    /// Parse the Gemini API response
    fn parse_response(&self, api_response: GeminiResponse) -> Result<GenerateResponse, LlmError> {
        debug!(candidates = api_response.candidates.len(), "parse_response: called");

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        let Some(candidate) = api_response.candidates.into_iter().next() else {
            let reason = api_response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            debug!(%reason, "parse_response: empty candidate list");
            return Err(LlmError::InvalidResponse(format!("Model returned no candidates: {}", reason)));
        };

        let text: String = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        let finish_reason = candidate
            .finish_reason
            .as_deref()
            .map(FinishReason::from_gemini)
            .unwrap_or_default();

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();

        Ok(GenerateResponse {
            text: if text.is_empty() { None } else { Some(text) },
            grounding_chunks,
            finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        debug!(model = %request.model, prompt_len = request.prompt.len(), "generate: called");
        let url = self.endpoint(&request.model);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.clone())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("generate: timed out");
                    LlmError::Timeout(self.timeout)
                } else {
                    debug!(error = %e, "generate: network error");
                    LlmError::Network(e)
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            debug!("generate: rate limited (429)");
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
            });
        }

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = api_error_message(&text);
            warn!(%status, %message, "generate: API error");
            return Err(LlmError::ApiError { status, message });
        }

        debug!("generate: success");
        let text = response.text().await?;
        let api_response: GeminiResponse = serde_json::from_str(&text)?;
        self.parse_response(api_response)
    }
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::llm::{Grounding, schema::itinerary_schema};

    fn client() -> GeminiClient {
        GeminiClient {
            api_key: "test-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            http: Client::new(),
            timeout: Duration::from_secs(120),
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client().endpoint("gemini-2.5-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_build_request_body_plain() {
        let body = client().build_request_body(&GenerateRequest::new("gemini-2.5-flash", "Hello"));

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("tools").is_none());
        assert!(body.get("toolConfig").is_none());
    }

    #[test]
    fn test_build_request_body_with_schema() {
        let request = GenerateRequest::new("gemini-2.5-pro", "Plan").with_schema(itinerary_schema());
        let body = client().build_request_body(&request);

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            serde_json::json!(["itinerary", "justification"])
        );
    }

    #[test]
    fn test_build_request_body_with_grounding() {
        let request = GenerateRequest::new("gemini-2.5-flash", "Info")
            .with_grounding(Grounding::search_and_maps(Some(Coordinates::new(40.4, -3.7))));
        let body = client().build_request_body(&request);

        assert_eq!(body["tools"][0], serde_json::json!({ "googleSearch": {} }));
        assert_eq!(body["tools"][1], serde_json::json!({ "googleMaps": {} }));
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 40.4);
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["longitude"], -3.7);
    }

    #[test]
    fn test_build_request_body_grounding_without_bias() {
        let request =
            GenerateRequest::new("gemini-2.5-flash", "Info").with_grounding(Grounding::search_and_maps(None));
        let body = client().build_request_body(&request);

        assert!(body["tools"].is_array());
        assert!(body.get("toolConfig").is_none());
    }

    #[test]
    fn test_parse_response_text_and_chunks() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "Open 9-5. " },
                    { "text": "Busy on weekends." }
                ]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "A" } },
                        { "maps": { "uri": "https://maps.example", "title": "M" } }
                    ]
                }
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34, "totalTokenCount": 46 }
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let response = client().parse_response(parsed).unwrap();

        assert_eq!(response.text.as_deref(), Some("Open 9-5. Busy on weekends."));
        assert_eq!(response.grounding_chunks.len(), 2);
        assert_eq!(response.grounding_chunks[1].title(), Some("M"));
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 34);
    }

    #[test]
    fn test_parse_response_no_candidates() {
        let parsed: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let err = client().parse_response(parsed).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_parse_response_empty_text() {
        let parsed: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#).unwrap();
        let response = client().parse_response(parsed).unwrap();
        assert!(response.text.is_none());
        assert_eq!(response.finish_reason, FinishReason::MaxTokens);
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid");
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }
}
