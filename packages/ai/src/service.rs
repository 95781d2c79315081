// ABOUTME: HTTP client for the Gemini generateContent endpoint
// ABOUTME: Handles API requests, error mapping, structured JSON parsing, and usage logging

use bionic_config::GatewayConfig;
use bionic_core::truncate;
use bionic_prompts::PromptError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::types::{GenerateContentRequest, GenerateContentResponse};

const API_VERSION: &str = "v1beta";

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// Client for making generation calls to Gemini
pub struct GeminiService {
    client: Client,
    config: GatewayConfig,
}

impl GeminiService {
    /// Create HTTP client with timeout configuration
    fn create_client(config: &GatewayConfig) -> Client {
        Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new service from explicit gateway configuration
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Self::create_client(&config),
            config,
        }
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.config.base_url, API_VERSION, self.config.model
        )
    }

    /// Makes a single generateContent round trip
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AIServiceResult<AIResponse<GenerateContentResponse>> {
        let api_key = self.config.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;

        info!(
            "Making Gemini API request: model={}, turns={}, tools={}, structured={}",
            self.config.model,
            request.contents.len(),
            request.tools.len(),
            request.generation_config.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(
                        "Gemini API request timed out after {}s",
                        self.config.request_timeout.as_secs()
                    );
                    AIServiceError::ApiError(format!(
                        "Request timed out after {} seconds. The AI service may be overloaded or unavailable.",
                        self.config.request_timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    error!("Failed to connect to Gemini API: {}", e);
                    AIServiceError::ApiError(format!(
                        "Connection failed: {}. Please check your internet connection.",
                        e
                    ))
                } else {
                    error!("Gemini API request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        info!("Received response from Gemini API: status={}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        if let Some(reason) = gemini_response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            warn!("Gemini blocked the prompt: {}", reason);
            return Err(AIServiceError::ApiError(format!("Prompt blocked: {}", reason)));
        }

        if gemini_response.candidates.is_empty() {
            return Err(AIServiceError::InvalidResponse);
        }

        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();
        info!(
            "Gemini usage: input_tokens={}, output_tokens={}, total={}",
            usage.input_tokens,
            usage.output_tokens,
            usage.total_tokens()
        );

        Ok(AIResponse {
            data: gemini_response,
            usage,
        })
    }

    /// Makes a schema-constrained call and parses the reply text as JSON
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        request: &GenerateContentRequest,
    ) -> AIServiceResult<AIResponse<T>> {
        let response = self.generate_content(request).await?;
        let text = response.data.text().ok_or(AIServiceError::InvalidResponse)?;

        let data = parse_json_reply(&text)?;
        Ok(AIResponse {
            data,
            usage: response.usage,
        })
    }
}

/// Parse a JSON reply, tolerating surrounding markdown code fences
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> AIServiceResult<T> {
    let json_text = strip_code_fences(text);

    serde_json::from_str(json_text).map_err(|e| {
        error!(
            "JSON parsing failed: {}. JSON snippet: {}",
            e,
            truncate(json_text, 500)
        );
        AIServiceError::ParseError(format!("Failed to parse JSON: {}", e))
    })
}

/// Strip markdown code fences if present (```json ... ```)
fn strip_code_fences(text: &str) -> &str {
    let cleaned_text = text.trim();
    if !cleaned_text.starts_with("```") {
        return cleaned_text;
    }

    // Find the first newline after opening fence
    let start = cleaned_text.find('\n').map(|i| i + 1).unwrap_or(cleaned_text.len());
    // Find the closing fence (search from start position to avoid finding opening fence)
    let end = cleaned_text[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned_text.len());
    cleaned_text[start..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::MarketingContent;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```\n"), "[1, 2]");
    }

    #[test]
    fn test_parse_json_reply_errors_on_malformed_text() {
        let result = parse_json_reply::<MarketingContent>("Sorry, I can't do that.");
        assert!(matches!(result, Err(AIServiceError::ParseError(_))));
    }

    #[test]
    fn test_parse_json_reply_errors_on_missing_fields() {
        let result = parse_json_reply::<MarketingContent>(r#"{"professionalListing": "x"}"#);
        assert!(matches!(result, Err(AIServiceError::ParseError(_))));
    }

    #[test]
    fn test_endpoint_uses_model_and_base_url() {
        let service = GeminiService::new(
            GatewayConfig::default()
                .with_base_url("http://localhost:9999/")
                .with_model("gemini-test"),
        );
        assert_eq!(
            service.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(service.model(), "gemini-test");
    }
}
