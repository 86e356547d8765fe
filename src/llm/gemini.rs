// ABOUTME: Google Gemini LLM provider implementation for structured plan generation
// ABOUTME: Calls the generateContent REST endpoint with optional JSON output mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `GEMINI_BASE_URL` overrides the endpoint (useful for
//! proxies and local stubs).
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_diet_planner::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use pierre_diet_planner::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new("api-key")?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a breakfast")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage,
};
use crate::config::LlmConfig;
use crate::constants::defaults;
use crate::errors::{AppError, ErrorCode};

/// Header carrying the API key (keeps the key out of request URLs)
const API_KEY_HEADER: &str = "x-goog-api-key";

const JSON_MIME_TYPE: &str = "application/json";

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
}

impl GeminiProvider {
    /// Create a provider with default endpoint, model and timeout
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        Self::build(
            api_key.into(),
            defaults::GEMINI_BASE_URL.to_owned(),
            defaults::LLM_MODEL.to_owned(),
            Duration::from_secs(defaults::LLM_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Create a provider from server configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if no API key is configured, or `ConfigError`
    /// if the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "GEMINI_API_KEY environment variable not set",
            )
        })?;
        Self::build(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn build(
        api_key: String,
        base_url: String,
        default_model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::config("Gemini API key is empty"));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            default_model,
        })
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Convert chat messages to Gemini format, splitting out the system instruction
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::with_capacity(messages.len());
        let mut system_parts = Vec::new();

        for message in messages {
            let part = ContentPart {
                text: message.content.clone(),
            };
            if message.role == MessageRole::System {
                system_parts.push(part);
            } else {
                contents.push(GeminiContent {
                    role: Some(Self::convert_role(message.role).to_owned()),
                    parts: vec![part],
                });
            }
        }

        let system_instruction = (!system_parts.is_empty()).then_some(GeminiContent {
            role: None,
            parts: system_parts,
        });
        (contents, system_instruction)
    }

    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                candidate_count: 1,
                response_mime_type: request.json_response.then_some(JSON_MIME_TYPE),
            }),
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .ok_or_else(|| AppError::external_service("Gemini", "No content in response"))?;

        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            return Err(AppError::external_service("Gemini", "Empty response text"));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key ({status})"),
            ),
            500..=599 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Gemini API unavailable ({status}): {message}"),
            ),
            _ => AppError::external_service("Gemini", format!("API error ({status}): {message}")),
        }
    }

    /// Turn "Please retry in 6.4s" into a user-facing message
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil().max(1.0) as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }

    fn map_transport_error(err: reqwest::Error) -> AppError {
        let message = if err.is_timeout() {
            "Gemini request timed out".to_owned()
        } else {
            format!("Gemini request failed: {}", err.without_url())
        };
        AppError::new(ErrorCode::ExternalServiceUnavailable, message)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured_output()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!(json = request.json_response, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(Self::map_transport_error)?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("Gemini", format!("Unreadable response: {e}"))
            })?;

        if let Some(error) = gemini_response.error.as_ref() {
            return Err(AppError::external_service("Gemini", error.message.clone()));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(?usage, "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
