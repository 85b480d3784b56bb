// ABOUTME: Google Gemini generateContent wire format, request construction, and text extraction
// ABOUTME: Maps Gemini error payloads to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini
//!
//! Only the non-streaming `generateContent` method is used. A request is a
//! single user turn with sampling parameters; the answer text lives at
//! `candidates[0].content.parts[0].text`.
//!
//! ## Configuration
//!
//! - `CHEFMATE_GEMINI_BASE_URL`: API root (default `v1beta`)
//! - `CHEFMATE_GEMINI_MODEL`: model name (default `gemini-pro`)

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::endpoints::GEMINI_KEY_PARAM;
use crate::constants::generation;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::http::HttpRequest;

/// Service label used in errors and logs
pub const SERVICE_NAME: &str = "Gemini API";

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns (a single user turn here)
    pub contents: Vec<GeminiContent>,
    /// Sampling parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role, omitted for single-turn requests
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// Text part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPart {
    /// Text payload
    #[serde(default)]
    pub text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Top-k sampling
    pub top_k: u32,
    /// Nucleus sampling
    pub top_p: f32,
    /// Output token cap
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Sampling parameters with the given output cap
    #[must_use]
    pub const fn with_max_tokens(max_output_tokens: u32) -> Self {
        Self {
            temperature: generation::TEMPERATURE,
            top_k: generation::TOP_K,
            top_p: generation::TOP_P,
            max_output_tokens,
        }
    }

    /// Parameters for cooking tips
    #[must_use]
    pub const fn tips() -> Self {
        Self::with_max_tokens(generation::TIPS_MAX_OUTPUT_TOKENS)
    }

    /// Parameters for recipe synthesis
    #[must_use]
    pub const fn recipe() -> Self {
        Self::with_max_tokens(generation::RECIPE_MAX_OUTPUT_TOKENS)
    }
}

/// Gemini API response structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidates, usually one
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    /// Error payload on failure
    #[serde(default)]
    pub error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Finish reason (STOP, MAX_TOKENS, SAFETY)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// API error response from Gemini
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiError {
    /// Error message
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Request construction and response handling
// ============================================================================

impl GeminiRequest {
    /// Single-turn request for `prompt`
    #[must_use]
    pub fn for_prompt(prompt: &str, config: GenerationConfig) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: None,
                parts: vec![ContentPart {
                    text: Some(prompt.to_owned()),
                }],
            }],
            generation_config: Some(config),
        }
    }
}

/// Direct endpoint for one model
///
/// Holds no credential; the key is supplied per request.
#[derive(Debug, Clone)]
pub struct GeminiEndpoint {
    base_url: String,
    model: String,
}

impl GeminiEndpoint {
    /// Endpoint for `model` under `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    /// Model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the API URL for a method, authenticated with `api_key`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid
    pub fn build_url(&self, method: &str, api_key: &str) -> AppResult<Url> {
        let raw = format!("{}/models/{}:{method}", self.base_url, self.model);
        let mut url = Url::parse(&raw).map_err(|e| {
            AppError::config_invalid(format!("Invalid Gemini URL '{raw}': {e}")).with_source(e)
        })?;
        url.query_pairs_mut().append_pair(GEMINI_KEY_PARAM, api_key);
        Ok(url)
    }

    /// `generateContent` request for `prompt`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or body cannot be built
    pub fn generate_request(
        &self,
        api_key: &str,
        prompt: &str,
        config: GenerationConfig,
    ) -> AppResult<HttpRequest> {
        let url = self.build_url("generateContent", api_key)?;
        HttpRequest::post_json(url, &GeminiRequest::for_prompt(prompt, config))
    }
}

/// Extract the answer text from a successful response body
///
/// # Errors
///
/// Returns a parse error if the body is not a Gemini response or carries no text
pub fn extract_text(body: &str) -> AppResult<String> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| AppError::parse(format!("Malformed Gemini response: {e}")))?;

    if let Some(error) = response.error {
        return Err(AppError::parse(format!("Gemini returned an error: {}", error.message)));
    }

    response
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.clone())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::parse("No content in Gemini response"))
}

/// Map a non-success Gemini response to an error
#[must_use]
pub fn map_api_error(status: u16, response_text: &str) -> AppError {
    let message = serde_json::from_str::<GeminiResponse>(response_text)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| response_text.to_owned(), |e| e.message);

    match status {
        429 => AppError::new(
            ErrorCode::ExternalServiceError,
            "AI service quota exceeded. Please wait a moment and try again.",
        )
        .with_status(status),
        _ => AppError::http_status(SERVICE_NAME, status, message),
    }
}
