// ABOUTME: Generative-text provider integration and proxy request bodies
// ABOUTME: Gemini wire types plus the JSON bodies exchanged with the proxy AI endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generative Text
//!
//! Direct calls go to Gemini's `generateContent`; proxied calls go to the
//! proxy's `/gemini` (tips) and `/gemini-search` (recipe synthesis)
//! endpoints, which hold the key server-side.

/// Google Gemini wire format
pub mod gemini;

pub use gemini::{GeminiRequest, GeminiResponse, GenerationConfig, SERVICE_NAME};

use serde::{Deserialize, Serialize};

/// Body for `POST {proxy}/gemini`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsProxyRequest {
    /// Prompt text
    #[serde(default)]
    pub prompt: String,
}

/// Body for `POST {proxy}/gemini-search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProxyRequest {
    /// Prompt text
    #[serde(default)]
    pub prompt: String,
    /// Id of the recipe that could not be found
    #[serde(default)]
    pub recipe_id: Option<String>,
    /// Optional recipe name hint
    #[serde(default)]
    pub recipe_name: Option<String>,
}
