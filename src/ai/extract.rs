// ABOUTME: Best-effort extraction of a JSON recipe object from free-text model output
// ABOUTME: Balanced-brace scan aware of strings and escapes, with a greedy first-to-last-brace fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Models wrap JSON in prose and code fences. [`parse_recipe_document`]
//! tries every balanced `{...}` block in order, then the greedy span from
//! the first `{` to the last `}`, and returns the first that deserializes.
//! When none does it fails with a `ParseError`; there is no partial result.

use serde::{Deserialize, Serialize};

use crate::constants::messages::AI_RECIPE_FAILED;
use crate::errors::{AppError, AppResult};
use crate::utils::serde_loose;

/// Recipe document as the model is asked to write it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiRecipeDocument {
    /// Recipe name
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub title: Option<String>,
    /// Short description
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub description: Option<String>,
    /// Free-text duration, e.g. "1 hour 30 minutes"
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub cook_time: Option<String>,
    /// Servings
    #[serde(deserialize_with = "serde_loose::u32_opt")]
    pub servings: Option<u32>,
    /// Easy, Medium, or Hard
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub difficulty: Option<String>,
    /// Ingredient lines
    #[serde(deserialize_with = "serde_loose::string_list")]
    pub ingredients: Vec<String>,
    /// Instruction lines
    #[serde(deserialize_with = "serde_loose::string_list")]
    pub instructions: Vec<String>,
    /// Tips
    #[serde(deserialize_with = "serde_loose::string_list")]
    pub tips: Vec<String>,
    /// Source label
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub source: Option<String>,
}

/// End index (exclusive) of the balanced object starting at `start`
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Balanced `{...}` blocks in order of their opening brace
fn balanced_blocks(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut cursor = 0usize;
    std::iter::from_fn(move || {
        while cursor < bytes.len() {
            let start = cursor + text[cursor..].find('{')?;
            cursor = start + 1;
            if let Some(end) = balanced_end(bytes, start) {
                cursor = end;
                return Some(&text[start..end]);
            }
        }
        None
    })
}

/// Span from the first `{` to the last `}`
fn greedy_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// First JSON object embedded in `text`, if any
///
/// Prefers a balanced block that parses as JSON; falls back to the greedy
/// span even if it does not parse, so callers can report what was found.
#[must_use]
pub fn extract_json_block(text: &str) -> Option<&str> {
    balanced_blocks(text)
        .find(|block| serde_json::from_str::<serde_json::Value>(block).is_ok())
        .or_else(|| greedy_block(text))
}

/// Parse the recipe object out of model text
///
/// # Errors
///
/// Returns `ParseError` when no embedded object deserializes into a recipe
pub fn parse_recipe_document(text: &str) -> AppResult<AiRecipeDocument> {
    let parsed = balanced_blocks(text)
        .chain(greedy_block(text))
        .filter_map(|block| serde_json::from_str::<serde_json::Value>(block).ok())
        .filter(serde_json::Value::is_object)
        .find_map(|value| serde_json::from_value::<AiRecipeDocument>(value).ok());

    parsed.ok_or_else(|| {
        AppError::parse(AI_RECIPE_FAILED).with_details(serde_json::json!({
            "reason": "no JSON object found in model output",
            "output_chars": text.chars().count(),
        }))
    })
}
