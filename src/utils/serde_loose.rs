// ABOUTME: Lenient serde deserializers for model-generated and relayed JSON
// ABOUTME: Accept numbers as strings, strings as numbers, and mixed-type lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Generative models and relayed payloads are loosely typed: `servings` may
//! arrive as `4`, `4.0`, or `"4 people"`; list items may be strings or
//! objects. These helpers are used with `#[serde(deserialize_with = ...)]`
//! and map anything unusable to `None` or skip it rather than failing the
//! whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Leading unsigned integer in `s`, e.g. `"4 people"` → 4
fn leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

/// `Option<u32>` from a number, numeric string, or null
///
/// # Errors
///
/// Only fails if the input is not valid JSON
pub fn u32_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32))
}

/// `Option<f64>` from a number, numeric string, or null
///
/// # Errors
///
/// Only fails if the input is not valid JSON
pub fn f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64).filter(|n| n.is_finite()))
}

/// `Option<String>` from a string or number; blank strings become `None`
///
/// # Errors
///
/// Only fails if the input is not valid JSON
pub fn string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["original", "step", "text", "instruction", "name", "tip"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(|s| s.trim().to_owned()),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

/// `Vec<String>` from an array of strings or objects; a single string becomes one item
///
/// # Errors
///
/// Only fails if the input is not valid JSON
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Some(other) => item_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}
