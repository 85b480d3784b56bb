// ABOUTME: Parses model-written cooking tips and provides the static fallback tip list
// ABOUTME: Structured JSON first, then line-oriented parsing with enumeration markers stripped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::constants::generation::{MIN_TIP_CHARS, STATIC_TIPS_RETURNED};
use crate::models::RecipeRecord;

static LIST_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+\s*[.):]|[-*•])\s*").ok());

const GENERIC_TIPS: [&str; 5] = [
    "Read through the entire recipe before starting to ensure you have all ingredients and understand the steps.",
    "Prep all your ingredients (mise en place) before you start cooking to make the process smoother.",
    "Taste as you go and adjust seasonings according to your preference.",
    "Don't overcrowd the pan when cooking - this can lead to steaming instead of proper browning.",
    "Let meat rest for a few minutes after cooking to allow juices to redistribute for better flavor.",
];

const MAKE_AHEAD_TIP: &str =
    "This is a longer recipe - consider preparing some components ahead of time.";
const UMAMI_TIP: &str = "For extra flavor in vegetarian dishes, don't forget to season vegetables well and consider adding umami-rich ingredients.";

/// Drop a surrounding Markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn tips_from_json(value: &Value) -> Option<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.get("tips")?.as_array()?,
        _ => return None,
    };
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_owned()),
                Value::Object(map) => ["tip", "text", "description"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_str))
                    .map(|s| s.trim().to_owned()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn strip_marker(line: &str) -> String {
    let stripped = LIST_MARKER
        .as_ref()
        .map_or_else(|| line.into(), |re| re.replace(line, ""));
    stripped.trim().to_owned()
}

/// Tips from model text
///
/// A JSON object with a `tips` array (or a bare array) is used as-is.
/// Otherwise each non-blank line becomes a tip after its list marker
/// (`1.`, `2)`, `-`, `*`) is removed; lines of 10 characters or fewer are
/// dropped. May return an empty list.
#[must_use]
pub fn parse_tips(text: &str) -> Vec<String> {
    let body = strip_code_fence(text);
    if let Some(tips) = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(tips_from_json)
    {
        return tips;
    }

    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(strip_marker)
        .filter(|tip| tip.chars().count() > MIN_TIP_CHARS)
        .collect()
}

/// Static tips used whenever the model cannot answer
///
/// Recipe-specific tips (long cook time, vegetarian) come first so they
/// survive the cut to four.
#[must_use]
pub fn static_tips(recipe: &RecipeRecord) -> Vec<String> {
    let mut tips = Vec::with_capacity(GENERIC_TIPS.len() + 2);
    if recipe.ready_in_minutes > 60 {
        tips.push(MAKE_AHEAD_TIP.to_owned());
    }
    if recipe.vegetarian {
        tips.push(UMAMI_TIP.to_owned());
    }
    tips.extend(GENERIC_TIPS.iter().map(|t| (*t).to_owned()));
    tips.truncate(STATIC_TIPS_RETURNED);
    tips
}

/// The first `count` generic tips, for callers without a recipe
#[must_use]
pub fn generic_tips(count: usize) -> Vec<String> {
    GENERIC_TIPS
        .iter()
        .take(count)
        .map(|t| (*t).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_tips() {
        let tips = parse_tips(r#"{"tips": ["Sear the meat first", "Rest before slicing"]}"#);
        assert_eq!(tips, vec!["Sear the meat first", "Rest before slicing"]);
    }

    #[test]
    fn test_fenced_json_tips() {
        let tips = parse_tips("```json\n{\"tips\": [\"Salt the pasta water well\"]}\n```");
        assert_eq!(tips, vec!["Salt the pasta water well"]);
    }

    #[test]
    fn test_line_parsing_strips_markers_and_short_lines() {
        let text = "Here are tips:\n1. Preheat the oven fully before baking\n2) Use room temperature eggs\n- Stir\n\n* Keep the lid on while simmering";
        assert_eq!(
            parse_tips(text),
            vec![
                "Here are tips:",
                "Preheat the oven fully before baking",
                "Use room temperature eggs",
                "Keep the lid on while simmering",
            ]
        );
    }

    #[test]
    fn test_generic_tips() {
        assert_eq!(generic_tips(3).len(), 3);
        assert!(generic_tips(1)[0].starts_with("Read through"));
    }
}
