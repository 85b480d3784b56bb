// ABOUTME: Normalizer for recipe documents the generative model wrote
// ABOUTME: Fills defaults, parses cook time, and turns free-text lines into ingredients and steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use regex::Regex;

use crate::ai::{parse_cook_time, AiRecipeDocument};
use crate::constants::recipe_defaults::{
    AI_IMAGE, AI_SOURCE_NAME, AI_SUMMARY, AI_TITLE, DEFAULT_SERVINGS,
};
use crate::models::{Difficulty, Ingredient, InstructionGroup, Provenance, RecipeId, RecipeRecord};

/// Leading quantity plus an optional measuring unit: "2 cups ", "1/2 tbsp ", "3 "
static QUANTITY_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\d\s/.,½¼¾⅓⅔-]+(?:(?:cups?|tablespoons?|tbsps?|teaspoons?|tsps?|ounces?|oz|pounds?|lbs?|grams?|g|kilograms?|kg|milliliters?|ml|liters?|l|cloves?|pinch(?:es)?|dash(?:es)?|cans?|slices?|sticks?)\.?\s+)?",
    )
    .ok()
});

/// Ingredient name with the leading quantity and unit removed
pub(super) fn ingredient_name(line: &str) -> String {
    let stripped = QUANTITY_PREFIX
        .as_ref()
        .map_or(line, |re| re.find(line).map_or(line, |m| &line[m.end()..]))
        .trim();
    if stripped.is_empty() {
        line.trim().to_owned()
    } else {
        stripped.to_owned()
    }
}

/// One ingredient per free-text line; amount and unit stay blank
pub(super) fn ingredients_from_lines(lines: Vec<String>) -> Vec<Ingredient> {
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| Ingredient {
            id: index as u64 + 1,
            name: ingredient_name(&line),
            original: line,
            amount: None,
            unit: String::new(),
        })
        .collect()
}

/// Normalize a model-written recipe document
///
/// The id is always the `ai-generated` sentinel. Missing fields get the
/// documented defaults: servings 4, difficulty Medium, 30 minutes.
#[must_use]
pub fn normalize_generated(document: AiRecipeDocument) -> RecipeRecord {
    RecipeRecord {
        id: RecipeId::ai_generated(),
        title: document.title.unwrap_or_else(|| AI_TITLE.to_owned()),
        summary: document.description.unwrap_or_else(|| AI_SUMMARY.to_owned()),
        image: Some(AI_IMAGE.to_owned()),
        ready_in_minutes: parse_cook_time(document.cook_time.as_deref()),
        servings: document
            .servings
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_SERVINGS),
        difficulty: document
            .difficulty
            .as_deref()
            .map_or_else(Difficulty::default, Difficulty::from_str_lossy),
        ingredients: ingredients_from_lines(document.ingredients),
        instructions: vec![InstructionGroup::from_lines(document.instructions)],
        nutrition: Vec::new(),
        vegetarian: false,
        vegan: false,
        gluten_free: false,
        dairy_free: false,
        provenance: Provenance::AiGenerated,
        source_name: Some(AI_SOURCE_NAME.to_owned()),
        source_url: None,
        used_ingredient_count: None,
        missed_ingredient_count: None,
        tips: document.tips,
        health_score: 0.0,
        price_per_serving: 0.0,
    }
}
