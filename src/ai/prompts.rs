// ABOUTME: Prompt templates for cooking tips and recipe synthesis loaded at compile time
// ABOUTME: Templates live in markdown files and are filled with recipe details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::RecipeRecord;

const TIPS_TEMPLATE: &str = include_str!("prompts/tips.md");
const RECIPE_TEMPLATE: &str = include_str!("prompts/recipe.md");

/// Prompt asking for 3-5 tips about `recipe`, mentioning what the user has on hand
#[must_use]
pub fn tips_prompt(recipe: &RecipeRecord, user_ingredients: &[String]) -> String {
    let needed = recipe.ingredient_names();
    let needed = if needed.is_empty() {
        "Various ingredients".to_owned()
    } else {
        needed.join(", ")
    };
    let has = if user_ingredients.is_empty() {
        "Not specified".to_owned()
    } else {
        user_ingredients.join(", ")
    };

    TIPS_TEMPLATE
        .replace("{title}", &recipe.title)
        .replace("{minutes}", &recipe.ready_in_minutes.to_string())
        .replace("{difficulty}", recipe.difficulty.as_str())
        .replace("{ingredients}", &needed)
        .replace("{user_ingredients}", &has)
}

/// Prompt asking the model to invent a full recipe as JSON
#[must_use]
pub fn recipe_prompt(recipe_id: &str, name_hint: Option<&str>) -> String {
    let hint = name_hint
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| format!("The recipe might be called \"{n}\" or something similar."))
        .unwrap_or_default();

    RECIPE_TEMPLATE
        .replace("{recipe_id}", recipe_id)
        .replace("{name_hint}", &hint)
}
