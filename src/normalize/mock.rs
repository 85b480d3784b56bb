// ABOUTME: Static placeholder recipe used when no generative model can answer
// ABOUTME: Always schema-valid and tagged mock-fallback so callers can render something
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::recipe_defaults::{
    AI_IMAGE, DEFAULT_COOK_MINUTES, DEFAULT_SERVINGS, FALLBACK_SOURCE, MYSTERY_RECIPE,
};
use crate::models::{Difficulty, Ingredient, InstructionGroup, Provenance, RecipeId, RecipeRecord};

const STAPLES: [(&str, &str, f64, &str); 3] = [
    ("2 cups all-purpose flour", "all-purpose flour", 2.0, "cups"),
    ("1 tsp salt", "salt", 1.0, "tsp"),
    ("2 tbsp olive oil", "olive oil", 2.0, "tbsp"),
];

const STEPS: [&str; 4] = [
    "Gather all ingredients and prepare your workspace.",
    "Follow the basic preparation steps for this type of dish.",
    "Cook according to standard methods and taste for seasoning.",
    "Serve hot and enjoy your meal!",
];

const TIPS: [&str; 3] = [
    "This is a basic recipe template generated when the AI service is unavailable.",
    "For best results, search for a similar recipe online or try our recipe search feature.",
    "Feel free to customize ingredients and cooking methods to your taste.",
];

/// Placeholder recipe titled after `name_hint`
#[must_use]
pub fn placeholder_recipe(name_hint: Option<&str>) -> RecipeRecord {
    let name = name_hint
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(MYSTERY_RECIPE);

    RecipeRecord {
        id: RecipeId::ai_generated(),
        title: format!("{name} (AI Generated)"),
        summary: format!(
            "A delicious {} recipe created by our AI chef when the original wasn't available.",
            name.to_lowercase()
        ),
        image: Some(AI_IMAGE.to_owned()),
        ready_in_minutes: DEFAULT_COOK_MINUTES,
        servings: DEFAULT_SERVINGS,
        difficulty: Difficulty::Medium,
        ingredients: STAPLES
            .iter()
            .zip(1u64..)
            .map(|(&(original, name, amount, unit), id)| Ingredient {
                id,
                original: original.to_owned(),
                name: name.to_owned(),
                amount: Some(amount),
                unit: unit.to_owned(),
            })
            .collect(),
        instructions: vec![InstructionGroup::from_lines(STEPS)],
        nutrition: Vec::new(),
        vegetarian: false,
        vegan: false,
        gluten_free: false,
        dairy_free: false,
        provenance: Provenance::MockFallback,
        source_name: Some(FALLBACK_SOURCE.to_owned()),
        source_url: None,
        used_ingredient_count: None,
        missed_ingredient_count: None,
        tips: TIPS.iter().map(|t| (*t).to_owned()).collect(),
        health_score: 0.0,
        price_per_serving: 0.0,
    }
}
