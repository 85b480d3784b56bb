// ABOUTME: Normalizer for real recipe-provider payloads, including ingredient-search summaries
// ABOUTME: Merges detail responses into summaries while keeping the used/missed ingredient counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{
    Difficulty, Ingredient, InstructionGroup, Nutrient, Provenance, RecipeId, RecipeRecord, Step,
};
use crate::providers::spoonacular::{
    ProviderIngredient, ProviderInstructionGroup, ProviderNutrition, ProviderRecipe,
};

const UNTITLED: &str = "Untitled Recipe";

pub(super) fn convert_ingredients(items: Vec<ProviderIngredient>) -> Vec<Ingredient> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let original = item
                .original
                .or_else(|| item.name.clone())
                .unwrap_or_default();
            let name = item.name.unwrap_or_else(|| original.clone());
            if original.is_empty() && name.is_empty() {
                return None;
            }
            Some(Ingredient {
                id: item.id.unwrap_or(index as u64 + 1),
                original,
                name,
                amount: item.amount,
                unit: item.unit.unwrap_or_default(),
            })
        })
        .collect()
}

/// Canonical instruction groups, with empty steps and groups dropped
#[must_use]
pub fn convert_instructions(groups: Vec<ProviderInstructionGroup>) -> Vec<InstructionGroup> {
    groups
        .into_iter()
        .map(|group| InstructionGroup {
            name: group.name,
            steps: group
                .steps
                .into_iter()
                .filter(|s| !s.step.trim().is_empty())
                .enumerate()
                .map(|(index, s)| Step {
                    number: if s.number == 0 {
                        u32::try_from(index + 1).unwrap_or(u32::MAX)
                    } else {
                        s.number
                    },
                    step: s.step,
                    ingredients: s.ingredients.into_iter().map(|i| i.name).collect(),
                    equipment: s.equipment.into_iter().map(|e| e.name).collect(),
                })
                .collect(),
        })
        .filter(|group| !group.steps.is_empty())
        .collect()
}

pub(super) fn convert_nutrition(nutrition: Option<ProviderNutrition>) -> Vec<Nutrient> {
    nutrition
        .map(|n| {
            n.nutrients
                .into_iter()
                .map(|n| Nutrient {
                    name: n.name,
                    amount: n.amount,
                    unit: n.unit,
                    percent_of_daily_needs: n.percent_of_daily_needs,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Difficulty from an explicit label, else estimated when ready time is known
pub(super) fn resolve_difficulty(
    label: Option<&str>,
    ready_in_minutes: Option<u32>,
    ingredient_count: usize,
) -> Difficulty {
    match (label, ready_in_minutes) {
        (Some(label), _) => Difficulty::from_str_lossy(label),
        (None, Some(minutes)) => Difficulty::estimate(minutes, ingredient_count),
        (None, None) => Difficulty::default(),
    }
}

/// Normalize a provider recipe
///
/// Summary payloads (ingredient search) carry no extended ingredients; the
/// used and missed lists stand in for them and instructions stay empty.
/// Unknown ready time and servings are reported as 0.
#[must_use]
pub fn normalize_provider(recipe: ProviderRecipe) -> RecipeRecord {
    let ingredients = if recipe.extended_ingredients.is_empty() {
        convert_ingredients(
            recipe
                .used_ingredients
                .into_iter()
                .chain(recipe.missed_ingredients)
                .collect(),
        )
    } else {
        convert_ingredients(recipe.extended_ingredients)
    };
    let difficulty = resolve_difficulty(
        recipe.difficulty.as_deref(),
        recipe.ready_in_minutes,
        ingredients.len(),
    );

    RecipeRecord {
        id: recipe
            .id
            .unwrap_or_else(|| RecipeId::Named("unknown".to_owned())),
        title: recipe.title.unwrap_or_else(|| UNTITLED.to_owned()),
        summary: recipe.summary.unwrap_or_default(),
        image: recipe.image,
        ready_in_minutes: recipe.ready_in_minutes.unwrap_or(0),
        servings: recipe.servings.unwrap_or(0),
        difficulty,
        ingredients,
        instructions: convert_instructions(recipe.analyzed_instructions),
        nutrition: convert_nutrition(recipe.nutrition),
        vegetarian: recipe.vegetarian,
        vegan: recipe.vegan,
        gluten_free: recipe.gluten_free,
        dairy_free: recipe.dairy_free,
        provenance: Provenance::Real,
        source_name: recipe.source_name,
        source_url: recipe.source_url,
        used_ingredient_count: recipe.used_ingredient_count,
        missed_ingredient_count: recipe.missed_ingredient_count,
        tips: recipe.tips,
        health_score: recipe.health_score.unwrap_or(0.0),
        price_per_serving: recipe.price_per_serving.unwrap_or(0.0),
    }
}

/// Merge a detail response over its search summary
///
/// Detail fields win; the summary's used/missed counts and lists survive
/// because the detail endpoint does not report them.
#[must_use]
pub fn enrich_summary(summary: ProviderRecipe, detail: ProviderRecipe) -> ProviderRecipe {
    ProviderRecipe {
        id: detail.id.or(summary.id),
        title: detail.title.or(summary.title),
        image: detail.image.or(summary.image),
        used_ingredient_count: Some(summary.used_ingredient_count.unwrap_or(0)),
        missed_ingredient_count: Some(summary.missed_ingredient_count.unwrap_or(0)),
        used_ingredients: summary.used_ingredients,
        missed_ingredients: summary.missed_ingredients,
        ..detail
    }
}
