// ABOUTME: Mapping between canonical AI records and the provider-shaped JSON the proxy relays
// ABOUTME: The proxy serves to_relay_shape output; the client reads it back with normalize_relayed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::provider::{convert_ingredients, convert_instructions, convert_nutrition, resolve_difficulty};
use crate::constants::recipe_defaults::{
    AI_IMAGE, AI_SOURCE_NAME, AI_TITLE, DEFAULT_COOK_MINUTES, DEFAULT_SERVINGS, FALLBACK_SOURCE,
};
use crate::models::{Provenance, RecipeId, RecipeRecord};
use crate::providers::spoonacular::{
    NamedItem, ProviderIngredient, ProviderInstructionGroup, ProviderNutrient, ProviderNutrition,
    ProviderRecipe, ProviderStep,
};

const AI_SOURCE_LABEL: &str = "AI Generated";

/// Provenance implied by the relayed `source` label
fn relayed_provenance(source: Option<&str>) -> Provenance {
    match source {
        Some(label) if label.contains("Fallback") => Provenance::MockFallback,
        _ => Provenance::AiGenerated,
    }
}

/// Normalize a recipe the proxy's AI endpoint returned
///
/// The proxy answers with its placeholder when it has no key or the model
/// fails; that case is recognized by its `source` label and tagged
/// `mock-fallback`.
#[must_use]
pub fn normalize_relayed(recipe: ProviderRecipe) -> RecipeRecord {
    let provenance = relayed_provenance(recipe.source.as_deref());
    let ingredients = convert_ingredients(recipe.extended_ingredients);
    let difficulty = resolve_difficulty(recipe.difficulty.as_deref(), None, ingredients.len());

    RecipeRecord {
        id: recipe.id.unwrap_or_else(RecipeId::ai_generated),
        title: recipe.title.unwrap_or_else(|| AI_TITLE.to_owned()),
        summary: recipe.summary.unwrap_or_default(),
        image: recipe.image.or_else(|| Some(AI_IMAGE.to_owned())),
        ready_in_minutes: recipe.ready_in_minutes.unwrap_or(DEFAULT_COOK_MINUTES),
        servings: recipe.servings.unwrap_or(DEFAULT_SERVINGS),
        difficulty,
        ingredients,
        instructions: convert_instructions(recipe.analyzed_instructions),
        nutrition: convert_nutrition(recipe.nutrition),
        vegetarian: recipe.vegetarian,
        vegan: recipe.vegan,
        gluten_free: recipe.gluten_free,
        dairy_free: recipe.dairy_free,
        provenance,
        source_name: recipe
            .source_name
            .or(recipe.source)
            .or_else(|| Some(AI_SOURCE_NAME.to_owned())),
        source_url: recipe.source_url,
        used_ingredient_count: None,
        missed_ingredient_count: None,
        tips: recipe.tips,
        health_score: recipe.health_score.unwrap_or(0.0),
        price_per_serving: recipe.price_per_serving.unwrap_or(0.0),
    }
}

/// Provider-shaped JSON for an AI or placeholder record, as the proxy serves it
#[must_use]
pub fn to_relay_shape(record: &RecipeRecord) -> ProviderRecipe {
    let source = match record.provenance {
        Provenance::MockFallback => FALLBACK_SOURCE,
        Provenance::AiGenerated | Provenance::Real => AI_SOURCE_LABEL,
    };

    ProviderRecipe {
        id: Some(record.id.clone()),
        title: Some(record.title.clone()),
        summary: Some(record.summary.clone()),
        image: record.image.clone(),
        ready_in_minutes: Some(record.ready_in_minutes),
        servings: Some(record.servings),
        difficulty: Some(record.difficulty.as_str().to_owned()),
        extended_ingredients: record
            .ingredients
            .iter()
            .map(|i| ProviderIngredient {
                id: Some(i.id),
                original: Some(i.original.clone()),
                name: Some(i.name.clone()),
                amount: i.amount,
                unit: Some(i.unit.clone()),
            })
            .collect(),
        analyzed_instructions: record
            .instructions
            .iter()
            .map(|g| ProviderInstructionGroup {
                name: g.name.clone(),
                steps: g
                    .steps
                    .iter()
                    .map(|s| ProviderStep {
                        number: s.number,
                        step: s.step.clone(),
                        ingredients: s.ingredients.iter().map(|n| NamedItem { name: n.clone() }).collect(),
                        equipment: s.equipment.iter().map(|n| NamedItem { name: n.clone() }).collect(),
                    })
                    .collect(),
            })
            .collect(),
        nutrition: Some(ProviderNutrition {
            nutrients: record
                .nutrition
                .iter()
                .map(|n| ProviderNutrient {
                    name: n.name.clone(),
                    amount: n.amount,
                    unit: n.unit.clone(),
                    percent_of_daily_needs: n.percent_of_daily_needs,
                })
                .collect(),
        }),
        vegetarian: record.vegetarian,
        vegan: record.vegan,
        gluten_free: record.gluten_free,
        dairy_free: record.dairy_free,
        source_name: record.source_name.clone(),
        source_url: record.source_url.clone(),
        health_score: Some(record.health_score),
        price_per_serving: Some(record.price_per_serving),
        tips: record.tips.clone(),
        source: Some(source.to_owned()),
        ..ProviderRecipe::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ai::AiRecipeDocument;
    use crate::normalize::{normalize_generated, placeholder_recipe};

    #[test]
    fn test_placeholder_survives_relay() {
        let original = placeholder_recipe(Some("Paella"));
        let json = serde_json::to_string(&to_relay_shape(&original)).unwrap();
        let relayed: ProviderRecipe = serde_json::from_str(&json).unwrap();
        let record = normalize_relayed(relayed);
        assert_eq!(record.provenance, Provenance::MockFallback);
        assert_eq!(record.title, original.title);
        assert_eq!(record.instructions, original.instructions);
    }

    #[test]
    fn test_generated_relays_as_ai() {
        let original = normalize_generated(AiRecipeDocument {
            title: Some("Dal".into()),
            instructions: vec!["Rinse lentils".into()],
            ..AiRecipeDocument::default()
        });
        let record = normalize_relayed(to_relay_shape(&original));
        assert_eq!(record.provenance, Provenance::AiGenerated);
        assert!(record.id.is_ai_generated());
        assert_eq!(record.source_name.as_deref(), Some(AI_SOURCE_NAME));
    }
}
