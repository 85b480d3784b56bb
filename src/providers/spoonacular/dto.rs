// ABOUTME: Wire types for Spoonacular recipe payloads and proxy-relayed recipe JSON
// ABOUTME: Every field is optional or defaulted so summary, detail, and relayed shapes share one type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::models::RecipeId;
use crate::utils::serde_loose;

/// Recipe as the provider (or the proxy's AI endpoint) returns it
///
/// `findByIngredients` fills only the summary fields plus the
/// used/missed lists; `information` fills the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderRecipe {
    /// Numeric id, or `ai-generated` for relayed synthesized recipes
    pub id: Option<RecipeId>,
    /// Title
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub title: Option<String>,
    /// HTML summary
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub summary: Option<String>,
    /// Image URL
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub image: Option<String>,
    /// Total minutes
    #[serde(deserialize_with = "serde_loose::u32_opt")]
    pub ready_in_minutes: Option<u32>,
    /// Servings
    #[serde(deserialize_with = "serde_loose::u32_opt")]
    pub servings: Option<u32>,
    /// Difficulty label (relayed AI recipes only)
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub difficulty: Option<String>,
    /// Ingredient lines
    pub extended_ingredients: Vec<ProviderIngredient>,
    /// Structured instructions
    pub analyzed_instructions: Vec<ProviderInstructionGroup>,
    /// Nutrition block (present when `includeNutrition=true`)
    pub nutrition: Option<ProviderNutrition>,
    /// Vegetarian
    pub vegetarian: bool,
    /// Vegan
    pub vegan: bool,
    /// Gluten free
    pub gluten_free: bool,
    /// Dairy free
    pub dairy_free: bool,
    /// Publisher name
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub source_name: Option<String>,
    /// Publisher URL
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub source_url: Option<String>,
    /// Health score
    #[serde(deserialize_with = "serde_loose::f64_opt")]
    pub health_score: Option<f64>,
    /// Price per serving in cents
    #[serde(deserialize_with = "serde_loose::f64_opt")]
    pub price_per_serving: Option<f64>,
    /// Ingredient-search matches
    #[serde(deserialize_with = "serde_loose::u32_opt")]
    pub used_ingredient_count: Option<u32>,
    /// Ingredient-search gaps
    #[serde(deserialize_with = "serde_loose::u32_opt")]
    pub missed_ingredient_count: Option<u32>,
    /// Ingredient-search matched items
    pub used_ingredients: Vec<ProviderIngredient>,
    /// Ingredient-search missing items
    pub missed_ingredients: Vec<ProviderIngredient>,
    /// Tips attached by the proxy's AI endpoint
    #[serde(deserialize_with = "serde_loose::string_list")]
    pub tips: Vec<String>,
    /// Origin label attached by the proxy's AI endpoint
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub source: Option<String>,
}

/// Ingredient line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderIngredient {
    /// Provider ingredient id
    pub id: Option<u64>,
    /// Line as written in the recipe
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub original: Option<String>,
    /// Ingredient name
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub name: Option<String>,
    /// Quantity
    #[serde(deserialize_with = "serde_loose::f64_opt")]
    pub amount: Option<f64>,
    /// Unit
    #[serde(deserialize_with = "serde_loose::string_opt")]
    pub unit: Option<String>,
}

/// Named instruction group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderInstructionGroup {
    /// Group name, often empty
    pub name: String,
    /// Steps
    pub steps: Vec<ProviderStep>,
}

/// One instruction step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderStep {
    /// 1-based number
    pub number: u32,
    /// Step text
    pub step: String,
    /// Ingredients referenced
    pub ingredients: Vec<NamedItem>,
    /// Equipment referenced
    pub equipment: Vec<NamedItem>,
}

/// Ingredient or equipment reference inside a step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedItem {
    /// Display name
    pub name: String,
}

/// Nutrition block of the detail response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderNutrition {
    /// Nutrients per serving
    pub nutrients: Vec<ProviderNutrient>,
}

/// Nutrient amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderNutrient {
    /// Name
    pub name: String,
    /// Amount per serving
    pub amount: f64,
    /// Unit
    pub unit: String,
    /// Share of daily needs
    pub percent_of_daily_needs: Option<f64>,
}

/// `complexSearch` envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    /// Matching recipes
    pub results: Vec<ProviderRecipe>,
    /// Total matches available
    pub total_results: Option<u32>,
}

/// `random` envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RandomRecipesResponse {
    /// Random recipes
    pub recipes: Vec<ProviderRecipe>,
}
