// ABOUTME: Caller-facing options for ingredient, free-text, and random recipe searches
// ABOUTME: Defaults mirror the provider parameters the app has always sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits::{DEFAULT_RANDOM_RESULTS, DEFAULT_SEARCH_RESULTS};

/// Ingredient-search ranking strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Prefer recipes that use the most of the given ingredients
    #[default]
    MaximizeUsed,
    /// Prefer recipes that need the fewest extra ingredients
    MinimizeMissing,
}

impl Ranking {
    /// Provider parameter value
    #[must_use]
    pub const fn as_param(self) -> u8 {
        match self {
            Self::MaximizeUsed => 1,
            Self::MinimizeMissing => 2,
        }
    }
}

/// Options for `search_recipes_by_ingredients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientSearchOptions {
    /// Maximum results
    pub number: u32,
    /// Ranking strategy
    pub ranking: Ranking,
    /// Ignore pantry staples (water, salt, flour)
    pub ignore_pantry: bool,
    /// Diet filter
    pub diet: Option<String>,
    /// Comma-separated intolerances
    pub intolerances: Option<String>,
}

impl Default for IngredientSearchOptions {
    fn default() -> Self {
        Self {
            number: DEFAULT_SEARCH_RESULTS,
            ranking: Ranking::default(),
            ignore_pantry: true,
            diet: None,
            intolerances: None,
        }
    }
}

/// Options for `search_recipes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeSearchOptions {
    /// Maximum results
    pub number: u32,
    /// Result offset for paging
    pub offset: u32,
    /// Diet filter
    pub diet: Option<String>,
    /// Comma-separated intolerances
    pub intolerances: Option<String>,
    /// Upper bound on ready time in minutes
    pub max_ready_time: Option<u32>,
    /// Lower calorie bound per serving
    pub min_calories: Option<u32>,
    /// Upper calorie bound per serving
    pub max_calories: Option<u32>,
    /// Provider sort key (e.g. `popularity`)
    pub sort: Option<String>,
}

impl Default for RecipeSearchOptions {
    fn default() -> Self {
        Self {
            number: DEFAULT_SEARCH_RESULTS,
            offset: 0,
            diet: None,
            intolerances: None,
            max_ready_time: None,
            min_calories: None,
            max_calories: None,
            sort: None,
        }
    }
}

/// Options for `get_random_recipes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomRecipeOptions {
    /// Number of recipes
    pub number: u32,
    /// Comma-separated tags (e.g. `vegetarian,dessert`)
    pub tags: Option<String>,
}

impl Default for RandomRecipeOptions {
    fn default() -> Self {
        Self {
            number: DEFAULT_RANDOM_RESULTS,
            tags: None,
        }
    }
}
