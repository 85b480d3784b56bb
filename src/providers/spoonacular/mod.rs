// ABOUTME: Spoonacular endpoint catalogue and query construction for proxy and direct transports
// ABOUTME: One ProviderQuery per endpoint, rendered either as a proxy passthrough or a direct URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Spoonacular recipe API
//!
//! A [`ProviderQuery`] is a provider path plus its query parameters. The
//! same query renders two ways:
//!
//! - proxy: `{proxy}/spoonacular?endpoint=<path>&<params>` (the proxy adds the key)
//! - direct: `{base}<path>?apiKey=<key>&<params>`
//!
//! API Reference: <https://spoonacular.com/food-api/docs>

/// Wire types for provider responses
pub mod dto;
/// Caller-facing search options
pub mod options;

pub use dto::{
    ComplexSearchResponse, NamedItem, ProviderIngredient, ProviderInstructionGroup,
    ProviderNutrient, ProviderNutrition, ProviderRecipe, ProviderStep, RandomRecipesResponse,
};
pub use options::{IngredientSearchOptions, RandomRecipeOptions, Ranking, RecipeSearchOptions};

use url::Url;

use crate::constants::endpoints::{
    COMPLEX_SEARCH, FIND_BY_INGREDIENTS, PROXY_SPOONACULAR, RANDOM_RECIPES, SPOONACULAR_KEY_PARAM,
};
use crate::errors::{AppError, AppResult};

/// Service label used in errors and logs
pub const SERVICE_NAME: &str = "Spoonacular API";

/// Proxy query parameter naming the provider path
pub const ENDPOINT_PARAM: &str = "endpoint";

/// One provider call: path plus query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    /// Provider path, e.g. `/recipes/716429/information`
    pub path: String,
    /// Query parameters in insertion order
    pub params: Vec<(String, String)>,
}

impl ProviderQuery {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_owned(), value.to_string()));
        self
    }

    fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    fn param_non_blank(self, key: &str, value: Option<&str>) -> Self {
        self.param_opt(key, value.map(str::trim).filter(|v| !v.is_empty()))
    }

    /// `GET /recipes/findByIngredients`
    #[must_use]
    pub fn find_by_ingredients(ingredients: &[String], options: &IngredientSearchOptions) -> Self {
        let joined = ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        Self::new(FIND_BY_INGREDIENTS)
            .param("ingredients", joined)
            .param("number", options.number)
            .param("ranking", options.ranking.as_param())
            .param("ignorePantry", options.ignore_pantry)
            .param_non_blank("diet", options.diet.as_deref())
            .param_non_blank("intolerances", options.intolerances.as_deref())
    }

    /// `GET /recipes/{id}/information` with nutrition
    #[must_use]
    pub fn recipe_information(id: u64) -> Self {
        Self::new(format!("/recipes/{id}/information")).param("includeNutrition", true)
    }

    /// `GET /recipes/{id}/analyzedInstructions`
    #[must_use]
    pub fn analyzed_instructions(id: u64) -> Self {
        Self::new(format!("/recipes/{id}/analyzedInstructions"))
    }

    /// `GET /recipes/{id}/nutritionWidget.json`
    #[must_use]
    pub fn nutrition_widget(id: u64) -> Self {
        Self::new(format!("/recipes/{id}/nutritionWidget.json"))
    }

    /// `GET /recipes/complexSearch`
    #[must_use]
    pub fn complex_search(query: &str, options: &RecipeSearchOptions) -> Self {
        Self::new(COMPLEX_SEARCH)
            .param("query", query.trim())
            .param("number", options.number)
            .param("offset", options.offset)
            .param("addRecipeInformation", true)
            .param("fillIngredients", true)
            .param_non_blank("diet", options.diet.as_deref())
            .param_non_blank("intolerances", options.intolerances.as_deref())
            .param_opt("maxReadyTime", options.max_ready_time)
            .param_opt("minCalories", options.min_calories)
            .param_opt("maxCalories", options.max_calories)
            .param_non_blank("sort", options.sort.as_deref())
    }

    /// `GET /recipes/random`
    #[must_use]
    pub fn random(options: &RandomRecipeOptions) -> Self {
        Self::new(RANDOM_RECIPES)
            .param("number", options.number)
            .param_non_blank("tags", options.tags.as_deref())
    }

    /// Minimal request used to probe proxy liveness
    #[must_use]
    pub fn probe() -> Self {
        Self::random(&RandomRecipeOptions {
            number: 1,
            tags: None,
        })
    }

    /// Render as a proxy passthrough URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `proxy_base` is not a valid URL
    pub fn proxy_url(&self, proxy_base: &str) -> AppResult<Url> {
        let mut url = parse_base(proxy_base, PROXY_SPOONACULAR)?;
        url.query_pairs_mut()
            .append_pair(ENDPOINT_PARAM, &self.path)
            .extend_pairs(self.params.iter());
        Ok(url)
    }

    /// Render as a direct provider URL authenticated with `api_key`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `base` is not a valid URL
    pub fn direct_url(&self, base: &str, api_key: &str) -> AppResult<Url> {
        let mut url = parse_base(base, &self.path)?;
        url.query_pairs_mut()
            .append_pair(SPOONACULAR_KEY_PARAM, api_key)
            .extend_pairs(self.params.iter());
        Ok(url)
    }
}

fn parse_base(base: &str, path: &str) -> AppResult<Url> {
    let raw = format!("{}{path}", base.trim_end_matches('/'));
    Url::parse(&raw)
        .map_err(|e| AppError::config_invalid(format!("Invalid URL '{raw}': {e}")).with_source(e))
}

/// Whether a failed response signals quota exhaustion
///
/// Spoonacular answers 402 when the daily points quota is spent; some
/// gateways relay that as a message instead of a status.
#[must_use]
pub fn is_quota_exhausted(status: u16, body: &str) -> bool {
    if status == 402 {
        return true;
    }
    let lower = body.to_lowercase();
    lower.contains("daily points limit") || lower.contains("quota")
}
