// ABOUTME: Recipe-provider commands for chefmate-cli
// ABOUTME: Ingredient search, detail, nutrition, free-text search, and random recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chefmate::models::RecipeId;
use chefmate::orchestrator::ApiOrchestrator;
use chefmate::providers::spoonacular::{
    IngredientSearchOptions, RandomRecipeOptions, Ranking, RecipeSearchOptions,
};

use crate::helpers::output::{print_json, print_recipe_summaries};

pub async fn search(
    orchestrator: &ApiOrchestrator,
    ingredients: &[String],
    number: u32,
    minimize_missing: bool,
    diet: Option<String>,
    intolerances: Option<String>,
) -> Result<()> {
    let options = IngredientSearchOptions {
        number,
        ranking: if minimize_missing {
            Ranking::MinimizeMissing
        } else {
            Ranking::MaximizeUsed
        },
        diet,
        intolerances,
        ..IngredientSearchOptions::default()
    };
    let recipes = orchestrator
        .search_recipes_by_ingredients(ingredients, &options)
        .await?;
    print_recipe_summaries(&recipes);
    print_json(&recipes)
}

pub async fn detail(orchestrator: &ApiOrchestrator, id: &str) -> Result<()> {
    let recipe = orchestrator
        .get_recipe_information(&RecipeId::parse(id))
        .await?;
    print_json(&recipe)
}

pub async fn nutrition(orchestrator: &ApiOrchestrator, id: &str) -> Result<()> {
    match orchestrator
        .get_recipe_nutrition_widget(&RecipeId::parse(id))
        .await?
    {
        Some(widget) => print_json(&widget),
        None => {
            eprintln!("No nutrition information available for recipe {id}");
            Ok(())
        }
    }
}

pub async fn query(
    orchestrator: &ApiOrchestrator,
    query: &str,
    number: u32,
    diet: Option<String>,
    max_ready_time: Option<u32>,
) -> Result<()> {
    let options = RecipeSearchOptions {
        number,
        diet,
        max_ready_time,
        ..RecipeSearchOptions::default()
    };
    let recipes = orchestrator.search_recipes(query, &options).await?;
    print_recipe_summaries(&recipes);
    print_json(&recipes)
}

pub async fn random(orchestrator: &ApiOrchestrator, number: u32, tags: Option<String>) -> Result<()> {
    let options = RandomRecipeOptions { number, tags };
    let recipes = orchestrator.get_random_recipes(&options).await?;
    print_recipe_summaries(&recipes);
    print_json(&recipes)
}
