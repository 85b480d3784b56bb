// ABOUTME: AI commands for chefmate-cli
// ABOUTME: Cooking tips for a fetched recipe and recipe synthesis when lookup fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chefmate::models::RecipeId;
use chefmate::orchestrator::ApiOrchestrator;
use tracing::warn;

use crate::helpers::output::print_json;

pub async fn tips(orchestrator: &ApiOrchestrator, id: &str, have: &[String]) -> Result<()> {
    let recipe = orchestrator
        .get_recipe_information(&RecipeId::parse(id))
        .await?;
    let tips = orchestrator.get_ai_cooking_tips(&recipe, have).await;
    print_json(&tips)
}

/// Falls back to the AI chef the way the recipe page does after a failed lookup
pub async fn recipe(orchestrator: &ApiOrchestrator, id: &str, name: Option<&str>) -> Result<()> {
    match orchestrator.search_recipe_with_ai(id, name).await {
        Ok(recipe) => print_json(&recipe),
        Err(e) => {
            warn!(error = %e, "AI recipe synthesis failed");
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}
