// ABOUTME: Output formatting helpers for chefmate-cli
// ABOUTME: Pretty JSON on stdout and a short human summary on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chefmate::models::RecipeRecord;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per recipe on stderr, so stdout stays valid JSON
pub fn print_recipe_summaries(recipes: &[RecipeRecord]) {
    eprintln!("{} recipe(s)", recipes.len());
    for recipe in recipes {
        let missing = recipe
            .missed_ingredient_count
            .map(|n| format!(", {n} missing"))
            .unwrap_or_default();
        eprintln!(
            "  [{}] {} ({} min, {}{missing})",
            recipe.id, recipe.title, recipe.ready_in_minutes, recipe.difficulty
        );
    }
}
