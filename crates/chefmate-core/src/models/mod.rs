// ABOUTME: Canonical data models shared by the orchestrator, proxy, and CLI
// ABOUTME: Re-exports recipe, nutrition, and cooking-tips types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every upstream response shape (real provider, AI-synthesized, static
//! placeholder) is normalized into these types before it leaves the
//! orchestrator. Records are built fresh per call and never cached.

mod nutrition;
mod recipe;
mod tips;

pub use nutrition::{Nutrient, NutritionWidget, WidgetNutrient};
pub use recipe::{
    Difficulty, Ingredient, InstructionGroup, Provenance, RecipeId, RecipeRecord, Step,
};
pub use tips::CookingTips;
