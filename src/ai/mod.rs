// ABOUTME: AI content handling: prompt construction, tips parsing, JSON extraction, cook-time parsing
// ABOUTME: Pure functions over model text, independent of transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Content
//!
//! Everything here operates on strings the model returned. Nothing performs
//! I/O, so the whole module is unit-testable without a transport.

/// Cook-time string parsing
pub mod cook_time;
/// Best-effort JSON extraction from free text
pub mod extract;
/// Prompt templates
pub mod prompts;
/// Tips parsing and the static fallback list
pub mod tips;

pub use cook_time::parse_cook_time;
pub use extract::{extract_json_block, parse_recipe_document, AiRecipeDocument};
pub use prompts::{recipe_prompt, tips_prompt};
pub use tips::{parse_tips, static_tips};
