// ABOUTME: Normalization of heterogeneous recipe shapes into the canonical RecipeRecord
// ABOUTME: RecipeSource tagged union with one dedicated normalizer per variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Normalization
//!
//! Upstream answers come in four shapes: a real provider recipe, a recipe
//! document the model wrote, a recipe the proxy's AI endpoint already
//! reshaped, and the static placeholder. Each is a [`RecipeSource`]
//! variant and each has exactly one normalizer. Nothing downstream of
//! [`RecipeSource::normalize`] inspects the original shape.

/// Synthesized recipe documents
pub mod ai;
/// Static placeholder recipe
pub mod mock;
/// Real provider recipes and detail enrichment
pub mod provider;
/// Proxy-relayed AI recipes and the reverse mapping the proxy serves
pub mod relay;

pub use ai::normalize_generated;
pub use mock::placeholder_recipe;
pub use provider::{convert_instructions, enrich_summary, normalize_provider};
pub use relay::{normalize_relayed, to_relay_shape};

use crate::ai::AiRecipeDocument;
use crate::models::RecipeRecord;
use crate::providers::spoonacular::ProviderRecipe;

/// Every recipe shape the orchestrator can receive
#[derive(Debug, Clone)]
pub enum RecipeSource {
    /// Recipe returned by the recipe provider
    Real(ProviderRecipe),
    /// Recipe document parsed from direct model output
    AiGenerated(AiRecipeDocument),
    /// Recipe the proxy's AI endpoint already reshaped (may be its placeholder)
    Relayed(ProviderRecipe),
    /// Static placeholder built locally
    MockFallback {
        /// Name the caller expected, used in the placeholder title
        name_hint: Option<String>,
    },
}

impl RecipeSource {
    /// Convert into the canonical record
    #[must_use]
    pub fn normalize(self) -> RecipeRecord {
        match self {
            Self::Real(recipe) => normalize_provider(recipe),
            Self::AiGenerated(document) => normalize_generated(document),
            Self::Relayed(recipe) => normalize_relayed(recipe),
            Self::MockFallback { name_hint } => placeholder_recipe(name_hint.as_deref()),
        }
    }
}
