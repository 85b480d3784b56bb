// ABOUTME: Cooking tips returned by the AI tips operation
// ABOUTME: Carries the tip list and whether it came from the model or the static fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::Provenance;

/// Cooking tips for one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingTips {
    /// Tips, in display order
    pub tips: Vec<String>,
    /// `AiGenerated` when the model answered, `MockFallback` for the static list
    #[serde(default = "default_provenance")]
    pub provenance: Provenance,
}

const fn default_provenance() -> Provenance {
    Provenance::AiGenerated
}

impl CookingTips {
    /// Tips produced by the model
    #[must_use]
    pub const fn generated(tips: Vec<String>) -> Self {
        Self {
            tips,
            provenance: Provenance::AiGenerated,
        }
    }

    /// Tips from the static fallback list
    #[must_use]
    pub const fn fallback(tips: Vec<String>) -> Self {
        Self {
            tips,
            provenance: Provenance::MockFallback,
        }
    }
}
