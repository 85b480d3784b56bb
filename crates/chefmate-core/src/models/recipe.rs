// ABOUTME: Canonical recipe record and its component types
// ABOUTME: RecipeRecord, RecipeId, Difficulty, Provenance, Ingredient, and InstructionGroup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Nutrient;
use crate::constants::recipe_defaults::AI_GENERATED_ID;

/// Recipe identifier
///
/// Provider recipes carry numeric ids; synthesized recipes carry the
/// `ai-generated` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    /// Numeric id assigned by the recipe provider
    Provider(u64),
    /// Free-form id (sentinels, ids passed through by callers)
    Named(String),
}

impl RecipeId {
    /// Sentinel id shared by every AI-generated record
    #[must_use]
    pub fn ai_generated() -> Self {
        Self::Named(AI_GENERATED_ID.to_owned())
    }

    /// Whether this is the AI sentinel
    #[must_use]
    pub fn is_ai_generated(&self) -> bool {
        matches!(self, Self::Named(name) if name == AI_GENERATED_ID)
    }

    /// Numeric provider id, if this is one
    #[must_use]
    pub const fn provider_id(&self) -> Option<u64> {
        match self {
            Self::Provider(id) => Some(*id),
            Self::Named(_) => None,
        }
    }

    /// Parse user input, preferring the numeric form
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<u64>()
            .map_or_else(|_| Self::Named(trimmed.to_owned()), Self::Provider)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        Self::Provider(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Recipe difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Quick with few ingredients
    Easy,
    /// Default when nothing better is known
    #[default]
    Medium,
    /// Long or ingredient-heavy
    Hard,
}

impl Difficulty {
    /// Parse a model-supplied label, defaulting to `Medium`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("easy") {
            Self::Easy
        } else if lower.starts_with("hard") {
            Self::Hard
        } else {
            Self::Medium
        }
    }

    /// Estimate difficulty from ready time and ingredient count
    #[must_use]
    pub const fn estimate(ready_in_minutes: u32, ingredient_count: usize) -> Self {
        if ready_in_minutes <= 20 && ingredient_count <= 5 {
            Self::Easy
        } else if ready_in_minutes <= 45 && ingredient_count <= 10 {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    /// Display label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Returned by the recipe provider
    Real,
    /// Synthesized by the generative model
    AiGenerated,
    /// Static placeholder used when no upstream could answer
    MockFallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Real => "real",
            Self::AiGenerated => "ai-generated",
            Self::MockFallback => "mock-fallback",
        })
    }
}

/// One ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Provider ingredient id, or 1-based position for synthesized lines
    pub id: u64,
    /// Display text as written in the recipe
    pub original: String,
    /// Ingredient name without quantity
    pub name: String,
    /// Quantity when known
    pub amount: Option<f64>,
    /// Unit of `amount`, empty when unknown
    pub unit: String,
}

/// One numbered instruction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based step number
    pub number: u32,
    /// Step text
    pub step: String,
    /// Ingredient names referenced by the step
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Equipment names referenced by the step
    #[serde(default)]
    pub equipment: Vec<String>,
}

/// A named sequence of steps (e.g. "For the sauce")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionGroup {
    /// Group name, empty for the main sequence
    pub name: String,
    /// Ordered steps
    pub steps: Vec<Step>,
}

impl InstructionGroup {
    /// Unnamed group numbering `lines` from 1
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| Step {
                number: u32::try_from(index + 1).unwrap_or(u32::MAX),
                step: line.into(),
                ingredients: Vec::new(),
                equipment: Vec::new(),
            })
            .collect();
        Self {
            name: String::new(),
            steps,
        }
    }
}

/// Canonical recipe shape returned by every orchestrator operation
///
/// Regardless of provenance, `id`, `title`, `ingredients`, and
/// `instructions` are always present, so callers never branch on origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    /// Recipe id
    pub id: RecipeId,
    /// Title
    pub title: String,
    /// Short description (may contain provider HTML)
    pub summary: String,
    /// Image URL or asset path
    pub image: Option<String>,
    /// Total time in minutes
    pub ready_in_minutes: u32,
    /// Servings
    pub servings: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Ingredient lines
    pub ingredients: Vec<Ingredient>,
    /// Instruction groups
    pub instructions: Vec<InstructionGroup>,
    /// Nutrients per serving
    pub nutrition: Vec<Nutrient>,
    /// Vegetarian
    pub vegetarian: bool,
    /// Vegan
    pub vegan: bool,
    /// Gluten free
    pub gluten_free: bool,
    /// Dairy free
    pub dairy_free: bool,
    /// Origin of the record
    pub provenance: Provenance,
    /// Publisher name
    pub source_name: Option<String>,
    /// Publisher URL
    pub source_url: Option<String>,
    /// Ingredient-search matches against the user's list
    pub used_ingredient_count: Option<u32>,
    /// Ingredient-search items the user lacks
    pub missed_ingredient_count: Option<u32>,
    /// Cooking tips bundled with synthesized recipes
    pub tips: Vec<String>,
    /// Provider health score
    pub health_score: f64,
    /// Provider price per serving in cents
    pub price_per_serving: f64,
}

impl RecipeRecord {
    /// Whether any instruction group carries at least one step
    #[must_use]
    pub fn has_instructions(&self) -> bool {
        self.instructions.iter().any(|group| !group.steps.is_empty())
    }

    /// Ingredient names, for prompts and display
    #[must_use]
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}
