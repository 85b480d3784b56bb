// ABOUTME: Nutrition models for recipe records and the provider nutrition widget
// ABOUTME: Nutrient, NutritionWidget, and WidgetNutrient definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A single nutrient amount per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    /// Nutrient name (e.g. "Calories", "Protein")
    pub name: String,
    /// Amount per serving
    pub amount: f64,
    /// Unit of `amount`
    pub unit: String,
    /// Share of daily needs, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_of_daily_needs: Option<f64>,
}

/// Nutrition widget summary as the provider reports it
///
/// Headline values are strings with units already attached (e.g. `"12g"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NutritionWidget {
    /// Calories
    pub calories: String,
    /// Carbohydrates
    pub carbs: String,
    /// Fat
    pub fat: String,
    /// Protein
    pub protein: String,
    /// Nutrients to limit
    pub bad: Vec<WidgetNutrient>,
    /// Nutrients to favor
    pub good: Vec<WidgetNutrient>,
}

/// One row of the nutrition widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetNutrient {
    /// Row title
    pub title: String,
    /// Amount with unit
    pub amount: String,
    /// Rendered as a sub-row
    pub indented: bool,
    /// Share of daily needs
    pub percent_of_daily_needs: f64,
}
