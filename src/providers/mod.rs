// ABOUTME: Recipe-provider integrations
// ABOUTME: Endpoint catalogue, query builders, and wire types for the recipe API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Spoonacular recipe API
pub mod spoonacular;
