// ABOUTME: Command modules for chefmate-cli
// ABOUTME: Recipe lookups, AI operations, and API key management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod ai;
pub mod keys;
pub mod recipes;
