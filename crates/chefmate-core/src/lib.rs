// ABOUTME: Core types and constants for the ChefMate recipe orchestration layer
// ABOUTME: Foundation crate with error handling, constants, and canonical recipe models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `ChefMate` Core
//!
//! Foundation crate providing shared types and constants for the `ChefMate`
//! orchestration layer. It changes infrequently, so the main crate gets
//! incremental compilation benefits from keeping it separate.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Endpoints, storage keys, and request defaults
//! - **models**: The canonical `RecipeRecord` every response shape is normalized into

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Canonical recipe, nutrition, and tips models
pub mod models;
