// ABOUTME: Main library entry point for the ChefMate recipe API orchestration layer
// ABOUTME: Proxy/direct transport, key failover, AI fallback, and response normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `ChefMate`
//!
//! Client-side orchestration for a recipe discovery app. Page controllers
//! call a handful of async methods on [`orchestrator::ApiOrchestrator`];
//! the orchestrator decides how to reach the recipe provider and the
//! generative model, rotates keys when quota runs out, and hands back one
//! canonical [`models::RecipeRecord`] shape whatever the source.
//!
//! ## Architecture
//!
//! - **Orchestrator**: transport selection, dispatch, failover, rate limiting
//! - **Providers / LLM**: endpoint catalogues and wire types
//! - **AI**: prompts and best-effort parsing of model output
//! - **Normalize**: one normalizer per response shape
//! - **Storage / HTTP**: injected persistence and fetch capabilities
//! - **Proxy**: the server-side endpoints the proxy transport talks to
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chefmate::config::OrchestratorConfig;
//! use chefmate::errors::AppResult;
//! use chefmate::http::shared_transport;
//! use chefmate::orchestrator::ApiOrchestrator;
//! use chefmate::providers::spoonacular::IngredientSearchOptions;
//! use chefmate::storage::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let orchestrator = ApiOrchestrator::new(
//!         OrchestratorConfig::from_env(),
//!         shared_transport(),
//!         Arc::new(InMemoryStore::new()),
//!     )?;
//!
//!     let recipes = orchestrator
//!         .search_recipes_by_ingredients(
//!             &["chicken".to_owned(), "rice".to_owned()],
//!             &IngredientSearchOptions::default(),
//!         )
//!         .await?;
//!     println!("found {} recipes", recipes.len());
//!     Ok(())
//! }
//! ```

/// Prompt construction and model-output parsing
pub mod ai;

/// Environment-driven configuration
pub mod config;

/// HTTP fetch capability and its `reqwest` implementation
pub mod http;

/// Generative-text provider wire format
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Conversion of every response shape into `RecipeRecord`
pub mod normalize;

/// The API orchestrator
pub mod orchestrator;

/// Recipe-provider endpoint catalogue and wire types
pub mod providers;

/// Proxy endpoints holding credentials server-side
#[cfg(feature = "proxy")]
pub mod proxy;

/// Key-value persistence capability
pub mod storage;

/// Shared helpers
pub mod utils;

pub use chefmate_core::{constants, errors, models};
