// ABOUTME: Integration tests for AI recipe synthesis in proxy and direct modes
// ABOUTME: Covers JSON extraction from prose, placeholder without a key, and relayed placeholders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chefmate::errors::ErrorCode;
use chefmate::models::{Difficulty, Provenance, RecipeId};
use chefmate::normalize::{placeholder_recipe, to_relay_shape};
use chefmate::storage::InMemoryStore;
use common::{
    gemini_answer, orchestrator_with, store_with, test_config, ScriptedTransport, GEMINI_KEY,
};
use std::sync::Arc;

const GEMINI_CALL: &str = "gemini.test";
const PROXY_SEARCH: &str = "proxy.test/api/gemini-search";
const PROBE: &str = "endpoint=%2Frecipes%2Frandom";

const MODEL_TEXT: &str = r#"Here is a recipe you might like:

```json
{
  "title": "Lemon Garlic Chicken",
  "description": "Bright weeknight chicken.",
  "cookTime": "1 hour 15 minutes",
  "servings": "3",
  "difficulty": "Easy",
  "ingredients": ["2 chicken breasts", "1 lemon", "3 cloves garlic"],
  "instructions": ["Marinate the chicken.", "Roast until golden."],
  "tips": ["Use fresh lemons"]
}
```
Enjoy {your meal}!"#;

fn direct_with_ai_key(transport: &Arc<ScriptedTransport>) -> chefmate::orchestrator::ApiOrchestrator {
    orchestrator_with(
        test_config(false),
        transport,
        store_with(&[("chefmate_gemini_key", GEMINI_KEY)]),
    )
}

#[tokio::test]
async fn test_direct_synthesis_extracts_embedded_json() {
    let transport = ScriptedTransport::new();
    transport.once(GEMINI_CALL, 200, &gemini_answer(MODEL_TEXT));
    let orchestrator = direct_with_ai_key(&transport);

    let recipe = orchestrator
        .search_recipe_with_ai("716429", Some("Lemon Chicken"))
        .await
        .unwrap();

    assert_eq!(recipe.id, RecipeId::ai_generated());
    assert_eq!(recipe.provenance, Provenance::AiGenerated);
    assert_eq!(recipe.title, "Lemon Garlic Chicken");
    assert_eq!(recipe.ready_in_minutes, 75);
    assert_eq!(recipe.servings, 3);
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].name, "chicken breasts");
    assert_eq!(recipe.instructions[0].steps.len(), 2);
    assert_eq!(recipe.tips, vec!["Use fresh lemons"]);
}

#[tokio::test]
async fn test_direct_synthesis_without_json_is_parse_error() {
    let transport = ScriptedTransport::new();
    transport.once(GEMINI_CALL, 200, &gemini_answer("I cannot help with that recipe."));
    let orchestrator = direct_with_ai_key(&transport);

    let err = orchestrator
        .search_recipe_with_ai("716429", None)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ParseError);
    assert!(err.message.contains("Please try searching manually"));
}

#[tokio::test]
async fn test_direct_synthesis_without_key_returns_placeholder() {
    let transport = ScriptedTransport::new();
    let orchestrator =
        orchestrator_with(test_config(false), &transport, Arc::new(InMemoryStore::new()));

    let recipe = orchestrator
        .search_recipe_with_ai("716429", Some("Pad Thai"))
        .await
        .unwrap();

    assert_eq!(recipe.provenance, Provenance::MockFallback);
    assert!(recipe.title.starts_with("Pad Thai"));
    assert!(!recipe.ingredients.is_empty());
    assert!(recipe.has_instructions());
    assert_eq!(transport.total(), 0);
}

#[tokio::test]
async fn test_proxy_synthesis_is_relayed() {
    let relayed = serde_json::json!({
        "id": "ai-generated",
        "title": "Proxy Curry",
        "readyInMinutes": 40,
        "servings": 2,
        "extendedIngredients": [{"id": 1, "original": "1 onion", "name": "onion"}],
        "analyzedInstructions": [{"name": "", "steps": [{"number": 1, "step": "Cook the onion."}]}],
        "source": "AI Generated"
    })
    .to_string();
    let transport = ScriptedTransport::new();
    transport
        .once(PROBE, 200, r#"{"recipes": []}"#)
        .once(PROXY_SEARCH, 200, &relayed);
    let orchestrator =
        orchestrator_with(test_config(true), &transport, Arc::new(InMemoryStore::new()));

    let recipe = orchestrator
        .search_recipe_with_ai("716429", Some("Curry"))
        .await
        .unwrap();

    assert_eq!(recipe.provenance, Provenance::AiGenerated);
    assert_eq!(recipe.title, "Proxy Curry");
    assert_eq!(recipe.ready_in_minutes, 40);
    let body = transport.requests()[1].body.clone().unwrap();
    assert_eq!(body["recipeName"], "Curry");
    assert_eq!(body["recipeId"], "716429");
}

#[tokio::test]
async fn test_proxy_placeholder_keeps_fallback_provenance() {
    let relayed = serde_json::to_string(&to_relay_shape(&placeholder_recipe(Some("Curry")))).unwrap();
    let transport = ScriptedTransport::new();
    transport
        .once(PROBE, 200, r#"{"recipes": []}"#)
        .once(PROXY_SEARCH, 200, &relayed);
    let orchestrator =
        orchestrator_with(test_config(true), &transport, Arc::new(InMemoryStore::new()));

    let recipe = orchestrator
        .search_recipe_with_ai("716429", Some("Curry"))
        .await
        .unwrap();

    assert_eq!(recipe.provenance, Provenance::MockFallback);
}

#[tokio::test]
async fn test_proxy_failure_falls_back_to_local_placeholder() {
    let transport = ScriptedTransport::new();
    transport
        .once(PROBE, 200, r#"{"recipes": []}"#)
        .once(PROXY_SEARCH, 503, "");
    let orchestrator =
        orchestrator_with(test_config(true), &transport, Arc::new(InMemoryStore::new()));

    let recipe = orchestrator
        .search_recipe_with_ai("716429", Some("Curry"))
        .await
        .unwrap();

    assert_eq!(recipe.provenance, Provenance::MockFallback);
    assert_eq!(transport.total(), 2);
}
