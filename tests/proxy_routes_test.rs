// ABOUTME: Integration tests for the proxy router's passthrough, AI, and health endpoints
// ABOUTME: Drives the axum router in-process with tower's oneshot over a scripted upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![cfg(feature = "proxy")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chefmate::config::ProxyConfig;
use chefmate::proxy::{ProxyRoutes, ProxyState};
use common::{
    gemini_answer, init_test_logging, ScriptedTransport, AI_BASE, GEMINI_KEY, RECIPE_BASE,
    SPOON_KEY_A,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(transport: &Arc<ScriptedTransport>, with_keys: bool) -> Router {
    init_test_logging();
    let config = ProxyConfig {
        spoonacular_api_key: with_keys.then(|| SPOON_KEY_A.to_owned()),
        gemini_api_key: with_keys.then(|| GEMINI_KEY.to_owned()),
        recipe_base_url: RECIPE_BASE.to_owned(),
        ai_base_url: AI_BASE.to_owned(),
        ..ProxyConfig::default()
    };
    ProxyRoutes::routes(ProxyState::new(config, transport.clone()))
}

async fn call(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Recipe passthrough
// ============================================================================

#[tokio::test]
async fn test_passthrough_adds_server_key() {
    let transport = ScriptedTransport::new();
    transport.once("/recipes/9/information", 200, r#"{"id": 9, "title": "Tacos"}"#);

    let (status, body) = call(
        router(&transport, true),
        get("/api/spoonacular?endpoint=%2Frecipes%2F9%2Finformation&includeNutrition=true&diet="),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id": 9, "title": "Tacos"}"#);
    let url = &transport.urls()[0];
    assert!(url.starts_with("https://spoon.test/recipes/9/information?"));
    assert!(url.contains(&format!("apiKey={SPOON_KEY_A}")));
    assert!(url.contains("includeNutrition=true"));
    assert!(!url.contains("diet="));
}

#[tokio::test]
async fn test_passthrough_requires_endpoint() {
    let transport = ScriptedTransport::new();

    let (status, body) = call(router(&transport, true), get("/api/spoonacular?number=1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Endpoint parameter is required"));
    assert_eq!(transport.total(), 0);
}

#[tokio::test]
async fn test_passthrough_without_server_key() {
    let transport = ScriptedTransport::new();

    let (status, body) = call(
        router(&transport, false),
        get("/api/spoonacular?endpoint=%2Frecipes%2Frandom"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("API key not configured"));
}

#[tokio::test]
async fn test_passthrough_relays_upstream_status() {
    let transport = ScriptedTransport::new();
    transport.once("/recipes/random", 402, r#"{"message": "daily points limit"}"#);

    let (status, body) = call(
        router(&transport, true),
        get("/api/spoonacular?endpoint=%2Frecipes%2Frandom"),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], "Spoonacular API error: 402");
    assert!(body["details"].as_str().unwrap().contains("daily points limit"));
}

// ============================================================================
// AI tips
// ============================================================================

#[tokio::test]
async fn test_tips_without_key_are_static() {
    let transport = ScriptedTransport::new();

    let (status, body) = call(
        router(&transport, false),
        post("/api/gemini", &json!({"prompt": "tips for soup"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["tips"].as_array().unwrap().len(), 4);
    assert_eq!(body["provenance"], "mock-fallback");
    assert_eq!(transport.total(), 0);
}

#[tokio::test]
async fn test_tips_from_model() {
    let transport = ScriptedTransport::new();
    transport.once(
        "gemini.test",
        200,
        &gemini_answer(r#"{"tips": ["Toast the spices first", "Finish with lime juice"]}"#),
    );

    let (status, body) = call(
        router(&transport, true),
        post("/api/gemini", &json!({"prompt": "tips for curry"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["tips"][0], "Toast the spices first");
    assert_eq!(body["provenance"], "ai-generated");
}

#[tokio::test]
async fn test_tips_model_failure_is_static() {
    let transport = ScriptedTransport::new();
    transport.once("gemini.test", 500, r#"{"error": {"message": "overloaded"}}"#);

    let (status, body) = call(
        router(&transport, true),
        post("/api/gemini", &json!({"prompt": "tips for curry"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["provenance"], "mock-fallback");
}

#[tokio::test]
async fn test_tips_require_prompt() {
    let transport = ScriptedTransport::new();

    let (status, _) = call(router(&transport, true), post("/api/gemini", &json!({"prompt": " "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// AI recipe synthesis
// ============================================================================

#[tokio::test]
async fn test_recipe_search_without_key_returns_placeholder() {
    let transport = ScriptedTransport::new();

    let (status, body) = call(
        router(&transport, false),
        post(
            "/api/gemini-search",
            &json!({"prompt": "find it", "recipeId": "716429", "recipeName": "Paella"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["id"], "ai-generated");
    assert_eq!(body["source"], "AI Generated (Fallback)");
    assert!(body["title"].as_str().unwrap().starts_with("Paella"));
}

#[tokio::test]
async fn test_recipe_search_from_model() {
    let transport = ScriptedTransport::new();
    transport.once(
        "gemini.test",
        200,
        &gemini_answer(
            r#"{"title": "Seafood Paella", "cookTime": "45 minutes", "ingredients": ["2 cups rice"], "instructions": ["Cook it."]}"#,
        ),
    );

    let (status, body) = call(
        router(&transport, true),
        post("/api/gemini-search", &json!({"prompt": "find it", "recipeName": "Paella"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["title"], "Seafood Paella");
    assert_eq!(body["readyInMinutes"], 45);
    assert_eq!(body["source"], "AI Generated");

    let sent = transport.requests()[0].body.as_ref().unwrap().to_string();
    assert!(sent.contains("find it"));
}

#[tokio::test]
async fn test_recipe_search_requires_prompt() {
    let transport = ScriptedTransport::new();

    let (status, _) = call(
        router(&transport, false),
        post("/api/gemini-search", &json!({"recipeName": "Paella"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_configured_keys() {
    let transport = ScriptedTransport::new();

    let (status, body) = call(router(&transport, false), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["spoonacular"], false);
    assert_eq!(body["gemini"], false);
}
