// ABOUTME: Integration tests for the reqwest transport and direct mode against a mock HTTP server
// ABOUTME: Uses wiremock to check status passthrough, JSON bodies, and connection failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use chefmate::config::OrchestratorConfig;
use chefmate::errors::ErrorCode;
use chefmate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use chefmate::orchestrator::ApiOrchestrator;
use chefmate::providers::spoonacular::IngredientSearchOptions;
use common::{init_test_logging, recipe_detail, store_with, SEARCH_RESULTS, SPOON_KEY_A};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::with_timeouts(Duration::from_secs(5), Duration::from_secs(2))
}

#[tokio::test]
async fn test_non_success_status_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/1/information"))
        .respond_with(ResponseTemplate::new(402).set_body_string(r#"{"message": "quota"}"#))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/recipes/1/information", server.uri())).unwrap();
    let response = transport().send(HttpRequest::get(url)).await.unwrap();

    assert_eq!(response.status, 402);
    assert!(!response.is_success());
    assert_eq!(response.error_message(), "quota");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gemini"))
        .and(body_json(json!({"prompt": "tips please"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tips": ["a tip here"]})))
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/api/gemini", server.uri())).unwrap();
    let request = HttpRequest::post_json(url, &json!({"prompt": "tips please"})).unwrap();
    let response = transport().send(request).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.contains("a tip here"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let url = Url::parse("http://127.0.0.1:1/recipes/random").unwrap();
    let err = transport().send(HttpRequest::get(url)).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.code.is_transport());
}

#[tokio::test]
async fn test_direct_search_end_to_end() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .and(query_param("apiKey", SPOON_KEY_A))
        .and(query_param("ingredients", "chicken,rice"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_RESULTS))
        .mount(&server)
        .await;
    for (id, title) in [(101, "Fried Rice"), (202, "Congee")] {
        Mock::given(method("GET"))
            .and(path(format!("/recipes/{id}/information")))
            .and(query_param("includeNutrition", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(recipe_detail(id, title)))
            .mount(&server)
            .await;
    }

    let config = OrchestratorConfig {
        recipe_base_url: server.uri(),
        ..OrchestratorConfig::direct()
    };
    let orchestrator = ApiOrchestrator::new(
        config,
        Arc::new(transport()),
        store_with(&[("chefmate_spoonacular_key", SPOON_KEY_A)]),
    )
    .unwrap();

    let recipes = orchestrator
        .search_recipes_by_ingredients(
            &["chicken".to_owned(), "rice".to_owned()],
            &IngredientSearchOptions::default(),
        )
        .await
        .unwrap();

    let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Fried Rice", "Congee"]);
}
