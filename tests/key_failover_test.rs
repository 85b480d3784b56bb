// ABOUTME: Integration tests for primary/backup key failover on provider quota exhaustion
// ABOUTME: Verifies one rotation per exhaustion, no reuse of exhausted keys, and non-quota errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chefmate::errors::ErrorCode;
use chefmate::models::RecipeId;
use chefmate::orchestrator::ApiOrchestrator;
use common::{
    orchestrator_with, recipe_detail, store_with, test_config, ScriptedTransport, QUOTA_BODY,
    SPOON_KEY_A, SPOON_KEY_B,
};
use std::sync::Arc;

const KEY_A_PARAM: &str = "apiKey=aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const KEY_B_PARAM: &str = "apiKey=bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn two_key_orchestrator(transport: &Arc<ScriptedTransport>) -> ApiOrchestrator {
    orchestrator_with(
        test_config(false),
        transport,
        store_with(&[
            ("chefmate_spoonacular_key", SPOON_KEY_A),
            ("chefmate_spoonacular_key_2", SPOON_KEY_B),
        ]),
    )
}

#[tokio::test]
async fn test_quota_on_primary_switches_to_backup() {
    let transport = ScriptedTransport::new();
    transport
        .once(KEY_A_PARAM, 402, QUOTA_BODY)
        .always(KEY_B_PARAM, 200, &recipe_detail(101, "Fried Rice"));
    let orchestrator = two_key_orchestrator(&transport);

    let recipe = orchestrator
        .get_recipe_information(&RecipeId::Provider(101))
        .await
        .unwrap();

    assert_eq!(recipe.title, "Fried Rice");
    assert_eq!(transport.count(KEY_A_PARAM), 1);
    assert_eq!(transport.count(KEY_B_PARAM), 1);
    assert_eq!(orchestrator.recipe_keys().index(), 1);
}

#[tokio::test]
async fn test_backup_stays_in_use_after_rotation() {
    let transport = ScriptedTransport::new();
    transport
        .once(KEY_A_PARAM, 402, QUOTA_BODY)
        .always(KEY_B_PARAM, 200, &recipe_detail(101, "Fried Rice"));
    let orchestrator = two_key_orchestrator(&transport);

    for _ in 0..3 {
        orchestrator
            .get_recipe_information(&RecipeId::Provider(101))
            .await
            .unwrap();
    }

    assert_eq!(transport.count(KEY_A_PARAM), 1);
    assert_eq!(transport.count(KEY_B_PARAM), 3);
}

#[tokio::test]
async fn test_exhausted_ring_reports_quota_without_retrying_primary() {
    let transport = ScriptedTransport::new();
    transport
        .once(KEY_A_PARAM, 402, QUOTA_BODY)
        .always(KEY_B_PARAM, 402, QUOTA_BODY);
    let orchestrator = two_key_orchestrator(&transport);

    let err = orchestrator
        .get_recipe_information(&RecipeId::Provider(101))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    assert_eq!(err.status(), Some(402));
    assert_eq!(transport.count(KEY_A_PARAM), 1);
    assert_eq!(transport.count(KEY_B_PARAM), 1);

    let again = orchestrator
        .get_recipe_information(&RecipeId::Provider(101))
        .await
        .unwrap_err();
    assert_eq!(again.code, ErrorCode::QuotaExceeded);
    assert_eq!(transport.count(KEY_A_PARAM), 1);
}

#[tokio::test]
async fn test_quota_message_without_402_rotates() {
    let transport = ScriptedTransport::new();
    transport
        .once(
            KEY_A_PARAM,
            429,
            r#"{"message": "Your daily points limit of 150 has been reached."}"#,
        )
        .always(KEY_B_PARAM, 200, &recipe_detail(7, "Soup"));
    let orchestrator = two_key_orchestrator(&transport);

    let recipe = orchestrator
        .get_recipe_information(&RecipeId::Provider(7))
        .await
        .unwrap();

    assert_eq!(recipe.title, "Soup");
    assert_eq!(orchestrator.recipe_keys().index(), 1);
}

#[tokio::test]
async fn test_server_error_does_not_rotate() {
    let transport = ScriptedTransport::new();
    transport
        .once(KEY_A_PARAM, 500, r#"{"message": "internal error"}"#)
        .always(KEY_B_PARAM, 200, &recipe_detail(7, "Soup"));
    let orchestrator = two_key_orchestrator(&transport);

    let err = orchestrator
        .get_recipe_information(&RecipeId::Provider(7))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(transport.count(KEY_B_PARAM), 0);
    assert_eq!(orchestrator.recipe_keys().index(), 0);
}

#[tokio::test]
async fn test_single_key_quota_is_systemic() {
    let transport = ScriptedTransport::new();
    transport.always(KEY_A_PARAM, 402, QUOTA_BODY);
    let orchestrator = orchestrator_with(
        test_config(false),
        &transport,
        store_with(&[("chefmate_spoonacular_key", SPOON_KEY_A)]),
    );

    let err = orchestrator
        .get_recipe_information(&RecipeId::Provider(7))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    assert!(err.code.is_systemic());
    assert_eq!(transport.total(), 1);
}

#[tokio::test]
async fn test_setting_a_new_key_restarts_the_ring() {
    let transport = ScriptedTransport::new();
    transport
        .once(KEY_A_PARAM, 402, QUOTA_BODY)
        .always(KEY_B_PARAM, 200, &recipe_detail(7, "Soup"));
    let orchestrator = two_key_orchestrator(&transport);

    orchestrator
        .get_recipe_information(&RecipeId::Provider(7))
        .await
        .unwrap();
    assert_eq!(orchestrator.recipe_keys().index(), 1);

    orchestrator
        .set_api_key(
            chefmate::orchestrator::ApiService::Spoonacular,
            "cccccccccccccccccccccccccccccccc",
        )
        .unwrap();
    assert_eq!(orchestrator.recipe_keys().index(), 0);
    assert_eq!(orchestrator.recipe_keys().len(), 2);
}
