// ABOUTME: Integration tests for the JSON-file key-value store
// ABOUTME: Persistence across reopen, removal, corrupt files, and keys surviving an orchestrator restart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::sync::Arc;

use chefmate::errors::ErrorCode;
use chefmate::orchestrator::ApiService;
use chefmate::storage::{JsonFileStore, KeyValueStore, KeyValueStoreExt};
use common::{orchestrator_with, test_config, ScriptedTransport, SPOON_KEY_A};
use tempfile::TempDir;

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store = JsonFileStore::open(&path).unwrap();
    store.set("chefmate_gemini_key", "value-1").unwrap();
    store.set("other", "value-2").unwrap();
    store.remove("other").unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("chefmate_gemini_key").unwrap().as_deref(),
        Some("value-1")
    );
    assert_eq!(reopened.get("other").unwrap(), None);
}

#[test]
fn test_missing_and_empty_files_open_empty() {
    let dir = TempDir::new().unwrap();
    let missing = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
    assert_eq!(missing.get("anything").unwrap(), None);

    let empty_path = dir.path().join("empty.json");
    fs::write(&empty_path, "  \n").unwrap();
    let empty = JsonFileStore::open(&empty_path).unwrap();
    assert_eq!(empty.get("anything").unwrap(), None);
}

#[test]
fn test_corrupt_file_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);
}

#[test]
fn test_json_helpers_and_blank_values() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("storage.json")).unwrap();

    store.set_json("favorites", &vec![716_429_u64, 42]).unwrap();
    let favorites: Vec<u64> = store.get_json("favorites").unwrap().unwrap();
    assert_eq!(favorites, vec![716_429, 42]);

    store.set("blank", "   ").unwrap();
    assert_eq!(store.get_non_blank("blank").unwrap(), None);
}

#[test]
fn test_orchestrator_keys_persist_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let transport = ScriptedTransport::new();

    let first = orchestrator_with(
        test_config(false),
        &transport,
        Arc::new(JsonFileStore::open(&path).unwrap()),
    );
    first
        .set_api_key(ApiService::Spoonacular, SPOON_KEY_A)
        .unwrap();
    drop(first);

    let second = orchestrator_with(
        test_config(false),
        &transport,
        Arc::new(JsonFileStore::open(&path).unwrap()),
    );
    assert_eq!(second.recipe_keys().len(), 1);
    assert!(second.has_api_key(ApiService::Spoonacular).unwrap());
    assert!(second.check_setup().ready);
}
