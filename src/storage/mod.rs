// ABOUTME: Key-value persistence capability used for API key storage
// ABOUTME: Synchronous get/set/remove by string key with JSON helpers and pluggable backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Key-value persistence
//!
//! A browser-local-storage style capability: string keys, string values,
//! synchronous, no transactions, no expiry. The orchestrator only needs it
//! for credentials, but the JSON helpers let callers persist structured
//! values too.

/// JSON file backend
pub mod file;
/// In-memory backend
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{AppError, AppResult};

/// Pluggable key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// JSON convenience methods for any [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and deserialize a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value is not valid JSON for `T`
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        self.get(key)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::storage(format!("Stored value for '{key}' is not valid JSON: {e}"))
                })
            })
            .transpose()
    }

    /// Serialize and store a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// Read a value, treating blank strings as absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn get_non_blank(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.get(key)?.filter(|v| !v.trim().is_empty()))
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
