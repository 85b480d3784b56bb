// ABOUTME: JSON-file key-value store persisting a single object of string entries
// ABOUTME: Default location is the platform data directory under chefmate/storage.json
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};

const STORE_DIR: &str = "chefmate";
const STORE_FILE: &str = "storage.json";

/// File-backed store
///
/// Entries are loaded once on open and written through on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::storage(format!("Failed to read {}", path.display())).with_source(e)
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::storage(format!("{} is not a JSON object of strings", path.display()))
                        .with_source(e)
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened key-value store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open the store at the platform default location
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is known or the file cannot be parsed
    pub fn open_default() -> AppResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// `<data dir>/chefmate/storage.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no data directory
    pub fn default_path() -> AppResult<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(STORE_DIR).join(STORE_FILE))
            .ok_or_else(|| AppError::storage("Could not determine the platform data directory"))
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("Failed to create {}", parent.display())).with_source(e)
            })?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| {
            AppError::storage(format!("Failed to write {}", tmp.display())).with_source(e)
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::storage(format!("Failed to replace {}", self.path.display())).with_source(e)
        })
    }
}

fn poisoned() -> AppError {
    AppError::storage("File store lock poisoned")
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
