// ABOUTME: API key services, format validation, and setup status reporting
// ABOUTME: Maps each service to its storage slots and checks key shapes before persisting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{messages, services, storage_keys};
use crate::errors::AppError;

static SPOONACULAR_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]{32}$").ok());
static GEMINI_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^AIzaSy[A-Za-z0-9_-]{33}$").ok());

/// External service a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiService {
    /// Recipe provider
    Spoonacular,
    /// Generative-text provider
    Gemini,
}

impl ApiService {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spoonacular => services::SPOONACULAR,
            Self::Gemini => services::GEMINI,
        }
    }

    /// Storage slots in ring order (primary first)
    #[must_use]
    pub const fn storage_slots(self) -> &'static [&'static str] {
        match self {
            Self::Spoonacular => &[
                storage_keys::SPOONACULAR_PRIMARY,
                storage_keys::SPOONACULAR_BACKUP,
            ],
            Self::Gemini => &[storage_keys::GEMINI],
        }
    }

    /// Primary storage slot
    #[must_use]
    pub const fn primary_slot(self) -> &'static str {
        match self {
            Self::Spoonacular => storage_keys::SPOONACULAR_PRIMARY,
            Self::Gemini => storage_keys::GEMINI,
        }
    }
}

impl fmt::Display for ApiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiService {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            services::SPOONACULAR => Ok(Self::Spoonacular),
            services::GEMINI => Ok(Self::Gemini),
            other => Err(AppError::invalid_input(format!("Unknown service: {other}"))),
        }
    }
}

/// Outcome of a key format check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValidation {
    /// Key has the expected shape
    pub valid: bool,
    /// Reason when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyValidation {
    const fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            valid: false,
            error: Some(message.to_owned()),
        }
    }
}

/// Check `key` against the format `service` issues
///
/// Only the shape is checked; no request is made.
#[must_use]
pub fn validate_api_key(service: ApiService, key: &str) -> KeyValidation {
    let key = key.trim();
    if key.is_empty() {
        return KeyValidation::rejected(messages::EMPTY_KEY);
    }
    let (pattern, message) = match service {
        ApiService::Spoonacular => (&*SPOONACULAR_KEY, messages::INVALID_SPOONACULAR_KEY),
        ApiService::Gemini => (&*GEMINI_KEY, messages::INVALID_GEMINI_KEY),
    };
    match pattern {
        Some(re) if re.is_match(key) => KeyValidation::ok(),
        _ => KeyValidation::rejected(message),
    }
}

/// Whether the orchestrator can serve requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    /// Requests can be served
    pub ready: bool,
    /// Human-readable summary
    pub message: String,
    /// Services that still need a key
    pub missing_keys: Vec<ApiService>,
    /// A generative-text key is stored (direct AI available)
    pub has_ai_key: bool,
}
