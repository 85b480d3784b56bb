// ABOUTME: Configuration module for the orchestrator and the proxy service
// ABOUTME: Environment-driven settings with defaults for every value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration loaded from environment variables.
//!
//! Every field has a default, so `from_env()` never fails; malformed
//! numeric or boolean values fall back to the default as well.

/// Orchestrator and proxy settings
pub mod environment;

pub use environment::{OrchestratorConfig, ProxyConfig};

use std::env;

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse an environment variable, falling back on absence or parse failure
pub(crate) fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag accepting `true/false/1/0/yes/no`
pub(crate) fn env_bool_or(key: &str, default: bool) -> bool {
    match env::var(key).map(|v| v.trim().to_lowercase()).as_deref() {
        Ok("true" | "1" | "yes" | "on") => true,
        Ok("false" | "0" | "no" | "off") => false,
        _ => default,
    }
}

/// Read an optional non-blank environment variable
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
