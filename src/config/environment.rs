// ABOUTME: Orchestrator and proxy configuration types loaded from the environment
// ABOUTME: Base URLs, model name, transport preference, rate window, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{env_bool_or, env_non_empty, env_parse_or, env_var_or};
use crate::constants::{endpoints, limits};

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Proxy base URL (the `/api` prefix of the serverless functions)
    pub proxy_base_url: String,
    /// Direct recipe-provider base URL
    pub recipe_base_url: String,
    /// Direct generative-text base URL
    pub ai_base_url: String,
    /// Generative model name
    pub ai_model: String,
    /// Probe the proxy before the first request
    pub prefer_proxy: bool,
    /// Direct-mode requests allowed per rate window
    pub max_requests_per_minute: usize,
    /// Rate window length in seconds
    pub rate_window_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: endpoints::PROXY_BASE_URL.to_owned(),
            recipe_base_url: endpoints::SPOONACULAR_BASE_URL.to_owned(),
            ai_base_url: endpoints::GEMINI_BASE_URL.to_owned(),
            ai_model: endpoints::GEMINI_DEFAULT_MODEL.to_owned(),
            prefer_proxy: true,
            max_requests_per_minute: limits::DEFAULT_MAX_REQUESTS_PER_MINUTE,
            rate_window_secs: limits::RATE_WINDOW_SECS,
            request_timeout_secs: limits::DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: limits::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            proxy_base_url: trim_slash(env_var_or(
                "CHEFMATE_PROXY_BASE_URL",
                endpoints::PROXY_BASE_URL,
            )),
            recipe_base_url: trim_slash(env_var_or(
                "CHEFMATE_SPOONACULAR_BASE_URL",
                endpoints::SPOONACULAR_BASE_URL,
            )),
            ai_base_url: trim_slash(env_var_or(
                "CHEFMATE_GEMINI_BASE_URL",
                endpoints::GEMINI_BASE_URL,
            )),
            ai_model: env_var_or("CHEFMATE_GEMINI_MODEL", endpoints::GEMINI_DEFAULT_MODEL),
            prefer_proxy: env_bool_or("CHEFMATE_PREFER_PROXY", true),
            max_requests_per_minute: env_parse_or(
                "CHEFMATE_MAX_REQUESTS_PER_MINUTE",
                limits::DEFAULT_MAX_REQUESTS_PER_MINUTE,
            ),
            rate_window_secs: limits::RATE_WINDOW_SECS,
            request_timeout_secs: env_parse_or(
                "CHEFMATE_REQUEST_TIMEOUT_SECS",
                limits::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_timeout_secs: env_parse_or(
                "CHEFMATE_CONNECT_TIMEOUT_SECS",
                limits::DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }

    /// Configuration that skips the proxy and calls providers directly
    #[must_use]
    pub fn direct() -> Self {
        Self {
            prefer_proxy: false,
            ..Self::default()
        }
    }

    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connect timeout as a `Duration`
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Rate window as a `Duration`
    #[must_use]
    pub const fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }
}

/// Proxy service configuration
///
/// `Debug` redacts the upstream keys.
#[derive(Clone)]
pub struct ProxyConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Server-side recipe-provider key
    pub spoonacular_api_key: Option<String>,
    /// Server-side generative-text key
    pub gemini_api_key: Option<String>,
    /// Upstream recipe-provider base URL
    pub recipe_base_url: String,
    /// Upstream generative-text base URL
    pub ai_base_url: String,
    /// Generative model name
    pub ai_model: String,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            spoonacular_api_key: None,
            gemini_api_key: None,
            recipe_base_url: endpoints::SPOONACULAR_BASE_URL.to_owned(),
            ai_base_url: endpoints::GEMINI_BASE_URL.to_owned(),
            ai_model: endpoints::GEMINI_DEFAULT_MODEL.to_owned(),
            request_timeout_secs: limits::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProxyConfig {
    /// Load proxy configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_parse_or("CHEFMATE_PROXY_BIND", defaults.bind_addr),
            spoonacular_api_key: env_non_empty("SPOONACULAR_API_KEY"),
            gemini_api_key: env_non_empty("GEMINI_API_KEY"),
            recipe_base_url: trim_slash(env_var_or(
                "CHEFMATE_SPOONACULAR_BASE_URL",
                endpoints::SPOONACULAR_BASE_URL,
            )),
            ai_base_url: trim_slash(env_var_or(
                "CHEFMATE_GEMINI_BASE_URL",
                endpoints::GEMINI_BASE_URL,
            )),
            ai_model: env_var_or("CHEFMATE_GEMINI_MODEL", endpoints::GEMINI_DEFAULT_MODEL),
            request_timeout_secs: env_parse_or(
                "CHEFMATE_REQUEST_TIMEOUT_SECS",
                limits::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
        }
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("bind_addr", &self.bind_addr)
            .field(
                "spoonacular_api_key",
                &self.spoonacular_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("recipe_base_url", &self.recipe_base_url)
            .field("ai_base_url", &self.ai_base_url)
            .field("ai_model", &self.ai_model)
            .finish_non_exhaustive()
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
