// ABOUTME: HTTP fetch capability consumed by the orchestrator
// ABOUTME: Request/response types, the HttpTransport trait, and credential redaction for logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP fetch capability
//!
//! The orchestrator never talks to `reqwest` directly. It builds an
//! [`HttpRequest`], hands it to an [`HttpTransport`], and classifies the
//! returned status itself. A transport returns `Err` only when no response
//! arrived at all (DNS, connect, timeout); every HTTP status, including
//! 4xx/5xx, comes back as `Ok(HttpResponse)`.

/// `reqwest`-backed transport
pub mod client;

pub use client::{shared_transport, ReqwestTransport};

use async_trait::async_trait;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::constants::endpoints::{GEMINI_KEY_PARAM, SPOONACULAR_KEY_PARAM};
use crate::errors::{AppError, AppResult};

const REDACTED: &str = "[REDACTED]";

/// Outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method (GET or POST in practice)
    pub method: Method,
    /// Fully-built URL including query string
    pub url: Url,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// JSON body for POST requests
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// GET `url`
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST `body` as JSON to `url`
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized
    pub fn post_json<T: Serialize + ?Sized>(url: Url, body: &T) -> AppResult<Self> {
        Ok(Self {
            method: Method::POST,
            url,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: Some(serde_json::to_value(body)?),
        })
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of query parameter `name`, if present
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// URL with credential parameters masked, for logging
    #[must_use]
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }
}

/// Response with status and raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body text
    pub body: String,
}

impl HttpResponse {
    /// Build a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Deserialize the body as JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error naming `service` if the body does not match `T`
    pub fn json<T: DeserializeOwned>(&self, service: &str) -> AppResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            AppError::serialization(format!("Unexpected {service} response body: {e}"))
                .with_status(self.status)
                .with_source(e)
        })
    }

    /// Best-effort error message from the body
    ///
    /// Prefers a JSON `message` or `error` field (or a nested `error.message`),
    /// falling back to the raw text.
    #[must_use]
    pub fn error_message(&self) -> String {
        let from_json = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| {
                ["message", "error"]
                    .iter()
                    .find_map(|field| v.get(field).and_then(|m| m.as_str()).map(str::to_owned))
                    .or_else(|| {
                        v.pointer("/error/message")
                            .and_then(|m| m.as_str())
                            .map(str::to_owned)
                    })
            });
        from_json.unwrap_or_else(|| {
            if self.body.trim().is_empty() {
                format!("HTTP error! status: {}", self.status)
            } else {
                self.body.trim().to_owned()
            }
        })
    }
}

/// HTTP fetch capability
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return whatever response arrived
    ///
    /// # Errors
    ///
    /// Returns a transport error only when no response was received
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse>;
}

/// Mask credential query parameters (`apiKey`, `key`) in `url`
#[must_use]
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == SPOONACULAR_KEY_PARAM || k == GEMINI_KEY_PARAM {
                REDACTED.to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_masks_credentials() {
        let url =
            Url::parse("https://api.spoonacular.com/recipes/1/information?apiKey=secret&x=1")
                .unwrap();
        let redacted = redact_url(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("x=1"));
        assert!(redacted.contains("apiKey=%5BREDACTED%5D"));
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let response = HttpResponse::new(402, r#"{"status":"failure","message":"Your daily points limit of 150 has been reached."}"#);
        assert!(response.error_message().contains("daily points limit"));
        assert_eq!(HttpResponse::new(500, "").error_message(), "HTTP error! status: 500");
    }
}
