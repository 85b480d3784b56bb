// ABOUTME: reqwest-backed HttpTransport with connection pooling and timeout configuration
// ABOUTME: Provides a shared singleton transport and configurable instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::config::OrchestratorConfig;
use crate::constants::limits::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::errors::{AppError, AppResult};

/// Global shared transport with default timeouts
static SHARED_TRANSPORT: OnceLock<Arc<ReqwestTransport>> = OnceLock::new();

/// Get or create the shared transport with default settings
pub fn shared_transport() -> Arc<ReqwestTransport> {
    SHARED_TRANSPORT
        .get_or_init(|| {
            Arc::new(ReqwestTransport::with_timeouts(
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
        })
        .clone()
}

/// `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with custom timeouts
    #[must_use]
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("chefmate/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Create a transport using the configured timeouts
    #[must_use]
    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self::with_timeouts(config.request_timeout(), config.connect_timeout())
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.redacted_url()))]
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let host = request.url.host_str().unwrap_or("upstream").to_owned();
        let mut builder = self.client.request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out"
            } else if e.is_connect() {
                "connection failed"
            } else {
                "request failed"
            };
            AppError::transport(host.as_str(), reason).with_source(e.without_url())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AppError::transport(host.as_str(), "failed to read response body")
                .with_status(status)
                .with_source(e.without_url())
        })?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(HttpResponse { status, body })
    }
}
