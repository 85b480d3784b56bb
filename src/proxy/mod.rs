// ABOUTME: Serverless-style proxy endpoints holding provider credentials server-side
// ABOUTME: Recipe passthrough, AI tips, and AI recipe synthesis with placeholder fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Proxy routes
//!
//! The orchestrator's proxy transport talks to these handlers. They add the
//! server's key and forward to the providers. The AI endpoints never fail
//! for upstream reasons: without a key, or when the model errors, they
//! answer 200 with the static tips or the placeholder recipe.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::ai::tips::generic_tips;
use crate::ai::{parse_recipe_document, parse_tips};
use crate::config::ProxyConfig;
use crate::constants::generation::STATIC_TIPS_RETURNED;
use crate::errors::{AppError, AppResult};
use crate::http::{HttpRequest, HttpTransport};
use crate::llm::gemini::{self, GeminiEndpoint};
use crate::llm::{GenerationConfig, RecipeProxyRequest, TipsProxyRequest};
use crate::models::CookingTips;
use crate::normalize::{placeholder_recipe, to_relay_shape, RecipeSource};
use crate::providers::spoonacular::{ProviderQuery, ENDPOINT_PARAM};

/// Tips returned when the model answered but nothing could be parsed
const PARSE_FAILURE_TIPS: usize = 3;

/// Shared handler state
#[derive(Clone)]
pub struct ProxyState {
    config: Arc<ProxyConfig>,
    http: Arc<dyn HttpTransport>,
    gemini: GeminiEndpoint,
}

impl ProxyState {
    /// State for `config`, calling upstream through `http`
    #[must_use]
    pub fn new(config: ProxyConfig, http: Arc<dyn HttpTransport>) -> Self {
        let gemini = GeminiEndpoint::new(&config.ai_base_url, &config.ai_model);
        Self {
            config: Arc::new(config),
            http,
            gemini,
        }
    }

    /// Proxy configuration
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    async fn generate(&self, key: &str, prompt: &str, config: GenerationConfig) -> AppResult<String> {
        let request = self.gemini.generate_request(key, prompt, config)?;
        let response = self.http.send(request).await?;
        if !response.is_success() {
            return Err(gemini::map_api_error(response.status, &response.body));
        }
        gemini::extract_text(&response.body)
    }
}

/// Proxy route table
pub struct ProxyRoutes;

impl ProxyRoutes {
    /// Build the router with permissive CORS
    pub fn routes(state: ProxyState) -> Router {
        Router::new()
            .route("/api/spoonacular", get(Self::handle_spoonacular))
            .route("/api/gemini", post(Self::handle_tips))
            .route("/api/gemini-search", post(Self::handle_recipe_search))
            .route("/health", get(Self::handle_health))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Handle GET /api/spoonacular - forward `endpoint` with the server key
    async fn handle_spoonacular(
        State(state): State<ProxyState>,
        Query(params): Query<Vec<(String, String)>>,
    ) -> Result<Response, AppError> {
        let mut endpoint = None;
        let mut forwarded = Vec::with_capacity(params.len());
        for (name, value) in params {
            if name == ENDPOINT_PARAM {
                endpoint = Some(value);
            } else if !value.is_empty() {
                forwarded.push((name, value));
            }
        }

        let Some(path) = endpoint.filter(|e| !e.trim().is_empty()) else {
            return Err(AppError::invalid_input("Endpoint parameter is required"));
        };
        let Some(key) = state.config.spoonacular_api_key.as_deref() else {
            return Err(AppError::config_missing("API key not configured"));
        };

        let query = ProviderQuery {
            path,
            params: forwarded,
        };
        let request = HttpRequest::get(query.direct_url(&state.config.recipe_base_url, key)?);
        info!(url = %request.redacted_url(), "Forwarding to Spoonacular");
        let response = state.http.send(request).await?;

        if !response.is_success() {
            error!(status = response.status, "Spoonacular API error");
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let body = json!({
                "error": format!("Spoonacular API error: {}", response.status),
                "details": response.body,
            });
            return Ok((status, Json(body)).into_response());
        }

        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            response.body,
        )
            .into_response())
    }

    /// Handle POST /api/gemini - cooking tips, static tips on any upstream failure
    async fn handle_tips(
        State(state): State<ProxyState>,
        Json(body): Json<TipsProxyRequest>,
    ) -> Result<Json<CookingTips>, AppError> {
        let Some(key) = state.config.gemini_api_key.as_deref() else {
            return Ok(Json(CookingTips::fallback(generic_tips(STATIC_TIPS_RETURNED))));
        };
        if body.prompt.trim().is_empty() {
            return Err(AppError::invalid_input("Prompt is required"));
        }

        let text = match state.generate(key, &body.prompt, GenerationConfig::tips()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Gemini tips call failed, returning static tips");
                return Ok(Json(CookingTips::fallback(generic_tips(STATIC_TIPS_RETURNED))));
            }
        };

        let tips = parse_tips(&text);
        if tips.is_empty() {
            warn!("No tips parsed from Gemini answer");
            return Ok(Json(CookingTips::fallback(generic_tips(PARSE_FAILURE_TIPS))));
        }
        Ok(Json(CookingTips::generated(tips)))
    }

    /// Handle POST /api/gemini-search - synthesize a recipe, placeholder on failure
    async fn handle_recipe_search(
        State(state): State<ProxyState>,
        Json(body): Json<RecipeProxyRequest>,
    ) -> Result<Response, AppError> {
        if body.prompt.trim().is_empty() {
            return Err(AppError::invalid_input("Prompt is required"));
        }
        let name_hint = body.recipe_name.as_deref();
        let placeholder = || Json(to_relay_shape(&placeholder_recipe(name_hint))).into_response();

        let Some(key) = state.config.gemini_api_key.as_deref() else {
            return Ok(placeholder());
        };

        let document = match state.generate(key, &body.prompt, GenerationConfig::recipe()).await {
            Ok(text) => parse_recipe_document(&text),
            Err(e) => Err(e),
        };

        match document {
            Ok(document) => {
                let record = RecipeSource::AiGenerated(document).normalize();
                Ok(Json(to_relay_shape(&record)).into_response())
            }
            Err(e) => {
                warn!(error = %e, "AI recipe synthesis failed, returning placeholder");
                Ok(placeholder())
            }
        }
    }

    /// Handle GET /health
    async fn handle_health(State(state): State<ProxyState>) -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "spoonacular": state.config.spoonacular_api_key.is_some(),
            "gemini": state.config.gemini_api_key.is_some(),
        }))
    }
}
