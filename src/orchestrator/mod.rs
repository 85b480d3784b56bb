// ABOUTME: ApiOrchestrator, the single point of contact for recipe-provider and generative-text calls
// ABOUTME: Hides transport selection, key failover, rate limiting, and response-shape differences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Orchestrator
//!
//! Every public operation resolves the session [`TransportMode`] (probing
//! the proxy once), dispatches through a [`StrategyChain`] (proxy, then
//! direct), and normalizes the answer into a [`RecipeRecord`].
//!
//! Direct dispatch is rate limited by a [`RateWindow`] and authenticated
//! from an [`ApiKeyRing`] that fails over to the backup key on quota
//! exhaustion. AI operations degrade instead of failing: tips fall back to
//! a static list, recipe synthesis without a key returns the placeholder.

/// API key rings
pub mod key_ring;
/// Key services, validation, and setup status
pub mod keys;
/// Direct-mode sliding rate window
pub mod rate_window;
/// Ordered fallback runner
pub mod strategy;
/// Session transport state
pub mod transport;

pub use key_ring::ApiKeyRing;
pub use keys::{validate_api_key, ApiService, KeyValidation, SetupStatus};
pub use rate_window::RateWindow;
pub use strategy::StrategyChain;
pub use transport::{TransportMode, TransportState};

use std::sync::Arc;

use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::ai::{parse_recipe_document, parse_tips, recipe_prompt, static_tips, tips_prompt};
use crate::config::OrchestratorConfig;
use crate::constants::{endpoints, messages, services};
use crate::errors::{AppError, AppResult};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::llm::gemini::{self, GeminiEndpoint};
use crate::llm::{GenerationConfig, RecipeProxyRequest, TipsProxyRequest};
use crate::models::{CookingTips, InstructionGroup, NutritionWidget, RecipeId, RecipeRecord};
use crate::normalize::{convert_instructions, enrich_summary, RecipeSource};
use crate::providers::spoonacular::{
    self, ComplexSearchResponse, IngredientSearchOptions, ProviderInstructionGroup, ProviderQuery,
    ProviderRecipe, RandomRecipeOptions, RandomRecipesResponse, RecipeSearchOptions,
};
use crate::storage::{KeyValueStore, KeyValueStoreExt};
use strategy::{always, never, proxied_failure};

/// Recipe and AI API orchestrator
///
/// Construct one per session with the HTTP and storage capabilities
/// injected. All state (transport mode, key rings, rate window) lives on
/// the instance and is safe to share behind an `Arc`.
pub struct ApiOrchestrator {
    config: OrchestratorConfig,
    http: Arc<dyn HttpTransport>,
    store: Arc<dyn KeyValueStore>,
    transport: TransportState,
    probe_lock: Mutex<()>,
    recipe_keys: ApiKeyRing,
    ai_keys: ApiKeyRing,
    rate_window: RateWindow,
    gemini: GeminiEndpoint,
}

impl std::fmt::Debug for ApiOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiOrchestrator")
            .field("transport", &self.transport.current())
            .field("recipe_keys", &self.recipe_keys)
            .field("ai_keys", &self.ai_keys)
            .field("rate_window", &self.rate_window.limit())
            .finish_non_exhaustive()
    }
}

impl ApiOrchestrator {
    /// Build an orchestrator, loading stored keys
    ///
    /// With `prefer_proxy` off the session starts locked to direct mode.
    ///
    /// # Errors
    ///
    /// Returns a storage error if stored keys cannot be read
    pub fn new(
        config: OrchestratorConfig,
        http: Arc<dyn HttpTransport>,
        store: Arc<dyn KeyValueStore>,
    ) -> AppResult<Self> {
        let recipe_keys = ApiKeyRing::new(
            services::SPOONACULAR,
            load_keys(store.as_ref(), ApiService::Spoonacular)?,
        );
        let ai_keys = ApiKeyRing::new(
            services::GEMINI,
            load_keys(store.as_ref(), ApiService::Gemini)?,
        );
        let transport = if config.prefer_proxy {
            TransportState::new()
        } else {
            TransportState::locked(TransportMode::Direct)
        };

        info!(
            prefer_proxy = config.prefer_proxy,
            recipe_keys = recipe_keys.len(),
            ai_keys = ai_keys.len(),
            "Initialized API orchestrator"
        );

        Ok(Self {
            rate_window: RateWindow::new(config.max_requests_per_minute, config.rate_window()),
            gemini: GeminiEndpoint::new(&config.ai_base_url, &config.ai_model),
            config,
            http,
            store,
            transport,
            probe_lock: Mutex::new(()),
            recipe_keys,
            ai_keys,
        })
    }

    /// Transport mode in force, `None` before the first request
    #[must_use]
    pub fn transport_mode(&self) -> Option<TransportMode> {
        self.transport.current()
    }

    /// Recipe-provider key ring
    #[must_use]
    pub const fn recipe_keys(&self) -> &ApiKeyRing {
        &self.recipe_keys
    }

    // ========================================================================
    // Transport selection
    // ========================================================================

    async fn resolve_transport(&self) -> TransportMode {
        if let Some(mode) = self.transport.current() {
            return mode;
        }
        let _probe = self.probe_lock.lock().await;
        if let Some(mode) = self.transport.current() {
            return mode;
        }
        let mode = self.probe_proxy().await;
        self.transport.lock(mode)
    }

    /// Liveness probe: any status but 404 means the proxy is there
    async fn probe_proxy(&self) -> TransportMode {
        let url = match ProviderQuery::probe().proxy_url(&self.config.proxy_base_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Proxy URL invalid, using direct transport");
                return TransportMode::Direct;
            }
        };
        match self.http.send(HttpRequest::get(url)).await {
            Ok(response) if response.status != 404 => {
                debug!(status = response.status, "Proxy probe answered");
                TransportMode::ServerlessProxy
            }
            Ok(_) => {
                info!("Proxy probe returned 404, using direct transport");
                TransportMode::Direct
            }
            Err(e) => {
                info!(error = %e, "Proxy unreachable, using direct transport");
                TransportMode::Direct
            }
        }
    }

    /// Probe the proxy again, ignoring an earlier downgrade
    pub async fn retry_proxy(&self) -> TransportMode {
        let _probe = self.probe_lock.lock().await;
        self.transport.reset();
        let mode = self.probe_proxy().await;
        self.transport.lock(mode)
    }

    fn proxy_endpoint(&self, path: &str) -> AppResult<Url> {
        let raw = format!("{}{path}", self.config.proxy_base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| {
            AppError::config_invalid(format!("Invalid proxy URL '{raw}': {e}")).with_source(e)
        })
    }

    /// Downgrade when a proxied call failed so the direct retry sticks
    fn downgrade_on_failure<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            warn!(error = %e, "Proxied call failed");
            self.transport.downgrade();
        }
        result
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Fetch one provider endpoint under the session transport
    async fn fetch_provider<T>(&self, query: &ProviderQuery) -> AppResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let mut chain = StrategyChain::new("recipe_provider");
        if self.resolve_transport().await == TransportMode::ServerlessProxy {
            chain = chain.then("proxy", proxied_failure, || async {
                self.downgrade_on_failure(self.proxy_get(query).await)
            });
        }
        chain
            .then("direct", never, || self.direct_get(query))
            .run()
            .await
    }

    async fn proxy_get<T: DeserializeOwned>(&self, query: &ProviderQuery) -> AppResult<T> {
        let request = HttpRequest::get(query.proxy_url(&self.config.proxy_base_url)?);
        debug!(url = %request.redacted_url(), "Proxy provider request");
        let response = self.http.send(request).await?;
        if !response.is_success() {
            return Err(provider_error(&response));
        }
        response.json(spoonacular::SERVICE_NAME)
    }

    /// Direct provider call with rate limiting and key failover
    async fn direct_get<T: DeserializeOwned>(&self, query: &ProviderQuery) -> AppResult<T> {
        let Some((mut index, mut key)) = self.recipe_keys.current() else {
            return Err(AppError::config_missing(
                "No Spoonacular API key configured and the proxy is unavailable",
            ));
        };

        loop {
            let request = HttpRequest::get(query.direct_url(&self.config.recipe_base_url, &key)?);
            let slot = self.rate_window.acquire().await?;
            debug!(url = %request.redacted_url(), key_index = index, "Direct provider request");
            let response = match self.http.send(request).await {
                Ok(response) => response,
                Err(e) => {
                    self.rate_window.release(slot).await;
                    return Err(e);
                }
            };

            if response.is_success() {
                return response.json(spoonacular::SERVICE_NAME);
            }
            if !spoonacular::is_quota_exhausted(response.status, &response.body) {
                return Err(provider_error(&response));
            }
            match self.recipe_keys.advance_from(index) {
                Some((next, next_key)) => {
                    index = next;
                    key = next_key;
                }
                None => {
                    warn!(key_index = index, "Every Spoonacular key is out of quota");
                    return Err(AppError::quota_exceeded(services::SPOONACULAR)
                        .with_status(response.status));
                }
            }
        }
    }

    /// Direct `generateContent` call returning the answer text
    async fn direct_generate(&self, prompt: &str, config: GenerationConfig) -> AppResult<String> {
        let Some((_, key)) = self.ai_keys.current() else {
            return Err(AppError::config_missing("No Gemini API key configured"));
        };
        let request = self.gemini.generate_request(&key, prompt, config)?;
        let slot = self.rate_window.acquire().await?;
        debug!(url = %request.redacted_url(), model = self.gemini.model(), "Direct AI request");
        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(e) => {
                self.rate_window.release(slot).await;
                return Err(e);
            }
        };

        if !response.is_success() {
            return Err(gemini::map_api_error(response.status, &response.body));
        }
        gemini::extract_text(&response.body)
    }

    async fn proxy_post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let request = HttpRequest::post_json(self.proxy_endpoint(path)?, body)?;
        debug!(url = %request.redacted_url(), "Proxy AI request");
        let response = self.http.send(request).await?;
        if !response.is_success() {
            return Err(AppError::http_status(
                gemini::SERVICE_NAME,
                response.status,
                response.error_message(),
            ));
        }
        response.json(gemini::SERVICE_NAME)
    }

    // ========================================================================
    // Recipe provider operations
    // ========================================================================

    /// Search recipes that use the given ingredients, enriched with full detail
    ///
    /// Detail for every result is fetched concurrently. A result whose
    /// detail fetch fails is returned as its unenriched summary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty ingredient list, or the search call's error
    #[instrument(skip(self, options), fields(ingredients = ingredients.len()))]
    pub async fn search_recipes_by_ingredients(
        &self,
        ingredients: &[String],
        options: &IngredientSearchOptions,
    ) -> AppResult<Vec<RecipeRecord>> {
        let ingredients: Vec<String> = ingredients
            .iter()
            .map(|i| i.trim().to_owned())
            .filter(|i| !i.is_empty())
            .collect();
        if ingredients.is_empty() {
            return Err(AppError::invalid_input(messages::INGREDIENTS_REQUIRED));
        }

        let query = ProviderQuery::find_by_ingredients(&ingredients, options);
        let mut summaries: Vec<ProviderRecipe> = self.fetch_provider(&query).await?;
        summaries.truncate(options.number as usize);
        debug!(results = summaries.len(), "Ingredient search returned");

        Ok(join_all(summaries.into_iter().map(|summary| self.enrich(summary))).await)
    }

    async fn enrich(&self, summary: ProviderRecipe) -> RecipeRecord {
        let Some(id) = summary.id.as_ref().and_then(RecipeId::provider_id) else {
            return RecipeSource::Real(summary).normalize();
        };
        let query = ProviderQuery::recipe_information(id);
        match self.fetch_provider::<ProviderRecipe>(&query).await {
            Ok(detail) => RecipeSource::Real(enrich_summary(summary, detail)).normalize(),
            Err(e) => {
                let error = AppError::enrichment(id.to_string(), e.to_string());
                warn!(error = %error, "Detail enrichment failed, keeping summary");
                RecipeSource::Real(summary).normalize()
            }
        }
    }

    /// Full recipe detail with nutrition
    ///
    /// When the detail lacks structured instructions they are fetched
    /// separately; if that also fails the record is returned without them.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for the AI sentinel or any non-numeric id, or the
    /// detail call's error
    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn get_recipe_information(&self, id: &RecipeId) -> AppResult<RecipeRecord> {
        let detail: ProviderRecipe = self
            .fetch_provider(&ProviderQuery::recipe_information(provider_recipe_id(id)?))
            .await?;
        let mut record = RecipeSource::Real(detail).normalize();

        if !record.has_instructions() {
            match self.get_recipe_instructions(id).await {
                Ok(groups) => record.instructions = groups,
                Err(e) => warn!(error = %e, "No instructions available for recipe"),
            }
        }
        Ok(record)
    }

    /// Structured instructions for a recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-numeric id, or the provider call's error
    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn get_recipe_instructions(&self, id: &RecipeId) -> AppResult<Vec<InstructionGroup>> {
        let groups: Vec<ProviderInstructionGroup> = self
            .fetch_provider(&ProviderQuery::analyzed_instructions(provider_recipe_id(id)?))
            .await?;
        Ok(convert_instructions(groups))
    }

    /// Nutrition widget, absent when the provider cannot supply it
    ///
    /// # Errors
    ///
    /// Only systemic failures (no key, quota, rate limit) and non-numeric
    /// ids are returned
    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn get_recipe_nutrition_widget(
        &self,
        id: &RecipeId,
    ) -> AppResult<Option<NutritionWidget>> {
        let query = ProviderQuery::nutrition_widget(provider_recipe_id(id)?);
        match self.fetch_provider::<NutritionWidget>(&query)
            .await
        {
            Ok(widget) => Ok(Some(widget)),
            Err(e) if e.code.is_systemic() => Err(e),
            Err(e) => {
                warn!(error = %e, "Nutrition widget unavailable");
                Ok(None)
            }
        }
    }

    /// Free-text recipe search
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query, or the provider call's error
    #[instrument(skip(self, options))]
    pub async fn search_recipes(
        &self,
        query: &str,
        options: &RecipeSearchOptions,
    ) -> AppResult<Vec<RecipeRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        let response: ComplexSearchResponse = self
            .fetch_provider(&ProviderQuery::complex_search(query, options))
            .await?;
        Ok(normalize_all(response.results))
    }

    /// Random recipes, optionally filtered by tags
    ///
    /// # Errors
    ///
    /// Returns the provider call's error
    #[instrument(skip(self, options))]
    pub async fn get_random_recipes(
        &self,
        options: &RandomRecipeOptions,
    ) -> AppResult<Vec<RecipeRecord>> {
        let response: RandomRecipesResponse =
            self.fetch_provider(&ProviderQuery::random(options)).await?;
        Ok(normalize_all(response.recipes))
    }

    // ========================================================================
    // AI operations
    // ========================================================================

    /// Cooking tips for `recipe`; never fails
    ///
    /// Any failure (network, model error, unparseable answer) yields the
    /// static tip list tagged `mock-fallback`.
    #[instrument(skip(self, recipe, user_ingredients), fields(recipe_id = %recipe.id))]
    pub async fn get_ai_cooking_tips(
        &self,
        recipe: &RecipeRecord,
        user_ingredients: &[String],
    ) -> CookingTips {
        let prompt = tips_prompt(recipe, user_ingredients);
        let mut chain = StrategyChain::new("cooking_tips");
        if self.resolve_transport().await == TransportMode::ServerlessProxy {
            chain = chain.then("proxy", always, || async {
                let body = TipsProxyRequest {
                    prompt: prompt.clone(),
                };
                let result = self
                    .proxy_post::<CookingTips, _>(endpoints::PROXY_GEMINI, &body)
                    .await
                    .and_then(non_empty_tips);
                self.downgrade_on_failure(result)
            });
        }
        chain
            .then("direct", always, || async {
                let text = self.direct_generate(&prompt, GenerationConfig::tips()).await?;
                non_empty_tips(CookingTips::generated(parse_tips(&text)))
            })
            .then("static", never, || async {
                Ok(CookingTips::fallback(static_tips(recipe)))
            })
            .run()
            .await
            .unwrap_or_else(|_| CookingTips::fallback(static_tips(recipe)))
    }

    /// Synthesize a recipe with the generative model
    ///
    /// Used when a provider lookup failed. Through the proxy the answer is
    /// whatever the proxy's AI endpoint returns (possibly its placeholder).
    /// Direct mode without an AI key returns the local placeholder.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when the model's answer holds no usable JSON
    /// object, or a systemic error (rate limit) from direct dispatch
    #[instrument(skip(self))]
    pub async fn search_recipe_with_ai(
        &self,
        recipe_id: &str,
        name_hint: Option<&str>,
    ) -> AppResult<RecipeRecord> {
        let prompt = recipe_prompt(recipe_id, name_hint);
        let mut chain = StrategyChain::new("ai_recipe");
        if self.resolve_transport().await == TransportMode::ServerlessProxy {
            chain = chain.then("proxy", proxied_failure, || async {
                let body = RecipeProxyRequest {
                    prompt: prompt.clone(),
                    recipe_id: Some(recipe_id.to_owned()),
                    recipe_name: name_hint.map(str::to_owned),
                };
                let result = self
                    .proxy_post::<ProviderRecipe, _>(endpoints::PROXY_GEMINI_SEARCH, &body)
                    .await
                    .map(|recipe| RecipeSource::Relayed(recipe).normalize());
                self.downgrade_on_failure(result)
            });
        }
        chain
            .then("direct", never, || async {
                if self.ai_keys.is_empty() {
                    info!("No Gemini key, returning placeholder recipe");
                    return Ok(RecipeSource::MockFallback {
                        name_hint: name_hint.map(str::to_owned),
                    }
                    .normalize());
                }
                let text = self.direct_generate(&prompt, GenerationConfig::recipe()).await?;
                let document = parse_recipe_document(&text)?;
                Ok(RecipeSource::AiGenerated(document).normalize())
            })
            .run()
            .await
    }

    // ========================================================================
    // Key management
    // ========================================================================

    /// Validate and store the primary key for `service`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, or a storage error
    pub fn set_api_key(&self, service: ApiService, key: &str) -> AppResult<()> {
        Self::ensure_valid(service, key)?;
        self.store.set(service.primary_slot(), key.trim())?;
        self.reload_ring(service)?;
        info!(service = %service, "API key stored");
        Ok(())
    }

    /// Validate and store the recipe-provider backup key
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, or a storage error
    pub fn set_backup_api_key(&self, key: &str) -> AppResult<()> {
        Self::ensure_valid(ApiService::Spoonacular, key)?;
        self.store
            .set(crate::constants::storage_keys::SPOONACULAR_BACKUP, key.trim())?;
        self.reload_ring(ApiService::Spoonacular)?;
        info!("Backup Spoonacular key stored");
        Ok(())
    }

    /// Remove every stored key for `service`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be written
    pub fn remove_api_key(&self, service: ApiService) -> AppResult<()> {
        for slot in service.storage_slots() {
            self.store.remove(slot)?;
        }
        self.ring(service).replace(Vec::new());
        info!(service = %service, "API keys removed");
        Ok(())
    }

    /// Whether a primary key is stored for `service`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read
    pub fn has_api_key(&self, service: ApiService) -> AppResult<bool> {
        Ok(self.store.get_non_blank(service.primary_slot())?.is_some())
    }

    /// Check a key's format without storing it
    #[must_use]
    pub fn validate_api_key(&self, service: ApiService, key: &str) -> KeyValidation {
        validate_api_key(service, key)
    }

    /// Whether requests can be served with the current transport and keys
    #[must_use]
    pub fn check_setup(&self) -> SetupStatus {
        let has_ai_key = !self.ai_keys.is_empty();
        let proxy_usable = match self.transport.current() {
            Some(TransportMode::ServerlessProxy) => true,
            Some(TransportMode::Direct) => false,
            None => self.config.prefer_proxy,
        };

        if proxy_usable {
            return SetupStatus {
                ready: true,
                message: "Using serverless API - no keys needed".to_owned(),
                missing_keys: Vec::new(),
                has_ai_key,
            };
        }
        if self.recipe_keys.is_empty() {
            return SetupStatus {
                ready: false,
                message: "Spoonacular API key is required for local development".to_owned(),
                missing_keys: vec![ApiService::Spoonacular],
                has_ai_key,
            };
        }
        SetupStatus {
            ready: true,
            message: "API keys configured".to_owned(),
            missing_keys: Vec::new(),
            has_ai_key,
        }
    }

    fn ensure_valid(service: ApiService, key: &str) -> AppResult<()> {
        let validation = validate_api_key(service, key);
        if validation.valid {
            return Ok(());
        }
        Err(AppError::invalid_input(
            validation
                .error
                .unwrap_or_else(|| format!("Invalid {service} API key")),
        ))
    }

    const fn ring(&self, service: ApiService) -> &ApiKeyRing {
        match service {
            ApiService::Spoonacular => &self.recipe_keys,
            ApiService::Gemini => &self.ai_keys,
        }
    }

    fn reload_ring(&self, service: ApiService) -> AppResult<()> {
        let keys = load_keys(self.store.as_ref(), service)?;
        self.ring(service).replace(keys);
        Ok(())
    }
}

fn load_keys(store: &dyn KeyValueStore, service: ApiService) -> AppResult<Vec<String>> {
    let mut keys = Vec::new();
    for slot in service.storage_slots() {
        if let Some(key) = store.get_non_blank(slot)? {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Numeric id for provider paths; named ids never reach a URL
fn provider_recipe_id(id: &RecipeId) -> AppResult<u64> {
    if id.is_ai_generated() {
        return Err(AppError::invalid_input(
            "AI-generated recipes have no provider detail",
        ));
    }
    id.provider_id()
        .ok_or_else(|| AppError::invalid_input(format!("Recipe id '{id}' is not a provider id")))
}

fn provider_error(response: &HttpResponse) -> AppError {
    AppError::http_status(
        spoonacular::SERVICE_NAME,
        response.status,
        response.error_message(),
    )
}

fn non_empty_tips(tips: CookingTips) -> AppResult<CookingTips> {
    if tips.tips.is_empty() {
        return Err(AppError::parse("No tips found in AI response"));
    }
    Ok(tips)
}

fn normalize_all(recipes: Vec<ProviderRecipe>) -> Vec<RecipeRecord> {
    recipes
        .into_iter()
        .map(|r| RecipeSource::Real(r).normalize())
        .collect()
}
