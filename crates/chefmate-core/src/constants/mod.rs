// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider endpoints, storage keys, request defaults, and AI generation parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identifiers used for key management and logging
pub mod services {
    /// Recipe provider (Spoonacular)
    pub const SPOONACULAR: &str = "spoonacular";
    /// Generative text provider (Gemini)
    pub const GEMINI: &str = "gemini";
}

/// Persisted storage keys
pub mod storage_keys {
    /// Primary recipe-provider key
    pub const SPOONACULAR_PRIMARY: &str = "chefmate_spoonacular_key";
    /// Backup recipe-provider key, used after the primary exhausts its quota
    pub const SPOONACULAR_BACKUP: &str = "chefmate_spoonacular_key_2";
    /// Generative-text provider key
    pub const GEMINI: &str = "chefmate_gemini_key";
}

/// Upstream and proxy endpoints
pub mod endpoints {
    /// Default direct recipe-provider base URL
    pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
    /// Default direct generative-text base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default generative model
    pub const GEMINI_DEFAULT_MODEL: &str = "gemini-pro";
    /// Default proxy base URL
    pub const PROXY_BASE_URL: &str = "http://localhost:3000/api";

    /// Proxy passthrough for recipe-provider calls
    pub const PROXY_SPOONACULAR: &str = "/spoonacular";
    /// Proxy tips endpoint
    pub const PROXY_GEMINI: &str = "/gemini";
    /// Proxy recipe synthesis endpoint
    pub const PROXY_GEMINI_SEARCH: &str = "/gemini-search";
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";

    /// Ingredient search path
    pub const FIND_BY_INGREDIENTS: &str = "/recipes/findByIngredients";
    /// Free-text search path
    pub const COMPLEX_SEARCH: &str = "/recipes/complexSearch";
    /// Random recipes path
    pub const RANDOM_RECIPES: &str = "/recipes/random";

    /// Query parameter carrying the recipe-provider credential
    pub const SPOONACULAR_KEY_PARAM: &str = "apiKey";
    /// Query parameter carrying the generative-text credential
    pub const GEMINI_KEY_PARAM: &str = "key";
}

/// Request defaults and limits
pub mod limits {
    /// Default result count for ingredient and free-text searches
    pub const DEFAULT_SEARCH_RESULTS: u32 = 12;
    /// Default result count for random recipes
    pub const DEFAULT_RANDOM_RESULTS: u32 = 6;
    /// Direct-mode requests allowed per window
    pub const DEFAULT_MAX_REQUESTS_PER_MINUTE: usize = 150;
    /// Sliding rate window length in seconds
    pub const RATE_WINDOW_SECS: u64 = 60;
    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
    /// Default connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Recipe-provider key length (hex characters)
    pub const SPOONACULAR_KEY_LEN: usize = 32;
    /// Generative-text key length including the `AIzaSy` prefix
    pub const GEMINI_KEY_LEN: usize = 39;
}

/// Generative model sampling parameters
pub mod generation {
    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;
    /// Top-k sampling
    pub const TOP_K: u32 = 40;
    /// Nucleus sampling
    pub const TOP_P: f32 = 0.95;
    /// Output cap for cooking tips
    pub const TIPS_MAX_OUTPUT_TOKENS: u32 = 1024;
    /// Output cap for recipe synthesis
    pub const RECIPE_MAX_OUTPUT_TOKENS: u32 = 2048;
    /// Shortest line the plain-text tips parser keeps
    pub const MIN_TIP_CHARS: usize = 10;
    /// Tips returned by the static fallback
    pub const STATIC_TIPS_RETURNED: usize = 4;
}

/// Values used when normalizing AI and placeholder records
pub mod recipe_defaults {
    /// Sentinel id for every synthesized recipe
    pub const AI_GENERATED_ID: &str = "ai-generated";
    /// Title used when the model omits one
    pub const AI_TITLE: &str = "AI Generated Recipe";
    /// Summary used when the model omits a description
    pub const AI_SUMMARY: &str = "A delicious recipe generated by AI";
    /// Source label for synthesized recipes
    pub const AI_SOURCE_NAME: &str = "ChefMate AI";
    /// Placeholder image for synthesized recipes
    pub const AI_IMAGE: &str = "assets/images/ai-recipe-placeholder.jpg";
    /// Cook time when nothing numeric is found
    pub const DEFAULT_COOK_MINUTES: u32 = 30;
    /// Servings when the model omits them
    pub const DEFAULT_SERVINGS: u32 = 4;
    /// Name used by the placeholder recipe without a hint
    pub const MYSTERY_RECIPE: &str = "Mystery Recipe";
    /// Source marker the proxy attaches to placeholder recipes
    pub const FALLBACK_SOURCE: &str = "AI Generated (Fallback)";
}

/// Error messages shown verbatim to callers
pub mod messages {
    /// Synthesis failed with no recoverable JSON
    pub const AI_RECIPE_FAILED: &str =
        "Unable to generate recipe with AI. Please try searching manually.";
    /// Empty ingredient list
    pub const INGREDIENTS_REQUIRED: &str = "At least one ingredient is required";
    /// Empty key passed to validation
    pub const EMPTY_KEY: &str = "API key cannot be empty";
    /// Recipe-provider key format
    pub const INVALID_SPOONACULAR_KEY: &str =
        "Invalid Spoonacular API key format. Should be 32 character hex string.";
    /// Generative-text key format
    pub const INVALID_GEMINI_KEY: &str =
        "Invalid Gemini API key format. Should start with \"AIzaSy\" and be 39 characters long.";
}
