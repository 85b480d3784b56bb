// ABOUTME: Unified error type and error codes for the ChefMate orchestration layer
// ABOUTME: Maps configuration, quota, rate-limit, transport, and parse failures to machine-checkable codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure the orchestrator surfaces is an [`AppError`]: a human-readable
//! message plus an [`ErrorCode`] callers can branch on without string matching.
//! Transient per-item failures are absorbed before they reach this type; what
//! propagates is systemic (no keys, quota exhausted, rate limited) or a
//! transport failure that survived the proxy-to-direct retry.

#[cfg(feature = "http-response")]
mod response;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field is missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    /// Upstream resource was not found
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Rate Limiting (2000-2999)
    /// Local requests-per-minute cap reached
    #[serde(rename = "RATE_LIMIT_EXCEEDED")]
    RateLimitExceeded = 2000,
    /// Every key in the ring hit its provider quota
    #[serde(rename = "QUOTA_EXCEEDED")]
    QuotaExceeded = 2001,

    // External Services (5000-5999)
    /// Upstream answered with a non-success status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Upstream could not be reached at all
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// Upstream rejected the credential
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    /// A required credential or setting is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// A setting is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // AI content (7000-7999)
    /// Model output was missing or not structured as expected
    #[serde(rename = "PARSE_ERROR")]
    ParseError = 7000,
    /// Detail enrichment for a single search result failed
    #[serde(rename = "ENRICHMENT_FAILED")]
    EnrichmentFailed = 7001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Key-value persistence failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => 400,
            Self::ResourceNotFound => 404,
            Self::RateLimitExceeded => 429,
            Self::QuotaExceeded => 402,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable | Self::ParseError => 502,
            Self::ExternalAuthFailed => 503,
            Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::EnrichmentFailed
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::RateLimitExceeded => "Rate limit exceeded",
            Self::QuotaExceeded => "API quota exhausted for all configured keys",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::ParseError => "Unable to parse AI response",
            Self::EnrichmentFailed => "Recipe detail enrichment failed",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Stable snake-case code for machine consumers
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => "invalid_input",
            Self::ResourceNotFound => "not_found",
            Self::RateLimitExceeded => "rate_limit",
            Self::QuotaExceeded => "quota_exceeded",
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => "transport",
            Self::ExternalAuthFailed => "auth_error",
            Self::ConfigMissing | Self::ConfigInvalid => "configuration",
            Self::ParseError => "parse",
            Self::EnrichmentFailed => "enrichment",
            Self::InternalError | Self::StorageError | Self::SerializationError => "internal",
        }
    }

    /// Systemic failures propagate to the caller and are never absorbed
    #[must_use]
    pub const fn is_systemic(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing | Self::ConfigInvalid | Self::QuotaExceeded | Self::RateLimitExceeded
        )
    }

    /// Network or upstream HTTP failure
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalAuthFailed
                | Self::ResourceNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Upstream HTTP status when the failure came from a response
    pub upstream_status: Option<u16>,
    /// Resource identifier (recipe id, service name) if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Record the upstream HTTP status
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.context.upstream_status = Some(status);
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Upstream HTTP status, if the error came from a response
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.context.upstream_status
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.http_status()
    }

    /// Message suitable for showing an end user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self.code {
            ErrorCode::RateLimitExceeded => "Too many requests. Please wait a moment and try again.",
            ErrorCode::QuotaExceeded => {
                "Daily recipe quota reached for all configured API keys. Please try again tomorrow."
            }
            ErrorCode::ConfigMissing | ErrorCode::ConfigInvalid | ErrorCode::ExternalAuthFailed => {
                "API configuration error. Please check your settings."
            }
            ErrorCode::ExternalServiceUnavailable => {
                "Network error. Please check your connection and try again."
            }
            ErrorCode::ParseError => "Unable to generate recipe with AI. Please try searching manually.",
            _ => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error body
    pub error: ErrorResponseDetails,
}

/// Error body details
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Extra details
    #[serde(skip_serializing_if = "serde_json::Value::is_null", default)]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Required configuration missing (no usable credential, proxy unreachable)
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration present but invalid
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// All keys in a service's ring are exhausted
    #[must_use]
    pub fn quota_exceeded(service: impl Into<String>) -> Self {
        let service = service.into();
        Self::new(
            ErrorCode::QuotaExceeded,
            format!("All {service} API keys have reached their quota"),
        )
        .with_resource_id(service)
    }

    /// Local rate window is full
    #[must_use]
    pub fn rate_limited(limit: usize, window_secs: u64) -> Self {
        Self::new(
            ErrorCode::RateLimitExceeded,
            "Rate limit exceeded. Please wait a moment before making another request.",
        )
        .with_details(serde_json::json!({
            "limit": limit,
            "window_secs": window_secs,
        }))
    }

    /// Network-level failure talking to an upstream
    #[must_use]
    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Upstream answered with a non-success status
    #[must_use]
    pub fn http_status(service: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            404 => ErrorCode::ResourceNotFound,
            401 | 403 => ErrorCode::ExternalAuthFailed,
            _ => ErrorCode::ExternalServiceError,
        };
        Self::new(
            code,
            format!("{} (HTTP {status}): {}", service.into(), message.into()),
        )
        .with_status(status)
    }

    /// Model output could not be turned into structured data
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Detail enrichment failed for one search result
    #[must_use]
    pub fn enrichment(recipe_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EnrichmentFailed, message).with_resource_id(recipe_id)
    }

    /// Key-value persistence failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::RateLimitExceeded.http_status(), 429);
        assert_eq!(ErrorCode::QuotaExceeded.http_status(), 402);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ConfigMissing.http_status(), 500);
    }

    #[test]
    fn test_http_status_constructor_classifies() {
        assert_eq!(
            AppError::http_status("Spoonacular", 404, "gone").code,
            ErrorCode::ResourceNotFound
        );
        assert_eq!(
            AppError::http_status("Spoonacular", 401, "bad key").code,
            ErrorCode::ExternalAuthFailed
        );
        let err = AppError::http_status("Spoonacular", 500, "boom");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_code_follows_error_code() {
        assert_eq!(AppError::rate_limited(3, 60).status_code(), 429);
        assert_eq!(
            AppError::http_status("Spoonacular", 404, "gone").status_code(),
            404
        );
        assert_eq!(AppError::invalid_input("blank").status_code(), 400);
    }

    #[test]
    fn test_systemic_codes() {
        assert!(ErrorCode::QuotaExceeded.is_systemic());
        assert!(ErrorCode::RateLimitExceeded.is_systemic());
        assert!(ErrorCode::ConfigMissing.is_systemic());
        assert!(!ErrorCode::ExternalServiceError.is_systemic());
        assert!(!ErrorCode::ParseError.is_systemic());
    }

    #[test]
    fn test_error_response_serialization() {
        let response: ErrorResponse = AppError::rate_limited(3, 60).into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(json["error"]["details"]["limit"], 3);
    }

    #[test]
    fn test_display_includes_description() {
        let err = AppError::quota_exceeded("spoonacular");
        let text = err.to_string();
        assert!(text.starts_with("API quota exhausted"));
        assert!(text.contains("spoonacular"));
    }
}
