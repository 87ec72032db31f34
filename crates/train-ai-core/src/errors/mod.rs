// ABOUTME: Unified error type and error codes for the workout relay pipeline
// ABOUTME: Maps each pipeline failure class to a distinct HTTP status and JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure in the relay is an [`AppError`] tagged with an [`ErrorCode`].
//! The pipeline taxonomy is:
//!
//! - `UpstreamUnavailable`: the prompt registry is unreachable or returned an unusable payload
//! - `UpstreamError`: the inference server answered with a non-success status or the call failed
//! - `TemplateError`: the prompt template lacks the user message
//! - `MalformedPlan`: the model output is not a valid workout plan
//!
//! Request validation and startup failures use `InvalidInput`, `ConfigError`
//! and `InternalError`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Request body failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Prompt registry unreachable or returned no usable messages
    #[serde(rename = "UPSTREAM_UNAVAILABLE")]
    UpstreamUnavailable,
    /// Inference server returned non-success or the transport failed
    #[serde(rename = "UPSTREAM_ERROR")]
    UpstreamError,
    /// Prompt template is missing a required role
    #[serde(rename = "TEMPLATE_ERROR")]
    TemplateError,
    /// Model output is not a valid workout plan
    #[serde(rename = "MALFORMED_PLAN")]
    MalformedPlan,
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Anything else
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::UpstreamError | Self::MalformedPlan => 502,
            Self::UpstreamUnavailable => 503,
            Self::TemplateError | Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::UpstreamUnavailable => "The prompt registry is unavailable",
            Self::UpstreamError => "The inference server request failed",
            Self::TemplateError => "The prompt template is incomplete",
            Self::MalformedPlan => "The model returned a malformed workout plan",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Stable machine-readable name, matching the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::TemplateError => "TEMPLATE_ERROR",
            Self::MalformedPlan => "MALFORMED_PLAN",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
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
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid request input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Prompt registry unreachable or unusable
    #[must_use]
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Inference server failure, prefixed with the service name
    #[must_use]
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UpstreamError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Template missing a required message
    #[must_use]
    pub fn template(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TemplateError, message)
    }

    /// Model output failed plan validation
    #[must_use]
    pub fn malformed_plan(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedPlan, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short description of the failure class
    pub error: String,
    /// Detailed message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.code.description().to_owned(),
            detail: Some(error.message.clone()),
            code: error.code,
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
