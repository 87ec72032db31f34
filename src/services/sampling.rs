// ABOUTME: Caller-supplied generation options shared by plan and free-form completions
// ABOUTME: Validates temperature and output token ranges before anything goes upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// Optional model and sampling knobs accepted on every completion endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Model override; the configured default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature in `[0, 2]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token budget in `[1, 4000]`
    #[serde(default, alias = "max_tokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Accepted for compatibility; responses are never streamed
    #[serde(default)]
    pub stream: bool,
}

impl SamplingOptions {
    /// Reject out-of-range values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the offending field.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(temperature) = self.temperature {
            if !(limits::MIN_TEMPERATURE..=limits::MAX_TEMPERATURE).contains(&temperature) {
                return Err(AppError::invalid_input(format!(
                    "temperature must be between {} and {}, got {temperature}",
                    limits::MIN_TEMPERATURE,
                    limits::MAX_TEMPERATURE
                )));
            }
        }

        if let Some(max_tokens) = self.max_output_tokens {
            if !(limits::MIN_OUTPUT_TOKENS..=limits::MAX_OUTPUT_TOKENS).contains(&max_tokens) {
                return Err(AppError::invalid_input(format!(
                    "max_output_tokens must be between {} and {}, got {max_tokens}",
                    limits::MIN_OUTPUT_TOKENS,
                    limits::MAX_OUTPUT_TOKENS
                )));
            }
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(AppError::invalid_input("model must not be empty"));
            }
        }

        Ok(())
    }
}
