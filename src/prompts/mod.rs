// ABOUTME: Prompt template sourcing and composition for workout plan requests
// ABOUTME: Registry client, memoizing cache, and placeholder substitution over user profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The workout conversation is built from a two-message template kept in an
//! external prompt registry:
//!
//! - [`AgentaRegistry`] fetches the template over HTTP
//! - [`PromptCache`] memoizes the first successful fetch for the life of the service
//! - [`compose`] fills the user message with [`UserProfile`](train_ai_core::models::UserProfile) fields

mod cache;
mod compositor;
mod registry;

pub use cache::PromptCache;
pub use compositor::{compose, Placeholder};
pub use registry::AgentaRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// System and user message templates
///
/// Either side may be absent in the registry payload. Composition requires the
/// user message; the system message is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// System message content, passed through unchanged
    pub system: Option<String>,
    /// User message content containing `{{placeholder}}` tokens
    pub user: Option<String>,
}

impl PromptTemplate {
    /// Template with both messages present
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            user: Some(user.into()),
        }
    }
}

/// Source of prompt templates
#[async_trait]
pub trait PromptRegistry: Send + Sync {
    /// Fetch the current template
    ///
    /// # Errors
    ///
    /// Returns `UpstreamUnavailable` if the registry is unreachable or the
    /// payload carries neither a system nor a user message.
    async fn fetch_template(&self) -> AppResult<PromptTemplate>;
}
