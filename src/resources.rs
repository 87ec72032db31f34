// ABOUTME: Centralized resource container for dependency injection in the HTTP server
// ABOUTME: Owns the configuration, the inference provider, and the workout plan service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared with every route as `Arc<ServerResources>`.
//! The prompt template memo lives inside the workout service, so it is dropped
//! together with these resources.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::llm::{LlmProvider, OllamaProvider};
use crate::prompts::{AgentaRegistry, PromptRegistry};
use crate::services::WorkoutPlanService;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Configuration read at startup
    pub config: Arc<ServerConfig>,
    /// Inference provider used for completions, the catalog, and health
    pub provider: Arc<dyn LlmProvider>,
    /// Workout plan pipeline
    pub workout_service: Arc<WorkoutPlanService>,
}

impl ServerResources {
    /// Build production resources: an Ollama provider and an Agenta registry
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created.
    pub fn new(config: ServerConfig) -> AppResult<Self> {
        let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::new(config.ollama.clone())?);
        let registry: Arc<dyn PromptRegistry> =
            Arc::new(AgentaRegistry::new(config.registry.clone())?);
        Ok(Self::with_components(config, provider, registry))
    }

    /// Assemble resources from explicit components
    #[must_use]
    pub fn with_components(
        config: ServerConfig,
        provider: Arc<dyn LlmProvider>,
        registry: Arc<dyn PromptRegistry>,
    ) -> Self {
        let workout_service = Arc::new(WorkoutPlanService::new(Arc::clone(&provider), registry));
        Self {
            config: Arc::new(config),
            provider,
            workout_service,
        }
    }
}
