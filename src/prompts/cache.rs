// ABOUTME: Lazily populated, process-lifetime memo for the prompt template
// ABOUTME: Guarantees one registry fetch under concurrent first callers and retries after failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error};

use super::{PromptRegistry, PromptTemplate};
use crate::errors::AppResult;

/// Memoizing wrapper around a [`PromptRegistry`]
///
/// The first successful fetch is kept until the cache is dropped. A failed
/// fetch leaves the cell empty, so the next caller fetches again. Concurrent
/// first callers wait on one in-flight fetch.
pub struct PromptCache {
    registry: Arc<dyn PromptRegistry>,
    template: OnceCell<PromptTemplate>,
}

impl PromptCache {
    /// Create an empty cache in front of `registry`
    #[must_use]
    pub fn new(registry: Arc<dyn PromptRegistry>) -> Self {
        Self {
            registry,
            template: OnceCell::new(),
        }
    }

    /// Get the template, fetching it on first use
    ///
    /// # Errors
    ///
    /// Propagates the registry error (`UpstreamUnavailable`); the failure is not cached.
    pub async fn get_template(&self) -> AppResult<&PromptTemplate> {
        self.template
            .get_or_try_init(|| async {
                debug!("Prompt template not cached, fetching from registry");
                self.registry.fetch_template().await.inspect_err(|e| {
                    error!("Failed to fetch prompt template: {}", e);
                })
            })
            .await
    }

    /// Whether a template has been memoized
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.template.initialized()
    }
}
