// ABOUTME: HTTP client for the Agenta prompt registry
// ABOUTME: Fetches the deployed workout prompt config and extracts system and user messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::{PromptRegistry, PromptTemplate};
use crate::config::RegistryConfig;
use crate::constants::{registry_paths, service_names};
use crate::errors::{AppError, AppResult};

/// Body of the config fetch call
#[derive(Debug, Serialize)]
struct ConfigFetchRequest<'a> {
    application_ref: SlugRef<'a>,
    environment_ref: SlugRef<'a>,
}

#[derive(Debug, Serialize)]
struct SlugRef<'a> {
    slug: &'a str,
}

/// Prompt message as stored in the registry
#[derive(Debug, Deserialize)]
struct RegistryMessage {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

/// Client for an Agenta deployment
pub struct AgentaRegistry {
    client: Client,
    config: RegistryConfig,
}

impl AgentaRegistry {
    /// Create a registry client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: RegistryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            registry_paths::CONFIG_FETCH
        )
    }

    /// Pull the first system and first user message out of a config payload
    ///
    /// The prompt may sit at the top level or under `params`.
    fn extract_template(payload: &Value) -> AppResult<PromptTemplate> {
        let config = payload.get("params").unwrap_or(payload);
        let messages = config
            .pointer("/prompt/messages")
            .cloned()
            .map(serde_json::from_value::<Vec<RegistryMessage>>)
            .transpose()
            .map_err(|e| {
                AppError::upstream_unavailable(format!("Prompt messages are malformed: {e}"))
            })?
            .unwrap_or_default();

        let first_with_role = |role: &str| {
            messages
                .iter()
                .find(|msg| msg.role == role)
                .map(|msg| msg.content.clone())
        };

        let template = PromptTemplate {
            system: first_with_role("system"),
            user: first_with_role("user"),
        };

        if template.system.is_none() && template.user.is_none() {
            return Err(AppError::upstream_unavailable(
                "Prompt registry returned no system or user message",
            ));
        }

        Ok(template)
    }
}

#[async_trait]
impl PromptRegistry for AgentaRegistry {
    #[instrument(skip(self), fields(app = %self.config.app_slug, environment = %self.config.environment_slug))]
    async fn fetch_template(&self) -> AppResult<PromptTemplate> {
        info!(service = service_names::PROMPT_REGISTRY, "Fetching prompt from registry");

        let body = ConfigFetchRequest {
            application_ref: SlugRef {
                slug: &self.config.app_slug,
            },
            environment_ref: SlugRef {
                slug: &self.config.environment_slug,
            },
        };

        let mut request = self.client.post(self.api_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, format!("ApiKey {key}"));
        }

        let response = request.send().await.map_err(|e| {
            error!("Failed to reach prompt registry: {}", e);
            AppError::upstream_unavailable(format!("Failed to reach prompt registry: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("Prompt registry returned {}: {}", status, text);
            return Err(AppError::upstream_unavailable(format!(
                "Prompt registry returned {status}"
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Failed to decode prompt registry response: {}", e);
            AppError::upstream_unavailable(format!("Invalid prompt registry response: {e}"))
        })?;

        let template = Self::extract_template(&payload)?;
        info!("Successfully fetched prompt from registry");
        debug!(
            "Template has system={}, user={}",
            template.system.is_some(),
            template.user.is_some()
        );

        Ok(template)
    }
}
