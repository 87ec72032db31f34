// ABOUTME: Ollama-native LLM provider for the locally hosted inference server
// ABOUTME: Chat, generate, and model catalog calls with schema-constrained output support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Provider
//!
//! Talks to Ollama's native API (`/api/chat`, `/api/generate`, `/api/tags`)
//! rather than the `OpenAI`-compatible surface, because only the native chat
//! endpoint accepts a JSON schema in its `format` field.
//!
//! Every call is a single non-streaming request bounded by the configured
//! timeout. Non-success statuses and transport failures surface as
//! `UpstreamError`; nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, GenerateRequest, LlmProvider, ModelInfo};
use crate::config::OllamaConfig;
use crate::constants::{ollama_paths, service_names};
use crate::errors::{AppError, AppResult};

/// Label used in upstream error messages
const SERVICE_LABEL: &str = "Ollama";

/// Connection establishment timeout
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum characters of an upstream error body kept in messages
const ERROR_BODY_PREVIEW: usize = 200;

// ============================================================================
// API Request/Response Types (Ollama native format)
// ============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a Value>,
}

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

/// Message in Ollama format
#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OllamaMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

/// Sampling options; `num_predict` is Ollama's output token budget
#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl OllamaOptions {
    /// Only produce an options object when at least one knob is set
    const fn from_parts(temperature: Option<f32>, num_predict: Option<u32>) -> Option<Self> {
        if temperature.is_none() && num_predict.is_none() {
            None
        } else {
            Some(Self {
                temperature,
                num_predict,
            })
        }
    }
}

/// Fields shared by chat and generate replies; all optional on the wire
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaCompletionStats {
    model: Option<String>,
    created_at: Option<String>,
    done: Option<bool>,
    total_duration: Option<u64>,
    load_duration: Option<u64>,
    prompt_eval_count: Option<u64>,
    prompt_eval_duration: Option<u64>,
    eval_count: Option<u64>,
    eval_duration: Option<u64>,
}

impl OllamaCompletionStats {
    fn into_envelope(self, text: String, requested_model: &str) -> ChatResponse {
        ChatResponse {
            text,
            model: self.model.unwrap_or_else(|| requested_model.to_owned()),
            created_at: self.created_at.unwrap_or_default(),
            is_complete: self.done.unwrap_or(true),
            total_duration: self.total_duration,
            load_duration: self.load_duration,
            prompt_eval_count: self.prompt_eval_count,
            prompt_eval_duration: self.prompt_eval_duration,
            eval_count: self.eval_count,
            eval_duration: self.eval_duration,
        }
    }
}

/// Reply of `POST /api/chat`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaChatResponse {
    message: Option<OllamaResponseMessage>,
    #[serde(flatten)]
    stats: OllamaCompletionStats,
}

/// Message in a chat reply
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaResponseMessage {
    content: String,
}

/// Reply of `POST /api/generate`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaGenerateResponse {
    response: String,
    #[serde(flatten)]
    stats: OllamaCompletionStats,
}

/// Reply of `GET /api/tags`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaTagsResponse {
    models: Vec<OllamaModelEntry>,
}

/// Catalog entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OllamaModelEntry {
    name: String,
    modified_at: String,
    size: u64,
    digest: String,
}

impl From<OllamaModelEntry> for ModelInfo {
    fn from(entry: OllamaModelEntry) -> Self {
        Self {
            name: entry.name,
            modified_at: entry.modified_at,
            size_bytes: entry.size,
            digest: entry.digest,
        }
    }
}

/// Error body Ollama sends with non-success statuses
#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Provider for a local Ollama server
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OllamaConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout()))
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        debug!(
            "Initialized Ollama provider: base_url={}, model={}, timeout={}s",
            config.base_url, config.default_model, config.timeout_secs
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Map a transport-level failure into an upstream error
    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to reach Ollama at {}: {}", self.config.base_url, e);
        if e.is_timeout() {
            AppError::upstream(
                SERVICE_LABEL,
                format!("Request timed out after {}s", self.config.timeout_secs),
            )
        } else if e.is_connect() {
            AppError::upstream(
                SERVICE_LABEL,
                format!(
                    "Cannot connect to Ollama. Is the server running at {}?",
                    self.config.base_url
                ),
            )
        } else {
            AppError::upstream(SERVICE_LABEL, format!("Failed to connect: {e}"))
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OllamaErrorResponse>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
            |parsed| parsed.error,
        );

        match status {
            StatusCode::NOT_FOUND => AppError::upstream(
                SERVICE_LABEL,
                format!("Model or endpoint not found ({status}): {detail}"),
            ),
            StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => AppError::upstream(
                SERVICE_LABEL,
                format!("Server is not responding ({status}): {detail}"),
            ),
            _ => AppError::upstream(SERVICE_LABEL, format!("API error ({status}): {detail}")),
        }
    }

    /// Read the body and decode it, mapping every failure to `UpstreamError`
    async fn read_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            warn!("Ollama returned {} with {} byte body", status, body.len());
            return Err(Self::parse_error_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse Ollama response: {} - body: {}",
                e,
                body.chars().take(ERROR_BODY_PREVIEW).collect::<String>()
            );
            AppError::upstream(SERVICE_LABEL, format!("Failed to parse response: {e}"))
        })
    }

    /// POST a JSON body to an endpoint and decode the reply
    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.api_url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        self.read_json(response).await
    }

    /// GET an endpoint and decode the reply
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let response = self
            .client
            .get(self.api_url(endpoint))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        self.read_json(response).await
    }

    /// Log message details for debugging LLM interactions
    fn log_messages_debug(messages: &[ChatMessage], has_schema: bool) {
        for (i, msg) in messages.iter().enumerate() {
            debug!(
                "Message[{i}] role={}, content_len={}",
                msg.role.as_str(),
                msg.content.len()
            );
        }
        debug!(
            "Sending chat request to Ollama with {} messages, schema={has_schema}",
            messages.len()
        );
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        service_names::OLLAMA
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        Self::log_messages_debug(&request.messages, request.response_schema.is_some());

        let body = OllamaChatRequest {
            model,
            messages: request.messages.iter().map(OllamaMessage::from).collect(),
            stream: false,
            options: OllamaOptions::from_parts(request.temperature, request.max_tokens),
            format: request.response_schema.as_ref(),
        };

        let reply: OllamaChatResponse = self.post_json(ollama_paths::CHAT, &body).await?;
        let text = reply.message.map(|m| m.content).unwrap_or_default();

        debug!("Received chat response from Ollama: {} chars", text.len());

        Ok(reply.stats.into_envelope(text, model))
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn generate(&self, request: &GenerateRequest) -> AppResult<ChatResponse> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let body = OllamaGenerateRequest {
            model,
            prompt: &request.prompt,
            stream: false,
            options: OllamaOptions::from_parts(request.temperature, request.max_tokens),
        };

        let reply: OllamaGenerateResponse = self.post_json(ollama_paths::GENERATE, &body).await?;

        debug!(
            "Received generate response from Ollama: {} chars",
            reply.response.len()
        );

        Ok(reply.stats.into_envelope(reply.response, model))
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> AppResult<Vec<ModelInfo>> {
        let reply: OllamaTagsResponse = self.get_json(ollama_paths::TAGS).await?;
        debug!("Ollama catalog lists {} models", reply.models.len());
        Ok(reply.models.into_iter().map(ModelInfo::from).collect())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> bool {
        match self.get_json::<Value>(ollama_paths::TAGS).await {
            Ok(_) => {
                debug!("Ollama health check passed");
                true
            }
            Err(e) => {
                error!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}
