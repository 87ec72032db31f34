// ABOUTME: LLM provider abstraction layer for the inference server integration
// ABOUTME: Defines chat messages, the normalized response envelope, and the provider contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! This module defines the contract the relay uses to talk to the inference
//! server. The only production implementation is [`OllamaProvider`], but the
//! workout pipeline depends on the [`LlmProvider`] trait so it can be driven by
//! any backend (or a test double).
//!
//! ## Key Concepts
//!
//! - **`ChatMessage`**: Role-based message structure for conversations
//! - **`ChatRequest`**: Model, sampling options, and an optional JSON schema constraint
//! - **`ChatResponse`**: The normalized envelope, decoupled from the wire format
//! - **`ModelInfo`**: One entry of the inference server's model catalog
//!
//! ## Example
//!
//! ```rust,no_run
//! use train_ai::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a strength coach."),
//!         ChatMessage::user("Plan three sessions on a rower."),
//!     ])
//!     .with_temperature(0.2);
//!     let envelope = provider.complete(&request).await;
//! }
//! ```

mod ollama;
pub mod schema;

pub use ollama::OllamaProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppResult;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier; the provider default is used when absent
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// JSON schema the output should follow
    pub response_schema: Option<Value>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
            response_schema: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Constrain the output to a JSON schema
    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Single-prompt completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Prompt text
    pub prompt: String,
    /// Model identifier; the provider default is used when absent
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// Normalized result of one inference call
///
/// Durations are nanoseconds as reported by the inference server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    #[serde(rename = "response")]
    pub text: String,
    /// Model that produced the text
    pub model: String,
    /// Creation timestamp as reported upstream
    pub created_at: String,
    /// Whether generation finished
    #[serde(rename = "done")]
    pub is_complete: bool,
    /// Total processing duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    /// Model load duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    /// Prompt token count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Prompt evaluation duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    /// Completion token count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    /// Completion duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

impl ChatResponse {
    /// Envelope with only the text fields set, as used by tests and fakes
    #[must_use]
    pub fn from_text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            created_at: String::new(),
            is_complete: true,
            total_duration: None,
            load_duration: None,
            prompt_eval_count: None,
            prompt_eval_duration: None,
            eval_count: None,
            eval_duration: None,
        }
    }
}

/// One model from the inference server catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name, including tag
    pub name: String,
    /// Last modification timestamp
    pub modified_at: String,
    /// Size on disk in bytes
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Content digest
    pub digest: String,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Inference backend contract
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "ollama")
    fn name(&self) -> &'static str;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a non-streaming chat completion
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;

    /// Perform a non-streaming single-prompt completion
    async fn generate(&self, request: &GenerateRequest) -> AppResult<ChatResponse>;

    /// List models installed on the inference server
    async fn list_models(&self) -> AppResult<Vec<ModelInfo>>;

    /// Liveness probe; failures are logged and reported as `false`
    async fn health_check(&self) -> bool;
}
