// ABOUTME: Application constants organized by domain
// ABOUTME: Generation limits, service names, and upstream endpoint paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identifiers used in logs and responses
pub mod service_names {
    /// Name of the relay server
    pub const TRAIN_AI_SERVER: &str = "train-ai-server";
    /// Inference server label used in error messages and health responses
    pub const OLLAMA: &str = "ollama";
    /// Prompt registry label
    pub const PROMPT_REGISTRY: &str = "agenta";
}

/// Bounds accepted for generation parameters
pub mod limits {
    /// Lowest accepted sampling temperature
    pub const MIN_TEMPERATURE: f32 = 0.0;
    /// Highest accepted sampling temperature
    pub const MAX_TEMPERATURE: f32 = 2.0;
    /// Smallest accepted output token budget
    pub const MIN_OUTPUT_TOKENS: u32 = 1;
    /// Largest accepted output token budget
    pub const MAX_OUTPUT_TOKENS: u32 = 4000;
}

/// Inference server endpoint paths (relative to the configured base URL)
pub mod ollama_paths {
    /// Chat completion
    pub const CHAT: &str = "api/chat";
    /// Single-prompt completion
    pub const GENERATE: &str = "api/generate";
    /// Local model catalog
    pub const TAGS: &str = "api/tags";
}

/// Prompt registry endpoint paths
pub mod registry_paths {
    /// Deployed configuration lookup by application and environment
    pub const CONFIG_FETCH: &str = "api/variants/configs/fetch";
}
