// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server, inference, and registry configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the workout relay.
//!
//! All settings come from environment variables, read once at process start.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, Environment, LogLevel, OllamaConfig, RegistryConfig, ServerConfig,
};
