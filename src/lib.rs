// ABOUTME: Main library entry point for the Train AI workout relay
// ABOUTME: Turns a fitness profile into a validated workout plan via a prompt registry and Ollama
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Train AI
//!
//! A backend relay that accepts a fitness profile over HTTP, fills a prompt
//! template fetched from a prompt registry, sends the conversation to a local
//! Ollama server with a JSON schema constraint, and parses the reply into a
//! typed [`WorkoutPlan`](plans::WorkoutPlan).
//!
//! ## Architecture
//!
//! - **prompts**: Registry client, template memo, and placeholder substitution
//! - **llm**: Inference provider contract and the Ollama implementation
//! - **plans**: Strict decoding of model output into a workout plan
//! - **services**: The request pipeline, independent of HTTP
//! - **routes** / **server**: axum routes, middleware, and serving
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use train_ai::config::ServerConfig;
//! use train_ai::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Train AI relay configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Constants shared with the core crate
pub mod constants;

/// Unified error handling
pub mod errors;

/// Inference provider abstraction and Ollama client
pub mod llm;

/// Logging configuration and structured logging helpers
pub mod logging;

/// HTTP middleware (CORS, request IDs, tracing spans)
pub mod middleware;

/// Workout plan parsing
pub mod plans;

/// Prompt registry, template memo, and composition
pub mod prompts;

/// Shared resources handed to every route
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Request pipeline services
pub mod services;

pub use train_ai_core::models;
