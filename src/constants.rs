// ABOUTME: System-wide constants for the relay, re-exported from the core crate
// ABOUTME: Service names, request limits, and upstream endpoint paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Shared with `train-ai-core` so the bounds used for validation and the paths
//! used by the upstream clients have a single definition.

pub use train_ai_core::constants::{limits, ollama_paths, registry_paths, service_names};
