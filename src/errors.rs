// ABOUTME: Error handling re-exports from the core crate
// ABOUTME: Keeps `crate::errors::AppError` paths stable for server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling, re-exported from `train_ai_core::errors`.

pub use train_ai_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
