// ABOUTME: Core types and constants for the Train AI workout relay
// ABOUTME: Foundation crate with error handling, workout domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Train AI Core
//!
//! Foundation crate providing shared types for the workout relay. It changes
//! rarely, so the server crate can rebuild incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: User profiles and the validated workout plan structure
//! - **constants**: Service names, request limits, and upstream paths

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Workout domain models (profile, plan, exercises)
pub mod models;

/// Application constants shared between crates
pub mod constants;
