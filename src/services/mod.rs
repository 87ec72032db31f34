// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Holds the workout plan pipeline and shared request option validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin; the pipeline and its validation rules live here so
//! they can be exercised without an HTTP server.

/// Model and sampling options with range validation
pub mod sampling;

/// Workout plan pipeline and free-form completion
pub mod workout;

pub use sampling::SamplingOptions;
pub use workout::{TextGenerationRequest, WorkoutPlanRequest, WorkoutPlanService};
