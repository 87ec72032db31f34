// ABOUTME: Route module organization for the relay's HTTP endpoints
// ABOUTME: Provides route definitions grouped by concern, each a thin layer over services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the workout relay
//!
//! Each module contains only route definitions and thin handler functions
//! that delegate to the service layer or the inference provider.

/// Health check route
pub mod health;
/// Model catalog route
pub mod models;
/// Service banner, endpoint index, and public configuration
pub mod service;
/// Workout plan and free-form completion routes
pub mod workout;

pub use health::HealthRoutes;
pub use models::{ModelRoutes, ModelsResponse};
pub use service::{PublicConfig, ServiceInfo, ServiceRoutes};
pub use workout::WorkoutRoutes;
