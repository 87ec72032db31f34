// ABOUTME: Workout plan and free-form completion route handlers
// ABOUTME: POST /chat returns a validated WorkoutPlan, POST /generate the raw inference envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Completion routes
//!
//! Handlers are thin: they decode the body, hand it to
//! [`WorkoutPlanService`](crate::services::WorkoutPlanService), and let
//! [`AppError`] pick the status code.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::error;

use crate::{
    errors::AppError,
    llm::ChatResponse,
    plans::WorkoutPlan,
    resources::ServerResources,
    services::{TextGenerationRequest, WorkoutPlanRequest},
};

/// Turn a body extraction failure into a 400 with the standard error shape
fn body_error(rejection: &JsonRejection) -> AppError {
    AppError::invalid_input(rejection.body_text())
}

/// Workout plan routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create the completion routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/chat", post(Self::create_plan))
            .route("/generate", post(Self::generate))
            .with_state(resources)
    }

    /// Build a workout plan for the posted profile
    async fn create_plan(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<WorkoutPlanRequest>, JsonRejection>,
    ) -> Result<Json<WorkoutPlan>, AppError> {
        let Json(request) = body.map_err(|rejection| body_error(&rejection))?;

        let plan = resources
            .workout_service
            .generate_plan(&request)
            .await
            .inspect_err(|e| error!("Chat endpoint error: {}", e))?;

        Ok(Json(plan))
    }

    /// Forward a free-form prompt
    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<TextGenerationRequest>, JsonRejection>,
    ) -> Result<Json<ChatResponse>, AppError> {
        let Json(request) = body.map_err(|rejection| body_error(&rejection))?;

        let envelope = resources
            .workout_service
            .generate_text(&request)
            .await
            .inspect_err(|e| error!("Generate endpoint error: {}", e))?;

        Ok(Json(envelope))
    }
}
