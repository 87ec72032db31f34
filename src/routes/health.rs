// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports whether the inference server answers its catalog endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `GET /health` is healthy only when the inference server is reachable, so
//! load balancers stop routing to a relay whose backend is down.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .with_state(resources)
    }

    async fn health_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<Value>) {
        let service = resources.provider.name();

        if resources.provider.health_check().await {
            (
                StatusCode::OK,
                Json(json!({
                    "status": "healthy",
                    "service": service,
                    "message": "Ollama service is accessible",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": service,
                    "message": "Ollama service is not accessible",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }
    }
}
