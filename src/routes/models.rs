// ABOUTME: Model catalog route handler
// ABOUTME: GET /models lists models installed on the inference server, never cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{errors::AppError, llm::ModelInfo, resources::ServerResources};

/// Catalog response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Installed models in catalog order
    pub models: Vec<ModelInfo>,
}

/// Model catalog routes handler
pub struct ModelRoutes;

impl ModelRoutes {
    /// Create the catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/models", get(Self::list_models))
            .with_state(resources)
    }

    async fn list_models(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<ModelsResponse>, AppError> {
        let models = resources
            .provider
            .list_models()
            .await
            .inspect_err(|e| error!("List models endpoint error: {}", e))?;

        Ok(Json(ModelsResponse { models }))
    }
}
