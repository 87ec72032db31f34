// ABOUTME: Service information routes: welcome banner and public configuration
// ABOUTME: Exposes only non-sensitive settings; the registry API key never leaves the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::resources::ServerResources;

/// Path of the endpoint index
const DOCS_PATH: &str = "/docs";

/// Every route the relay serves, as `(method, path, summary)`
const ENDPOINTS: [(&str, &str, &str); 7] = [
    ("GET", "/", "Service banner"),
    ("GET", "/config", "Non-sensitive configuration"),
    ("GET", DOCS_PATH, "This endpoint index"),
    ("GET", "/health", "Inference server reachability"),
    ("GET", "/models", "Installed model catalog"),
    ("POST", "/chat", "Workout plan for a user profile"),
    ("POST", "/generate", "Free-form prompt completion"),
];

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Welcome message naming the service
    pub message: String,
    /// Service version
    pub version: String,
    /// Path of the endpoint index
    pub docs: String,
    /// Whether debug mode is on
    pub debug_mode: bool,
    /// Deployment environment
    pub environment: String,
}

/// Body of `GET /config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Debug flag
    pub debug: bool,
    /// Log level
    pub log_level: String,
    /// Inference server base URL
    pub ollama_base_url: String,
    /// Inference timeout in seconds
    pub ollama_timeout: u64,
    /// Default model
    pub default_model: String,
    /// Registry application identifier
    pub prompt_app: String,
    /// Registry environment identifier
    pub prompt_environment: String,
}

/// Service information routes handler
pub struct ServiceRoutes;

impl ServiceRoutes {
    /// Create the informational routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::root))
            .route("/config", get(Self::public_config))
            .route(DOCS_PATH, get(Self::docs))
            .with_state(resources)
    }

    async fn root(State(resources): State<Arc<ServerResources>>) -> Json<ServiceInfo> {
        let config = &resources.config;
        Json(ServiceInfo {
            message: format!("Welcome to {}!", config.project_name),
            version: config.version.clone(),
            docs: DOCS_PATH.to_owned(),
            debug_mode: config.debug,
            environment: config.environment.to_string(),
        })
    }

    async fn docs() -> Json<Value> {
        let endpoints: Vec<Value> = ENDPOINTS
            .iter()
            .map(|(method, path, summary)| {
                json!({"method": method, "path": path, "summary": summary})
            })
            .collect();
        Json(json!({ "endpoints": endpoints }))
    }

    async fn public_config(State(resources): State<Arc<ServerResources>>) -> Json<PublicConfig> {
        let config = &resources.config;
        Json(PublicConfig {
            host: config.host.clone(),
            port: config.http_port,
            debug: config.debug,
            log_level: config.log_level.to_string(),
            ollama_base_url: config.ollama.base_url.clone(),
            ollama_timeout: config.ollama.timeout_secs,
            default_model: config.ollama.default_model.clone(),
            prompt_app: config.registry.app_slug.clone(),
            prompt_environment: config.registry.environment_slug.clone(),
        })
    }
}
