// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides test logging, sample profiles and plans, and configuration pointed at mocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `train_ai`

use std::sync::{Arc, Once};

use serde_json::{json, Value};
use train_ai::{
    config::{OllamaConfig, RegistryConfig, ServerConfig},
    models::UserProfile,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; default to WARN for quiet tests
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Profile used across tests
pub fn sample_profile() -> UserProfile {
    UserProfile {
        age: 30,
        height_cm: 178,
        weight_kg: 75,
        physical_condition: "intermediate".to_owned(),
        sessions_per_week: 3,
        workout_minutes: 45,
        available_machines: vec!["bench".to_owned(), "rower".to_owned()],
    }
}

/// `POST /chat` body for `profile` with optional extra fields merged in
pub fn plan_request_body(profile: &UserProfile, extra: Value) -> Value {
    let mut body = serde_json::to_value(profile).unwrap();
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }
    body
}

/// Valid plan JSON for `profile`, as a model would emit it
pub fn sample_plan_json(profile: &UserProfile) -> String {
    json!({
        "user_profile": profile,
        "weekly_routine": [
            {
                "day": "Monday",
                "exercises": [
                    {
                        "machine": "bench",
                        "exercise_name": "Bench press",
                        "sets": 4,
                        "reps": 8,
                        "duration_minutes": 20,
                        "intensity": "High"
                    },
                    {
                        "machine": "rower",
                        "exercise_name": "Intervals",
                        "sets": 5,
                        "reps": 1,
                        "duration_minutes": 15,
                        "intensity": "Medium"
                    }
                ]
            },
            {
                "day": "Thursday",
                "exercises": [
                    {
                        "machine": "rower",
                        "exercise_name": "Steady row",
                        "sets": 1,
                        "reps": 1,
                        "duration_minutes": 40,
                        "intensity": "Low"
                    }
                ]
            }
        ]
    })
    .to_string()
}

/// Configuration with both upstreams pointed at `base_url`
pub fn test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        ollama: OllamaConfig {
            base_url: base_url.to_owned(),
            timeout_secs: 5,
            default_model: "llama3.2".to_owned(),
        },
        registry: RegistryConfig {
            base_url: base_url.to_owned(),
            api_key: Some("test-registry-key".to_owned()),
            timeout_secs: 5,
            ..RegistryConfig::default()
        },
        ..ServerConfig::default()
    }
}

/// Production resources wired to `base_url`
pub fn test_resources(base_url: &str) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(base_url)).unwrap())
}
