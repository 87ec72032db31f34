// ABOUTME: JSON schema for workout plans, sent as the structured-output constraint
// ABOUTME: Mirrors the field set of the typed WorkoutPlan so the model emits decodable JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{json, Value};
use train_ai_core::models::Intensity;

fn user_profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "age": {"type": "integer"},
            "height_cm": {"type": "integer"},
            "weight_kg": {"type": "integer"},
            "physical_condition": {"type": "string"},
            "sessions_per_week": {"type": "integer"},
            "workout_minutes": {"type": "integer"},
            "available_machines": {
                "type": "array",
                "items": {"type": "string"}
            }
        },
        "required": [
            "age",
            "height_cm",
            "weight_kg",
            "physical_condition",
            "sessions_per_week",
            "workout_minutes",
            "available_machines"
        ]
    })
}

fn exercise_schema() -> Value {
    let intensities: Vec<&str> = Intensity::ALL.iter().map(Intensity::as_str).collect();
    json!({
        "type": "object",
        "properties": {
            "machine": {"type": "string"},
            "exercise_name": {"type": "string"},
            "sets": {"type": "integer"},
            "reps": {"type": "integer"},
            "duration_minutes": {"type": "integer"},
            "intensity": {"type": "string", "enum": intensities}
        },
        "required": [
            "machine",
            "exercise_name",
            "sets",
            "reps",
            "duration_minutes",
            "intensity"
        ]
    })
}

/// Schema passed in the inference request's `format` field
#[must_use]
pub fn workout_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "user_profile": user_profile_schema(),
            "weekly_routine": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": {"type": "string"},
                        "exercises": {
                            "type": "array",
                            "items": exercise_schema()
                        }
                    },
                    "required": ["day", "exercises"]
                }
            }
        },
        "required": ["user_profile", "weekly_routine"]
    })
}
