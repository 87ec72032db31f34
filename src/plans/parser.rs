// ABOUTME: Strict all-or-nothing parser from inference envelope text to WorkoutPlan
// ABOUTME: Strips one Markdown code fence, then decodes with serde and maps failures to MalformedPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, warn};
use train_ai_core::models::WorkoutPlan;

use crate::errors::{AppError, AppResult};
use crate::llm::ChatResponse;

/// Characters of offending output kept in logs
const LOG_PREVIEW_CHARS: usize = 200;

/// Remove a single surrounding ```` ``` ```` or ```` ```json ```` fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line
    body.split_once('\n')
        .map_or(body, |(info, inner)| {
            if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) {
                inner
            } else {
                body
            }
        })
        .trim()
}

/// Decode raw model text into a plan
///
/// # Errors
///
/// Returns `MalformedPlan` if the text is not JSON, a required field is missing
/// or mistyped, or an intensity is not `Low`, `Medium` or `High`.
pub fn parse_text(text: &str) -> AppResult<WorkoutPlan> {
    let payload = strip_code_fence(text);

    serde_json::from_str::<WorkoutPlan>(payload).map_err(|e| {
        warn!(
            "Model output is not a valid workout plan: {} - output: {}",
            e,
            payload.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );
        AppError::malformed_plan(e.to_string()).with_source(e)
    })
}

/// Decode the text of an inference envelope into a plan
///
/// # Errors
///
/// Returns `MalformedPlan` on any decode or validation failure.
pub fn parse(envelope: &ChatResponse) -> AppResult<WorkoutPlan> {
    if !envelope.is_complete {
        debug!("Parsing output from an incomplete generation");
    }
    let plan = parse_text(&envelope.text)?;
    debug!(
        "Parsed workout plan: {} days, {} exercises",
        plan.weekly_routine.len(),
        plan.exercises().count()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;
    use train_ai_core::models::{Exercise, Intensity, UserProfile, WorkoutDay};

    fn sample_plan() -> WorkoutPlan {
        WorkoutPlan {
            user_profile: UserProfile {
                age: 30,
                height_cm: 180,
                weight_kg: 80,
                physical_condition: "good".to_owned(),
                sessions_per_week: 2,
                workout_minutes: 40,
                available_machines: vec!["bench".to_owned(), "rower".to_owned()],
            },
            weekly_routine: vec![
                WorkoutDay {
                    day: "Monday".to_owned(),
                    exercises: vec![Exercise {
                        machine: "bench".to_owned(),
                        exercise_name: "Bench press".to_owned(),
                        sets: 4,
                        reps: 8,
                        duration_minutes: 20,
                        intensity: Intensity::High,
                    }],
                },
                WorkoutDay {
                    day: "Thursday".to_owned(),
                    exercises: vec![Exercise {
                        machine: "rower".to_owned(),
                        exercise_name: "Steady row".to_owned(),
                        sets: 1,
                        reps: 1,
                        duration_minutes: 30,
                        intensity: Intensity::Low,
                    }],
                },
            ],
        }
    }

    fn envelope(text: impl Into<String>) -> ChatResponse {
        ChatResponse::from_text("llama3.2", text)
    }

    fn assert_malformed(text: &str) {
        let err = parse(&envelope(text)).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedPlan, "input: {text}");
    }

    #[test]
    fn test_serialized_plan_parses_back_equal() {
        let plan = sample_plan();
        let text = serde_json::to_string(&plan).unwrap();
        assert_eq!(parse(&envelope(text)).unwrap(), plan);
    }

    #[test]
    fn test_empty_routine_is_valid() {
        let text = json!({
            "user_profile": {
                "age": 30, "height_cm": 180, "weight_kg": 80,
                "physical_condition": "good", "sessions_per_week": 3,
                "workout_minutes": 45, "available_machines": ["bench"]
            },
            "weekly_routine": []
        })
        .to_string();

        let plan = parse(&envelope(text)).unwrap();
        assert!(plan.weekly_routine.is_empty());
        assert_eq!(plan.exercises().count(), 0);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert_malformed("Here is your plan: Monday, bench press");
        assert_malformed("");
        assert_malformed("{\"user_profile\": ");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut value = serde_json::to_value(sample_plan()).unwrap();
        value["weekly_routine"][0]["exercises"][0]
            .as_object_mut()
            .unwrap()
            .remove("sets");
        assert_malformed(&value.to_string());

        let mut value = serde_json::to_value(sample_plan()).unwrap();
        value.as_object_mut().unwrap().remove("user_profile");
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let mut value = serde_json::to_value(sample_plan()).unwrap();
        value["user_profile"]["age"] = json!("thirty");
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_unknown_intensity_is_malformed() {
        let mut value = serde_json::to_value(sample_plan()).unwrap();
        value["weekly_routine"][0]["exercises"][0]["intensity"] = json!("Extreme");
        assert_malformed(&value.to_string());

        value["weekly_routine"][0]["exercises"][0]["intensity"] = json!("high");
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let plan = sample_plan();
        let body = serde_json::to_string_pretty(&plan).unwrap();

        assert_eq!(parse_text(&format!("```json\n{body}\n```")).unwrap(), plan);
        assert_eq!(parse_text(&format!("```\n{body}\n```")).unwrap(), plan);
        assert_eq!(parse_text(&format!("  {body}  \n")).unwrap(), plan);
    }

    #[test]
    fn test_prose_around_fence_is_malformed() {
        let body = serde_json::to_string(&sample_plan()).unwrap();
        assert_malformed(&format!("Sure! ```json\n{body}\n```"));
    }
}
