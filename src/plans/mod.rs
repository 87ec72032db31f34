// ABOUTME: Workout plan decoding from raw model output
// ABOUTME: The boundary between untyped inference text and the typed WorkoutPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout plan parsing.

mod parser;

pub use parser::{parse, parse_text};
pub use train_ai_core::models::{Exercise, Intensity, WorkoutDay, WorkoutPlan};
