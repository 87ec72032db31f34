// ABOUTME: User fitness profile submitted with each workout plan request
// ABOUTME: Immutable per-request value substituted into the prompt template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Physical profile and training constraints of the person the plan is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Height in centimetres
    pub height_cm: u32,
    /// Weight in kilograms
    pub weight_kg: u32,
    /// Free-text description of current fitness and limitations
    pub physical_condition: String,
    /// Training sessions per week
    pub sessions_per_week: u32,
    /// Length of one session in minutes
    pub workout_minutes: u32,
    /// Gym equipment the plan may use, in caller order
    pub available_machines: Vec<String>,
}

impl UserProfile {
    /// Whether `machine` is one of the caller's machines (exact match)
    #[must_use]
    pub fn has_machine(&self, machine: &str) -> bool {
        self.available_machines.iter().any(|m| m == machine)
    }
}
