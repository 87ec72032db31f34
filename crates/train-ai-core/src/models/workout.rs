// ABOUTME: Validated workout plan structure decoded from model output
// ABOUTME: Weekly routine of days, each with machine-based exercises and an intensity level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Exercise intensity, serialized exactly as `Low`, `Medium` or `High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    /// Light effort
    Low,
    /// Moderate effort
    Medium,
    /// Hard effort
    High,
}

impl Intensity {
    /// All accepted values in ascending order
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// One exercise on one machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Machine used, expected to come from the profile's machine list
    pub machine: String,
    /// Exercise name
    pub exercise_name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Time spent on this exercise in minutes
    pub duration_minutes: u32,
    /// Effort level
    pub intensity: Intensity,
}

/// Exercises scheduled for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Day label as written by the model (e.g. "Monday")
    pub day: String,
    /// Exercises in order
    pub exercises: Vec<Exercise>,
}

/// Workout plan returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Profile the model echoed back
    pub user_profile: UserProfile,
    /// Training days in order; may be empty
    pub weekly_routine: Vec<WorkoutDay>,
}

impl WorkoutPlan {
    /// Iterate every exercise across all days
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.weekly_routine.iter().flat_map(|day| day.exercises.iter())
    }

    /// Machines used by the plan that are not in `profile.available_machines`.
    ///
    /// Each name appears once, in first-use order.
    #[must_use]
    pub fn unknown_machines(&self, profile: &UserProfile) -> Vec<&str> {
        let mut unknown: Vec<&str> = Vec::new();
        for exercise in self.exercises() {
            let machine = exercise.machine.as_str();
            if !profile.has_machine(machine) && !unknown.contains(&machine) {
                unknown.push(machine);
            }
        }
        unknown
    }
}
