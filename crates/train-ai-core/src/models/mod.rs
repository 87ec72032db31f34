// ABOUTME: Workout domain models shared by the relay server and its tests
// ABOUTME: Re-exports the user profile and workout plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models for the workout relay.
//!
//! [`UserProfile`] is what callers send; [`WorkoutPlan`] is what the model
//! output must decode into before anything leaves the relay.

mod profile;
mod workout;

pub use profile::UserProfile;
pub use workout::{Exercise, Intensity, WorkoutDay, WorkoutPlan};
