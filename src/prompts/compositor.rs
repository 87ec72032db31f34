// ABOUTME: Placeholder substitution that turns a prompt template into a chat conversation
// ABOUTME: Literal replacement of {{field}} tokens with user profile values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use train_ai_core::models::UserProfile;

use super::PromptTemplate;
use crate::errors::{AppError, AppResult};
use crate::llm::ChatMessage;

/// Separator used when rendering list-valued fields
const LIST_SEPARATOR: &str = ", ";

/// Recognized template tokens, one per profile field
///
/// Tokens not in this table are left in the text verbatim, and a recognized
/// token missing from the template is simply not substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{{age}}`
    Age,
    /// `{{height_cm}}`
    HeightCm,
    /// `{{weight_kg}}`
    WeightKg,
    /// `{{physical_condition}}`
    PhysicalCondition,
    /// `{{sessions_per_week}}`
    SessionsPerWeek,
    /// `{{workout_minutes}}`
    WorkoutMinutes,
    /// `{{available_machines}}`, rendered comma-and-space joined
    AvailableMachines,
}

impl Placeholder {
    /// Every recognized placeholder
    pub const ALL: [Self; 7] = [
        Self::Age,
        Self::HeightCm,
        Self::WeightKg,
        Self::PhysicalCondition,
        Self::SessionsPerWeek,
        Self::WorkoutMinutes,
        Self::AvailableMachines,
    ];

    /// Literal token as it appears in templates
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Age => "{{age}}",
            Self::HeightCm => "{{height_cm}}",
            Self::WeightKg => "{{weight_kg}}",
            Self::PhysicalCondition => "{{physical_condition}}",
            Self::SessionsPerWeek => "{{sessions_per_week}}",
            Self::WorkoutMinutes => "{{workout_minutes}}",
            Self::AvailableMachines => "{{available_machines}}",
        }
    }

    /// Render the matching profile field as plain text
    #[must_use]
    pub fn render(self, profile: &UserProfile) -> String {
        match self {
            Self::Age => profile.age.to_string(),
            Self::HeightCm => profile.height_cm.to_string(),
            Self::WeightKg => profile.weight_kg.to_string(),
            Self::PhysicalCondition => profile.physical_condition.clone(),
            Self::SessionsPerWeek => profile.sessions_per_week.to_string(),
            Self::WorkoutMinutes => profile.workout_minutes.to_string(),
            Self::AvailableMachines => profile.available_machines.join(LIST_SEPARATOR),
        }
    }
}

/// Substitute every recognized placeholder in `text` in one left-to-right pass
///
/// Substituted values are never rescanned, so a profile field containing a
/// token is inserted literally.
fn fill(text: &str, profile: &UserProfile) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match Placeholder::ALL
            .iter()
            .find(|placeholder| candidate.starts_with(placeholder.token()))
        {
            Some(placeholder) => {
                out.push_str(&placeholder.render(profile));
                rest = &candidate[placeholder.token().len()..];
            }
            None => {
                out.push_str("{{");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Build the conversation for one profile
///
/// The system message, when present, is passed through unchanged and comes
/// first. The user message has its placeholders filled.
///
/// # Errors
///
/// Returns `TemplateError` if the template has no user message.
pub fn compose(template: &PromptTemplate, profile: &UserProfile) -> AppResult<Vec<ChatMessage>> {
    let user = template
        .user
        .as_deref()
        .ok_or_else(|| AppError::template("Prompt template has no user message"))?;

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &template.system {
        messages.push(ChatMessage::system(system.clone()));
    }
    messages.push(ChatMessage::user(fill(user, profile)));

    Ok(messages)
}
