// ABOUTME: Workout plan pipeline from user profile to validated plan
// ABOUTME: Template fetch, composition, schema-constrained inference, and strict parsing in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use train_ai_core::models::{UserProfile, WorkoutPlan};

use super::sampling::SamplingOptions;
use crate::errors::{AppError, AppResult};
use crate::llm::schema::workout_plan_schema;
use crate::llm::{ChatRequest, ChatResponse, GenerateRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::plans;
use crate::prompts::{compose, PromptCache, PromptRegistry};

/// Body of a plan request: the profile plus optional sampling knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlanRequest {
    /// Profile the plan is built for
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Model and sampling options
    #[serde(flatten)]
    pub options: SamplingOptions,
}

/// Body of a free-form completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// Model and sampling options
    #[serde(flatten)]
    pub options: SamplingOptions,
}

/// Runs the plan pipeline against an inference provider
///
/// Owns the prompt template memo, so the template lives exactly as long as
/// the service.
pub struct WorkoutPlanService {
    provider: Arc<dyn LlmProvider>,
    prompts: PromptCache,
}

impl WorkoutPlanService {
    /// Create a service with an empty template memo
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, registry: Arc<dyn PromptRegistry>) -> Self {
        Self {
            provider,
            prompts: PromptCache::new(registry),
        }
    }

    /// Build a plan for one profile
    ///
    /// Stages run strictly in order: template, composition, inference, parsing.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for out-of-range sampling options
    /// - `UpstreamUnavailable` if the prompt registry fails
    /// - `TemplateError` if the template has no user message
    /// - `UpstreamError` if the inference call fails
    /// - `MalformedPlan` if the model output is not a valid plan
    #[instrument(skip(self, request), fields(model = request.options.model.as_deref().unwrap_or(self.provider.default_model())))]
    pub async fn generate_plan(&self, request: &WorkoutPlanRequest) -> AppResult<WorkoutPlan> {
        request.options.validate()?;
        if request.options.stream {
            debug!("Streaming was requested but plans are always returned whole");
        }

        let template = self.prompts.get_template().await?;
        let messages = compose(template, &request.profile)?;

        let mut chat = ChatRequest::new(messages).with_response_schema(workout_plan_schema());
        if let Some(model) = &request.options.model {
            chat = chat.with_model(model.clone());
        }
        if let Some(temperature) = request.options.temperature {
            chat = chat.with_temperature(temperature);
        }
        if let Some(max_tokens) = request.options.max_output_tokens {
            chat = chat.with_max_tokens(max_tokens);
        }

        let envelope = self.provider.complete(&chat).await?;
        AppLogger::log_inference_metrics(&envelope);

        let plan = plans::parse(&envelope)?;

        let unknown = plan.unknown_machines(&request.profile);
        if !unknown.is_empty() {
            warn!(
                machines = ?unknown,
                "Workout plan uses machines the user does not have"
            );
        }

        info!(
            days = plan.weekly_routine.len(),
            exercises = plan.exercises().count(),
            "Workout plan generated"
        );

        Ok(plan)
    }

    /// Forward a free-form prompt to the inference server
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty prompt or out-of-range sampling options
    /// - `UpstreamError` if the inference call fails
    #[instrument(skip(self, request))]
    pub async fn generate_text(&self, request: &TextGenerationRequest) -> AppResult<ChatResponse> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::invalid_input("prompt must not be empty"));
        }
        request.options.validate()?;
        if request.options.stream {
            debug!("Streaming was requested but completions are always returned whole");
        }

        let generate = GenerateRequest {
            prompt: request.prompt.clone(),
            model: request.options.model.clone(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_output_tokens,
        };

        let envelope = self.provider.generate(&generate).await?;
        AppLogger::log_inference_metrics(&envelope);
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::llm::ModelInfo;
    use crate::prompts::PromptTemplate;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Provider that records requests and replies with fixed text
    struct ScriptedProvider {
        reply: AppResult<String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn replying(text: impl Into<String>) -> Self {
            Self {
                reply: Ok(text.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(AppError::upstream("Ollama", "API error (500): boom")),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn reply(&self) -> AppResult<String> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(AppError::new(e.code, e.message.clone())),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn default_model(&self) -> &str {
            "llama3.2"
        }

        async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(ChatResponse::from_text("llama3.2", self.reply()?))
        }

        async fn generate(&self, request: &GenerateRequest) -> AppResult<ChatResponse> {
            Ok(ChatResponse::from_text("llama3.2", format!("echo: {}", request.prompt)))
        }

        async fn list_models(&self) -> AppResult<Vec<ModelInfo>> {
            Ok(Vec::new())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    struct StaticRegistry(PromptTemplate);

    #[async_trait]
    impl PromptRegistry for StaticRegistry {
        async fn fetch_template(&self) -> AppResult<PromptTemplate> {
            Ok(self.0.clone())
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            age: 30,
            height_cm: 180,
            weight_kg: 80,
            physical_condition: "good".to_owned(),
            sessions_per_week: 3,
            workout_minutes: 45,
            available_machines: vec!["bench".to_owned(), "rower".to_owned()],
        }
    }

    fn plan_text() -> String {
        json!({
            "user_profile": profile(),
            "weekly_routine": [{
                "day": "Monday",
                "exercises": [{
                    "machine": "rower", "exercise_name": "Row", "sets": 1,
                    "reps": 1, "duration_minutes": 20, "intensity": "Medium"
                }]
            }]
        })
        .to_string()
    }

    fn service(provider: Arc<ScriptedProvider>, user: Option<&str>) -> WorkoutPlanService {
        let template = PromptTemplate {
            system: Some("You are a coach.".to_owned()),
            user: user.map(str::to_owned),
        };
        WorkoutPlanService::new(provider, Arc::new(StaticRegistry(template)))
    }

    fn request() -> WorkoutPlanRequest {
        WorkoutPlanRequest {
            profile: profile(),
            options: SamplingOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_composes_constrains_and_parses() {
        let provider = Arc::new(ScriptedProvider::replying(plan_text()));
        let service = service(provider.clone(), Some("Age {{age}} using {{available_machines}}"));

        let mut request = request();
        request.options.temperature = Some(0.3);
        let plan = service.generate_plan(&request).await.unwrap();

        assert_eq!(plan.weekly_routine.len(), 1);
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages[1].content, "Age 30 using bench, rower");
        assert_eq!(seen[0].temperature, Some(0.3));
        assert_eq!(seen[0].response_schema, Some(workout_plan_schema()));
    }

    #[tokio::test]
    async fn test_invalid_options_stop_before_upstream() {
        let provider = Arc::new(ScriptedProvider::replying(plan_text()));
        let service = service(provider.clone(), Some("{{age}}"));

        let mut request = request();
        request.options.max_output_tokens = Some(0);
        let err = service.generate_plan(&request).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_user_template_is_template_error() {
        let provider = Arc::new(ScriptedProvider::replying(plan_text()));
        let service = service(provider.clone(), None);

        let err = service.generate_plan(&request()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TemplateError);
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_and_parse_failures_keep_their_codes() {
        let service_failing = service(Arc::new(ScriptedProvider::failing()), Some("{{age}}"));
        let err = service_failing.generate_plan(&request()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamError);

        let service_prose = service(
            Arc::new(ScriptedProvider::replying("I cannot help with that")),
            Some("{{age}}"),
        );
        let err = service_prose.generate_plan(&request()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedPlan);
    }

    #[tokio::test]
    async fn test_generate_text_rejects_empty_prompt() {
        let service = service(Arc::new(ScriptedProvider::replying("")), Some("{{age}}"));
        let request = TextGenerationRequest {
            prompt: "   ".to_owned(),
            options: SamplingOptions::default(),
        };
        let err = service.generate_text(&request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let request = TextGenerationRequest {
            prompt: "hello".to_owned(),
            options: SamplingOptions::default(),
        };
        assert_eq!(service.generate_text(&request).await.unwrap().text, "echo: hello");
    }

    #[test]
    fn test_request_body_is_flat() {
        let request: WorkoutPlanRequest = serde_json::from_value(json!({
            "age": 30, "height_cm": 180, "weight_kg": 80,
            "physical_condition": "good", "sessions_per_week": 3,
            "workout_minutes": 45, "available_machines": ["bench"],
            "model": "qwen2.5", "temperature": 1, "stream": true
        }))
        .unwrap();

        assert_eq!(request.profile.age, 30);
        assert_eq!(request.options.model.as_deref(), Some("qwen2.5"));
        assert_eq!(request.options.temperature, Some(1.0));
        assert!(request.options.stream);
    }
}
