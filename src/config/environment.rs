// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads inference server, prompt registry, HTTP, and CORS settings once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for the workout relay

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

/// Default bind address
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8000;
/// Default project name reported by the root endpoint
const DEFAULT_PROJECT_NAME: &str = "Train AI";
/// Default inference server base URL (Ollama)
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
/// Default inference timeout in seconds
const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 30;
/// Default model when requests do not name one
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
/// Default prompt registry host
const DEFAULT_REGISTRY_HOST: &str = "https://cloud.agenta.ai";
/// Default registry application slug
const DEFAULT_REGISTRY_APP_SLUG: &str = "workout";
/// Default registry environment slug
const DEFAULT_REGISTRY_ENVIRONMENT: &str = "development";
/// Default registry timeout in seconds
const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 10;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational output
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Inference server (Ollama) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL without the `/api/...` suffix
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Model used when a request does not name one
    pub default_model: String,
}

impl OllamaConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_OLLAMA_TIMEOUT_SECS,
            default_model: DEFAULT_OLLAMA_MODEL.to_owned(),
        }
    }
}

/// Prompt registry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry base URL
    pub base_url: String,
    /// API key, never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Application identifier the prompt is deployed under
    pub app_slug: String,
    /// Environment identifier the prompt is deployed to
    pub environment_slug: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_HOST.to_owned(),
            api_key: None,
            app_slug: DEFAULT_REGISTRY_APP_SLUG.to_owned(),
            environment_slug: DEFAULT_REGISTRY_ENVIRONMENT.to_owned(),
            timeout_secs: DEFAULT_REGISTRY_TIMEOUT_SECS,
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Service name reported by the root endpoint
    pub project_name: String,
    /// Service version
    pub version: String,
    /// Deployment environment
    pub environment: Environment,
    /// Debug flag reported to clients
    pub debug: bool,
    /// Log level
    pub log_level: LogLevel,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Inference server configuration
    pub ollama: OllamaConfig,
    /// Prompt registry configuration
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            project_name: DEFAULT_PROJECT_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: Environment::default(),
            debug: false,
            log_level: LogLevel::default(),
            cors: CorsConfig::default(),
            ollama: OllamaConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration after reading variables from a specific env file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or a value is invalid.
    pub fn from_env_file(path: &Path) -> AppResult<Self> {
        dotenvy::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load env file {}: {e}", path.display()))
        })?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a numeric or boolean variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_port = match get("HTTP_PORT").or_else(|| get("PORT")) {
            Some(raw) => parse_value("HTTP_PORT", &raw)?,
            None => defaults.http_port,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            http_port,
            project_name: get("PROJECT_NAME").unwrap_or(defaults.project_name),
            version: defaults.version,
            environment: get("ENVIRONMENT")
                .map_or_else(Environment::default, |v| Environment::from_str_or_default(&v)),
            debug: parse_bool("DEBUG", get("DEBUG"), defaults.debug)?,
            log_level: get("LOG_LEVEL")
                .map_or_else(LogLevel::default, |v| LogLevel::from_str_or_default(&v)),
            cors: CorsConfig {
                allowed_origins: get("CORS_ALLOWED_ORIGINS")
                    .unwrap_or(defaults.cors.allowed_origins),
            },
            ollama: OllamaConfig {
                base_url: get("OLLAMA_BASE_URL").unwrap_or(defaults.ollama.base_url),
                timeout_secs: parse_or(
                    "OLLAMA_TIMEOUT",
                    get("OLLAMA_TIMEOUT"),
                    defaults.ollama.timeout_secs,
                )?,
                default_model: get("OLLAMA_DEFAULT_MODEL")
                    .unwrap_or(defaults.ollama.default_model),
            },
            registry: RegistryConfig {
                base_url: get("AGENTA_HOST").unwrap_or(defaults.registry.base_url),
                api_key: get("AGENTA_API_KEY"),
                app_slug: get("AGENTA_APP_SLUG").unwrap_or(defaults.registry.app_slug),
                environment_slug: get("AGENTA_ENVIRONMENT")
                    .unwrap_or(defaults.registry.environment_slug),
                timeout_secs: parse_or(
                    "REGISTRY_TIMEOUT",
                    get("REGISTRY_TIMEOUT"),
                    defaults.registry.timeout_secs,
                )?,
            },
        })
    }

    /// Socket address string to bind the HTTP listener to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} Configuration:\n\
             - Bind: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Ollama: {} (model {}, timeout {}s)\n\
             - Prompt Registry: {} (app {}, env {}, api key {})\n\
             - CORS Origins: {}",
            self.project_name,
            self.bind_address(),
            self.environment,
            self.log_level,
            self.ollama.base_url,
            self.ollama.default_model,
            self.ollama.timeout_secs,
            self.registry.base_url,
            self.registry.app_slug,
            self.registry.environment_slug,
            if self.registry.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.cors.allowed_origins,
        )
    }
}

/// Parse a present value, failing with a `ConfigError` naming the variable
fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
}

/// Parse an optional value or fall back to `default`
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |value| parse_value(key, &value))
}

/// Parse a boolean flag accepting `true/false/1/0/yes/no`
fn parse_bool(key: &str, raw: Option<String>, default: bool) -> AppResult<bool> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!(
            "Invalid {key} value '{other}': expected a boolean"
        ))),
    }
}
