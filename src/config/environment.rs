// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, logging, and LLM settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config, env_keys};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(s)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
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

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
            Self::Testing => f.write_str("testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for URLs with an unsupported scheme.
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            anyhow::bail!("Unsupported database URL scheme: {s}")
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/diet_planner.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Generative plan service configuration
    pub llm: LlmConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*` for any origin
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: DatabaseUrl,
    /// Run migrations on startup
    pub auto_migrate: bool,
}

/// Gemini plan generation configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; plan endpoints are unavailable without it
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::LLM_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
            temperature: defaults::LLM_TEMPERATURE,
            max_output_tokens: defaults::LLM_MAX_OUTPUT_TOKENS,
            request_timeout_secs: defaults::LLM_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable is set but unparsable,
    /// or if `DATABASE_URL` uses an unsupported scheme.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_config::http_port(),
            host: env_config::host(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            environment: Environment::from_str_or_default(&env_config::environment()),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_config::database_url())
                    .context("Invalid DATABASE_URL value")?,
                auto_migrate: parse_env("AUTO_MIGRATE", true)?,
            },
            llm: LlmConfig {
                api_key: env::var(env_keys::GEMINI_API_KEY)
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var(env_keys::LLM_MODEL)
                    .unwrap_or_else(|_| defaults::LLM_MODEL.to_owned()),
                base_url: env::var(env_keys::GEMINI_BASE_URL)
                    .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_owned()),
                temperature: parse_env(env_keys::LLM_TEMPERATURE, defaults::LLM_TEMPERATURE)?,
                max_output_tokens: parse_env(
                    env_keys::LLM_MAX_OUTPUT_TOKENS,
                    defaults::LLM_MAX_OUTPUT_TOKENS,
                )?,
                request_timeout_secs: parse_env(
                    env_keys::LLM_REQUEST_TIMEOUT_SECS,
                    defaults::LLM_REQUEST_TIMEOUT_SECS,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_owned()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature is outside 0.0-2.0, the token
    /// ceiling is zero, or the LLM timeout is zero or not below the HTTP
    /// request timeout.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!(
                "{} must be between 0.0 and 2.0, got {}",
                env_keys::LLM_TEMPERATURE,
                self.llm.temperature
            );
        }
        if self.llm.max_output_tokens == 0 {
            anyhow::bail!("{} must be positive", env_keys::LLM_MAX_OUTPUT_TOKENS);
        }
        if self.llm.request_timeout_secs == 0 {
            anyhow::bail!("{} must be positive", env_keys::LLM_REQUEST_TIMEOUT_SECS);
        }
        // A plan call must finish before the HTTP layer times the request out
        if self.llm.request_timeout_secs >= defaults::HTTP_REQUEST_TIMEOUT_SECS {
            anyhow::bail!(
                "{} must be below the {}s HTTP request timeout, got {}",
                env_keys::LLM_REQUEST_TIMEOUT_SECS,
                defaults::HTTP_REQUEST_TIMEOUT_SECS,
                self.llm.request_timeout_secs
            );
        }
        Ok(())
    }

    /// One-line configuration summary that never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pierre Diet Planner configuration: env={} http={}:{} log={} db={} llm_model={} llm_key={}",
            self.environment,
            self.host,
            self.http_port,
            self.log_level,
            self.database.url,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "configured"
            } else {
                "missing"
            }
        )
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
