// ABOUTME: Application constants and environment accessors for the diet planner service
// ABOUTME: Service names, default ports and URLs, and env-var readers with fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain.

use std::env;

/// Service identifiers used in logs and health responses
pub mod service_names {
    /// Name of the HTTP service
    pub const PIERRE_DIET_PLANNER: &str = "pierre-diet-planner";
    /// Name reported for the generative plan service
    pub const PLAN_GENERATOR: &str = "plan-generator";
}

/// Default values used when the environment is silent
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// HTTP bind address
    pub const HOST: &str = "127.0.0.1";
    /// SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/diet_planner.db";
    /// Gemini REST endpoint
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Gemini model used for plan generation
    pub const LLM_MODEL: &str = "gemini-2.5-flash";
    /// Sampling temperature for plan generation
    pub const LLM_TEMPERATURE: f32 = 0.7;
    /// Output token ceiling for a full weekly plan
    pub const LLM_MAX_OUTPUT_TOKENS: u32 = 8192;
    /// Timeout for a single LLM request
    pub const LLM_REQUEST_TIMEOUT_SECS: u64 = 90;
    /// Timeout for a single HTTP request handled by the server
    pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Environment variable names
pub mod env_keys {
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Model override
    pub const LLM_MODEL: &str = "PIERRE_LLM_MODEL";
    /// Temperature override
    pub const LLM_TEMPERATURE: &str = "PIERRE_LLM_TEMPERATURE";
    /// Max output tokens override
    pub const LLM_MAX_OUTPUT_TOKENS: &str = "PIERRE_LLM_MAX_OUTPUT_TOKENS";
    /// LLM timeout override
    pub const LLM_REQUEST_TIMEOUT_SECS: &str = "PIERRE_LLM_TIMEOUT_SECS";
}

/// Environment-based configuration accessors
pub mod env_config {
    use super::{defaults, env};

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::HTTP_PORT)
    }

    /// Get bind host from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_owned())
    }

    /// Get database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.to_owned())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned())
    }

    /// Get deployment environment name
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned())
    }
}
