// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates environment parsing, defaults, overrides, and secret redaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use pierre_diet_planner::config::{DatabaseUrl, Environment, LlmConfig, LogLevel, ServerConfig};
use pierre_diet_planner::constants::defaults;
use serial_test::serial;

const CONFIG_VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "DATABASE_URL",
    "AUTO_MIGRATE",
    "RUST_LOG",
    "ENVIRONMENT",
    "CORS_ALLOWED_ORIGINS",
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "PIERRE_LLM_MODEL",
    "PIERRE_LLM_TEMPERATURE",
    "PIERRE_LLM_MAX_OUTPUT_TOKENS",
    "PIERRE_LLM_TIMEOUT_SECS",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Trace);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
    assert!(!Environment::Development.is_production());
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(
        DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
        DatabaseUrl::Memory
    );
    assert_eq!(DatabaseUrl::parse_url("sqlite:").unwrap(), DatabaseUrl::Memory);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/planner.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/planner.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("/var/lib/planner.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("/var/lib/planner.db")
        }
    );
    assert!(DatabaseUrl::parse_url("postgresql://localhost/db").is_err());

    assert!(DatabaseUrl::Memory.is_memory());
    assert_eq!(DatabaseUrl::Memory.to_connection_string(), "sqlite::memory:");
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:planner.db").unwrap().to_string(),
        "sqlite:planner.db"
    );
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, defaults::HTTP_PORT);
    assert_eq!(config.host, defaults::HOST);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.environment, Environment::Development);
    assert!(config.database.auto_migrate);
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.llm.model, defaults::LLM_MODEL);
    assert_eq!(config.llm.max_output_tokens, defaults::LLM_MAX_OUTPUT_TOKENS);
    assert_eq!(config.cors.allowed_origins, "*");
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_config_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("AUTO_MIGRATE", "false");
    env::set_var("RUST_LOG", "debug");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("GEMINI_API_KEY", "test-key-123");
    env::set_var("PIERRE_LLM_MODEL", "gemini-2.5-pro");
    env::set_var("PIERRE_LLM_TEMPERATURE", "0.2");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.database.url, DatabaseUrl::Memory);
    assert!(!config.database.auto_migrate);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.environment.is_production());
    assert_eq!(config.llm.api_key.as_deref(), Some("test-key-123"));
    assert_eq!(config.llm.model, "gemini-2.5-pro");
    assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
}

#[test]
#[serial]
fn test_blank_api_key_is_treated_as_missing() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "   ");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert!(config.llm.api_key.is_none());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_config_env();

    env::set_var("PIERRE_LLM_TEMPERATURE", "3.5");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("PIERRE_LLM_TEMPERATURE", "warm");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("PIERRE_LLM_TEMPERATURE");

    env::set_var("PIERRE_LLM_MAX_OUTPUT_TOKENS", "0");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("PIERRE_LLM_MAX_OUTPUT_TOKENS");

    env::set_var("PIERRE_LLM_TIMEOUT_SECS", "300");
    let err = ServerConfig::from_env().unwrap_err();
    assert!(format!("{err:#}").contains("PIERRE_LLM_TIMEOUT_SECS"));
    env::set_var("PIERRE_LLM_TIMEOUT_SECS", "120");
    assert!(ServerConfig::from_env().is_err());
    env::set_var("PIERRE_LLM_TIMEOUT_SECS", "119");
    assert_eq!(ServerConfig::from_env().unwrap().llm.request_timeout_secs, 119);
    env::remove_var("PIERRE_LLM_TIMEOUT_SECS");

    env::set_var("AUTO_MIGRATE", "sometimes");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("AUTO_MIGRATE");

    env::set_var("DATABASE_URL", "mysql://localhost/planner");
    let err = ServerConfig::from_env().unwrap_err();
    assert!(format!("{err:#}").contains("DATABASE_URL"));

    clear_config_env();
}

#[test]
#[serial]
fn test_summary_never_contains_api_key() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "super-secret-key");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    let summary = config.summary();
    assert!(summary.contains("llm_key=configured"));
    assert!(!summary.contains("super-secret-key"));
}

#[test]
fn test_llm_config_debug_redacts_key() {
    let config = LlmConfig {
        api_key: Some("super-secret-key".to_owned()),
        ..LlmConfig::default()
    };
    let debug = format!("{config:?}");
    assert!(debug.contains("[REDACTED]"));
    assert!(!debug.contains("super-secret-key"));
}
