// ABOUTME: Configuration module for the diet planner server
// ABOUTME: Re-exports environment-driven server, database, and LLM settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the Pierre diet planner
//!
//! All settings come from environment variables; see [`ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LlmConfig, LogLevel, ServerConfig,
};
