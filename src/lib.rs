// ABOUTME: Main library entry point for the Pierre diet planner service
// ABOUTME: Calorie targets, AI-generated weekly diet and workout plans, and their HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Diet Planner
//!
//! Onboarding backend for a weight-loss coaching flow. A user submits a
//! biometric profile; the service computes their basal metabolic rate, total
//! daily energy expenditure, a daily calorie target for the chosen deficit
//! intensity, and the weeks needed to reach their goal. With a Gemini API key
//! configured it also generates a seven-day diet plan sized to that target and
//! a seven-day workout plan, and can regenerate a single meal or workout day.
//!
//! ## Architecture
//!
//! - **calculator** (from `pierre-diet-core`): pure Mifflin-St Jeor pipeline
//! - **llm**: provider trait and the Gemini implementation
//! - **plans**: prompt rendering and model output parsing
//! - **database**: `SQLite` storage for profiles and plans
//! - **services**: onboarding orchestration
//! - **routes**: axum handlers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_diet_planner::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Pierre Diet Planner configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Metabolic calculator (BMR, TDEE, calorie target, weeks to goal)
pub use pierre_diet_core::calculator;

/// Configuration loaded from the environment
pub mod config;

/// Application constants and environment accessors
pub mod constants;

/// Profile and plan storage
pub mod database;

/// Unified error handling
pub mod errors;

/// LLM provider abstraction and Gemini client
pub mod llm;

/// Structured logging setup and domain log helpers
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Diet and workout plan generation
pub mod plans;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Business logic
pub mod services;
