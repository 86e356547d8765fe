// ABOUTME: Core types and metabolic calculator for the Pierre diet planner
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Diet Core
//!
//! Foundation crate for the Pierre diet planner. It holds everything that does
//! not touch the network or the database, so it changes rarely and compiles
//! once for the whole workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Biometric profile, calculated stats, diet and workout plans
//! - **calculator**: Mifflin-St Jeor BMR, TDEE, calorie target, weeks to goal
//! - **constants**: Physiological constants and plan limits
//!
//! ## Example
//!
//! ```rust
//! use pierre_diet_core::calculator::compute_stats;
//! use pierre_diet_core::models::{ActivityLevel, BiometricProfile, DeficitIntensity, Sex};
//!
//! let profile = BiometricProfile {
//!     sex: Sex::Female,
//!     age: 25,
//!     weight_kg: 60.0,
//!     height_cm: 160.0,
//!     activity_level: ActivityLevel::VeryActive,
//!     target_weight_loss_kg: 0.0,
//! };
//! let stats = compute_stats(&profile, DeficitIntensity::Moderate).unwrap();
//! assert_eq!(stats.target_calories, 1814);
//! ```

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Physiological constants and plan limits
pub mod constants;

/// Domain models for profiles, stats, and plans
pub mod models;

/// Metabolic calculator (BMR, TDEE, calorie target, weeks to goal)
pub mod calculator;
