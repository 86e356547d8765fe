// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Onboarding orchestration shared by the HTTP API and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the business rules so route handlers stay thin and the same
//! behaviour can be exercised directly in tests.

/// Profile submission, stats recomputation, and plan lifecycle
pub mod onboarding;

pub use onboarding::{OnboardingService, OnboardingSummary};
