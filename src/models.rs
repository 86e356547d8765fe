// ABOUTME: Re-exports domain models from pierre-diet-core
// ABOUTME: Biometric profile, calculated stats, diet and workout plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_diet_core::models::*;
