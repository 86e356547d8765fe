// ABOUTME: Re-exports unified error types from pierre-diet-core
// ABOUTME: AppError, ErrorCode, and the JSON error envelope used by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_diet_core::errors::*;
