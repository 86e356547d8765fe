// ABOUTME: HTTP middleware for the diet planner API
// ABOUTME: CORS policy and request correlation with structured access logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request ids, spans, and access logs
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{log_requests, REQUEST_ID_HEADER};
