// ABOUTME: Route module organization for the diet planner HTTP API
// ABOUTME: Assembles domain routers and the shared middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// JSON body extractor that reports failures as `AppError`
pub mod extract;
/// Health check and readiness routes
pub mod health;
/// Profile, deficit, and plan routes keyed by user id
pub mod onboarding;
/// Stateless calorie calculation routes
pub mod stats;

pub use health::HealthRoutes;
pub use onboarding::OnboardingRoutes;
pub use stats::StatsRoutes;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use http::HeaderName;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::CorsConfig;
use crate::constants::defaults;
use crate::errors::AppError;
use crate::middleware::{log_requests, setup_cors, REQUEST_ID_HEADER};
use crate::resources::ServerResources;

/// Build the complete application router
///
/// Layers run outermost first: request id assignment, tracing, access log,
/// timeout, CORS, then the handlers.
pub fn build_router(resources: Arc<ServerResources>, cors: &CorsConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(StatsRoutes::routes())
        .merge(OnboardingRoutes::routes(resources))
        .layer(setup_cors(cors))
        .layer(TimeoutLayer::new(Duration::from_secs(
            defaults::HTTP_REQUEST_TIMEOUT_SECS,
        )))
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

/// Parse a path segment, reporting failures as `InvalidInput`
pub(crate) fn parse_path<T>(raw: &str, what: &str) -> Result<T, AppError>
where
    T: FromStr,
{
    T::from_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid {what} '{raw}'")))
}

/// Parse a user id path segment
pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    parse_path(raw, "user id")
}
