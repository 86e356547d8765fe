// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness reports the service; readiness probes the database and plan provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tracing::warn;

use crate::constants::service_names;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::PIERRE_DIET_PLANNER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> impl IntoResponse {
        let database_ok = match resources.database.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Readiness check failed");
                false
            }
        };
        let status = if database_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        // The plan provider only degrades readiness; profiles and stats still work
        let (plan_generation, plan_service) = match &resources.plan_generator {
            Some(generator) => {
                let healthy = generator.provider_healthy().await;
                (
                    generator.provider_name(),
                    if healthy { "ok" } else { "degraded" },
                )
            }
            None => ("disabled", "disabled"),
        };

        (
            status,
            Json(json!({
                "status": if database_ok { "ready" } else { "not_ready" },
                "database": if database_ok { "ok" } else { "unavailable" },
                "plan_generation": plan_generation,
                "plan_service": plan_service,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
    }
}
