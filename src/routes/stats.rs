// ABOUTME: Stateless calorie calculation routes
// ABOUTME: Computes stats for one deficit intensity or compares all of them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use crate::calculator;
use crate::errors::AppError;
use crate::models::{BiometricProfile, CalculatedStats, DeficitIntensity};

/// Body of `POST /api/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    /// Biometric inputs
    pub profile: BiometricProfile,
    /// Deficit intensity, moderate when omitted
    #[serde(default)]
    pub deficit: DeficitIntensity,
}

/// Body of `POST /api/stats/compare`
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    /// Biometric inputs
    pub profile: BiometricProfile,
}

/// Stats for one deficit intensity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Intensity the stats were computed for
    pub deficit: DeficitIntensity,
    /// Calculated figures
    #[serde(flatten)]
    pub stats: CalculatedStats,
    /// TDEE minus target
    pub daily_deficit: u32,
}

impl StatsResponse {
    fn new(deficit: DeficitIntensity, stats: CalculatedStats) -> Self {
        Self {
            deficit,
            stats,
            daily_deficit: stats.daily_deficit(),
        }
    }
}

/// Stats for every deficit intensity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// Gentlest first
    pub options: Vec<StatsResponse>,
}

/// Calculator routes
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create calculator routes
    pub fn routes() -> Router {
        Router::new()
            .route("/api/stats", post(Self::handle_stats))
            .route("/api/stats/compare", post(Self::handle_compare))
    }

    async fn handle_stats(
        ApiJson(request): ApiJson<StatsRequest>,
    ) -> Result<Json<StatsResponse>, AppError> {
        let stats = calculator::compute_stats(&request.profile, request.deficit)?;
        Ok(Json(StatsResponse::new(request.deficit, stats)))
    }

    async fn handle_compare(
        ApiJson(request): ApiJson<CompareRequest>,
    ) -> Result<Json<CompareResponse>, AppError> {
        let options = calculator::compare_deficits(&request.profile)?
            .into_iter()
            .map(|(deficit, stats)| StatsResponse::new(deficit, stats))
            .collect();
        Ok(Json(CompareResponse { options }))
    }
}
