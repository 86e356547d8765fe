// ABOUTME: Onboarding route handlers for profiles, deficits, and generated plans
// ABOUTME: Thin axum handlers keyed by user id that delegate to OnboardingService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Onboarding routes
//!
//! Every route is scoped to `/api/users/:user_id`. Bodies are parsed with
//! [`ApiJson`] so malformed JSON reports the same error envelope as
//! validation failures.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use super::{parse_path, parse_user_id};
use crate::database::StoredProfile;
use crate::errors::AppError;
use crate::models::{BiometricProfile, DayOfWeek, DeficitIntensity, MealType, WorkoutPreferences};
use crate::resources::ServerResources;

/// Body of `PUT /api/users/:user_id/profile`
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProfileRequest {
    /// Biometric inputs
    pub profile: BiometricProfile,
    /// Deficit intensity, moderate when omitted
    #[serde(default)]
    pub deficit: DeficitIntensity,
}

/// Body of `PUT /api/users/:user_id/deficit`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateDeficitRequest {
    /// New deficit intensity
    pub deficit: DeficitIntensity,
}

/// Profile as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Stored profile with its stats
    #[serde(flatten)]
    pub profile: StoredProfile,
    /// TDEE minus target
    pub daily_deficit: u32,
}

impl From<StoredProfile> for ProfileResponse {
    fn from(profile: StoredProfile) -> Self {
        Self {
            daily_deficit: profile.stats.daily_deficit(),
            profile,
        }
    }
}

/// Onboarding routes
pub struct OnboardingRoutes;

impl OnboardingRoutes {
    /// Create all onboarding routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/profile",
                put(Self::handle_submit_profile).get(Self::handle_get_profile),
            )
            .route("/api/users/:user_id/deficit", put(Self::handle_update_deficit))
            .route("/api/users/:user_id", delete(Self::handle_delete_user))
            .route(
                "/api/users/:user_id/diet-plan",
                post(Self::handle_generate_diet_plan).get(Self::handle_get_diet_plan),
            )
            .route(
                "/api/users/:user_id/diet-plan/days/:day/meals/:meal_type/regenerate",
                post(Self::handle_regenerate_meal),
            )
            .route(
                "/api/users/:user_id/workout-plan",
                post(Self::handle_generate_workout_plan).get(Self::handle_get_workout_plan),
            )
            .route(
                "/api/users/:user_id/workout-plan/days/:day/regenerate",
                post(Self::handle_regenerate_workout_day),
            )
            .route("/api/users/:user_id/summary", get(Self::handle_summary))
            .with_state(resources)
    }

    async fn handle_submit_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        ApiJson(request): ApiJson<SubmitProfileRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let stored = resources
            .onboarding
            .submit_profile(user_id, request.profile, request.deficit)
            .await?;
        Ok((StatusCode::OK, Json(ProfileResponse::from(stored))).into_response())
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let stored = resources.onboarding.get_profile(user_id).await?;
        Ok((StatusCode::OK, Json(ProfileResponse::from(stored))).into_response())
    }

    async fn handle_update_deficit(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        ApiJson(request): ApiJson<UpdateDeficitRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let stored = resources
            .onboarding
            .update_deficit(user_id, request.deficit)
            .await?;
        Ok((StatusCode::OK, Json(ProfileResponse::from(stored))).into_response())
    }

    async fn handle_delete_user(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        resources.onboarding.delete_user(user_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    async fn handle_generate_diet_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plan = resources.onboarding.generate_diet_plan(user_id).await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn handle_get_diet_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plan = resources.onboarding.get_diet_plan(user_id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_regenerate_meal(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, day, meal_type)): Path<(String, String, String)>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let day: DayOfWeek = parse_path(&day, "day of week")?;
        let meal_type: MealType = parse_path(&meal_type, "meal type")?;
        let plan = resources
            .onboarding
            .regenerate_meal(user_id, day, meal_type)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_generate_workout_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        ApiJson(preferences): ApiJson<WorkoutPreferences>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plan = resources
            .onboarding
            .generate_workout_plan(user_id, preferences)
            .await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn handle_get_workout_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plan = resources.onboarding.get_workout_plan(user_id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_regenerate_workout_day(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, day)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let day: DayOfWeek = parse_path(&day, "day of week")?;
        let plan = resources
            .onboarding
            .regenerate_workout_day(user_id, day)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let summary = resources.onboarding.summary(user_id).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
