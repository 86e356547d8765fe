// ABOUTME: Onboarding business logic tying the calculator, plan generator, and store together
// ABOUTME: Profile submission, deficit updates, plan generation and single-entry regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use uuid::Uuid;

use crate::calculator;
use crate::database::{DatabaseProvider, StoredProfile};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{
    BiometricProfile, DayOfWeek, DeficitIntensity, DietPlan, MealType, WorkoutPlan,
    WorkoutPreferences,
};
use crate::plans::PlanGenerator;

/// Everything stored for a user
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingSummary {
    /// Profile and current stats
    pub profile: StoredProfile,
    /// Diet plan, if generated
    pub diet_plan: Option<DietPlan>,
    /// Workout plan, if generated
    pub workout_plan: Option<WorkoutPlan>,
    /// The diet plan was sized for a calorie target that no longer applies
    pub diet_plan_stale: bool,
}

/// Orchestrates onboarding for a single user at a time
///
/// Each mutating operation holds that user's lock from its first read to its
/// last write, so two plan edits racing on the same user cannot overwrite
/// each other.
#[derive(Clone)]
pub struct OnboardingService {
    database: Arc<dyn DatabaseProvider>,
    generator: Option<PlanGenerator>,
    user_locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl OnboardingService {
    /// Create a service; without a generator the plan operations report the
    /// plan service as unavailable
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>, generator: Option<PlanGenerator>) -> Self {
        Self {
            database,
            generator,
            user_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Serialise mutations for `user_id` until the guard drops
    async fn lock_user(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            // Idle entries only hold the map's reference
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Whether plan generation is configured
    #[must_use]
    pub const fn plans_enabled(&self) -> bool {
        self.generator.is_some()
    }

    fn generator(&self) -> AppResult<&PlanGenerator> {
        self.generator.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Plan generation is not configured (GEMINI_API_KEY is missing)",
            )
        })
    }

    async fn require_profile(&self, user_id: Uuid) -> AppResult<StoredProfile> {
        self.database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Profile").with_resource_id(user_id.to_string())
            })
    }

    /// Validate the profile, compute stats, and store both
    ///
    /// Resubmitting overwrites the profile and stats but keeps the original
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns the calculator's validation error for a bad profile, or a
    /// database error if the write fails.
    pub async fn submit_profile(
        &self,
        user_id: Uuid,
        profile: BiometricProfile,
        deficit: DeficitIntensity,
    ) -> AppResult<StoredProfile> {
        let stats = calculator::compute_stats(&profile, deficit)?;
        let _guard = self.lock_user(user_id).await;
        let now = Utc::now();
        let created_at = self
            .database
            .get_profile(user_id)
            .await?
            .map_or(now, |existing| existing.created_at);

        let stored = StoredProfile {
            user_id,
            profile,
            deficit,
            stats,
            created_at,
            updated_at: now,
        };
        self.database.upsert_profile(&stored).await?;

        info!(
            user.id = %user_id,
            deficit = %deficit,
            target_calories = stats.target_calories,
            "Stored onboarding profile"
        );
        Ok(stored)
    }

    /// Change the deficit intensity and recompute stats from the stored profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile.
    pub async fn update_deficit(
        &self,
        user_id: Uuid,
        deficit: DeficitIntensity,
    ) -> AppResult<StoredProfile> {
        let _guard = self.lock_user(user_id).await;
        let mut stored = self.require_profile(user_id).await?;
        stored.stats = calculator::compute_stats(&stored.profile, deficit)?;
        stored.deficit = deficit;
        stored.updated_at = Utc::now();
        self.database.upsert_profile(&stored).await?;
        Ok(stored)
    }

    /// Fetch the stored profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<StoredProfile> {
        self.require_profile(user_id).await
    }

    /// Remove the profile and both plans
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        if self.database.delete_user_data(user_id).await? {
            info!(user.id = %user_id, "Deleted user data");
            Ok(())
        } else {
            Err(AppError::not_found("Profile").with_resource_id(user_id.to_string()))
        }
    }

    /// Generate (or replace) the weekly diet plan for the current stats
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile, `ExternalServiceUnavailable`
    /// when plan generation is not configured, or the generator's error.
    pub async fn generate_diet_plan(&self, user_id: Uuid) -> AppResult<DietPlan> {
        let generator = self.generator()?;
        let _guard = self.lock_user(user_id).await;
        let stored = self.require_profile(user_id).await?;

        let result = generator
            .generate_diet_plan(&stored.profile, &stored.stats)
            .await;
        AppLogger::log_plan_generation(&user_id.to_string(), "diet", "week", result.is_ok());
        let plan = result?;

        self.database.save_diet_plan(user_id, &plan).await?;
        Ok(plan)
    }

    /// Fetch the stored diet plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no diet plan has been generated.
    pub async fn get_diet_plan(&self, user_id: Uuid) -> AppResult<DietPlan> {
        self.database
            .get_diet_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Diet plan").with_resource_id(user_id.to_string()))
    }

    /// Replace one meal of the stored diet plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile, `ResourceUnavailable`
    /// when no diet plan exists yet, or the generator's error.
    pub async fn regenerate_meal(
        &self,
        user_id: Uuid,
        day: DayOfWeek,
        meal_type: MealType,
    ) -> AppResult<DietPlan> {
        let generator = self.generator()?;
        let _guard = self.lock_user(user_id).await;
        let stored = self.require_profile(user_id).await?;
        let plan = self.database.get_diet_plan(user_id).await?.ok_or_else(|| {
            AppError::unavailable("Generate a diet plan before regenerating a meal")
        })?;

        let result = generator
            .regenerate_meal(&plan, day, meal_type, &stored.profile, &stored.stats)
            .await;
        AppLogger::log_plan_generation(
            &user_id.to_string(),
            "diet",
            &format!("{day}/{meal_type}"),
            result.is_ok(),
        );
        let updated = result?;

        self.database.save_diet_plan(user_id, &updated).await?;
        Ok(updated)
    }

    /// Generate (or replace) the weekly workout plan
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for unsupported preferences, `ResourceNotFound`
    /// without a profile, or the generator's error.
    pub async fn generate_workout_plan(
        &self,
        user_id: Uuid,
        preferences: WorkoutPreferences,
    ) -> AppResult<WorkoutPlan> {
        preferences.validate()?;
        let generator = self.generator()?;
        let _guard = self.lock_user(user_id).await;
        let stored = self.require_profile(user_id).await?;

        let result = generator
            .generate_workout_plan(&stored.profile, &preferences)
            .await;
        AppLogger::log_plan_generation(&user_id.to_string(), "workout", "week", result.is_ok());
        let plan = result?;

        self.database.save_workout_plan(user_id, &plan).await?;
        Ok(plan)
    }

    /// Fetch the stored workout plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no workout plan has been generated.
    pub async fn get_workout_plan(&self, user_id: Uuid) -> AppResult<WorkoutPlan> {
        self.database
            .get_workout_plan(user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Workout plan").with_resource_id(user_id.to_string())
            })
    }

    /// Replace one day of the stored workout plan using its saved preferences
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile, `ResourceUnavailable`
    /// when no workout plan exists yet, or the generator's error.
    pub async fn regenerate_workout_day(
        &self,
        user_id: Uuid,
        day: DayOfWeek,
    ) -> AppResult<WorkoutPlan> {
        let generator = self.generator()?;
        let _guard = self.lock_user(user_id).await;
        let stored = self.require_profile(user_id).await?;
        let plan = self.database.get_workout_plan(user_id).await?.ok_or_else(|| {
            AppError::unavailable("Generate a workout plan before regenerating a day")
        })?;

        let result = generator
            .regenerate_workout_day(&plan, day, &stored.profile, &plan.preferences)
            .await;
        AppLogger::log_plan_generation(
            &user_id.to_string(),
            "workout",
            day.as_str(),
            result.is_ok(),
        );
        let updated = result?;

        self.database.save_workout_plan(user_id, &updated).await?;
        Ok(updated)
    }

    /// Profile, plans, and whether the diet plan still matches the stats
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile.
    pub async fn summary(&self, user_id: Uuid) -> AppResult<OnboardingSummary> {
        let profile = self.require_profile(user_id).await?;
        let diet_plan = self.database.get_diet_plan(user_id).await?;
        let workout_plan = self.database.get_workout_plan(user_id).await?;

        let diet_plan_stale = diet_plan
            .as_ref()
            .is_some_and(|plan| plan.target_calories != profile.stats.target_calories);

        Ok(OnboardingSummary {
            profile,
            diet_plan,
            workout_plan,
            diet_plan_stale,
        })
    }
}
