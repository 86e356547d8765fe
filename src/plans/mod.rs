// ABOUTME: Generates weekly diet and workout plans through an LLM provider
// ABOUTME: Builds prompts from profile and stats, parses output, and replaces single entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation
//!
//! [`PlanGenerator`] turns a biometric profile and its calorie stats into a
//! seven-day diet plan, and a profile plus workout preferences into a seven-day
//! workout plan. Single meals and single workout days can be regenerated
//! without touching the rest of the plan.

/// Model output parsing and validation
pub mod parser;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::{
    self, DIET_PLAN_TEMPLATE, PLANNER_SYSTEM_PROMPT, REGENERATE_MEAL_TEMPLATE,
    REGENERATE_WORKOUT_DAY_TEMPLATE, WORKOUT_PLAN_TEMPLATE,
};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{
    BiometricProfile, CalculatedStats, DayOfWeek, DietPlan, MealType, WorkoutPlan,
    WorkoutPreferences,
};

/// Sampling settings applied to every plan request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let config = LlmConfig::default();
        Self {
            model: None,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: Some(config.model.clone()),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Produces diet and workout plans from an LLM provider
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn LlmProvider>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    /// Create a generator over `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether the provider answers its health check
    pub async fn provider_healthy(&self) -> bool {
        match self.provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Plan provider health check failed");
                false
            }
        }
    }

    /// Generate a seven-day diet plan sized to `stats.target_calories`
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the call fails, or `ExternalServiceError`
    /// if the output is not a valid week of meals.
    pub async fn generate_diet_plan(
        &self,
        profile: &BiometricProfile,
        stats: &CalculatedStats,
    ) -> AppResult<DietPlan> {
        let mut values = profile_values(profile);
        values.extend(stats_values(stats));
        let prompt = prompts::render(DIET_PLAN_TEMPLATE, &values);

        let output = self.ask(prompt).await?;
        let days = parser::parse_diet_days(&output)?;

        let now = Utc::now();
        let plan = DietPlan {
            target_calories: stats.target_calories,
            days,
            generated_at: now,
            updated_at: now,
        };
        info!(
            target_calories = plan.target_calories,
            average_calories = plan.average_daily_calories(),
            "Generated diet plan"
        );
        Ok(plan)
    }

    /// Replace one meal of `plan`, leaving every other meal untouched
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if `plan` has no such day or meal, otherwise
    /// the same conditions as [`Self::generate_diet_plan`].
    pub async fn regenerate_meal(
        &self,
        plan: &DietPlan,
        day: DayOfWeek,
        meal_type: MealType,
        profile: &BiometricProfile,
        stats: &CalculatedStats,
    ) -> AppResult<DietPlan> {
        let diet_day = plan
            .day(day)
            .ok_or_else(|| AppError::not_found(format!("Diet plan day '{day}'")))?;
        let current = diet_day
            .meal(meal_type)
            .ok_or_else(|| AppError::not_found(format!("{meal_type} on {day}")))?;

        let other_meals = diet_day
            .meals
            .iter()
            .filter(|meal| meal.meal_type != meal_type)
            .map(|meal| format!("{} ({}, {} kcal)", meal.name, meal.meal_type, meal.calories))
            .collect::<Vec<_>>()
            .join("; ");

        let mut values = profile_values(profile);
        values.extend(stats_values(stats));
        values.extend([
            ("day", day.to_string()),
            ("meal_type", meal_type.to_string()),
            ("current_meal", current.name.clone()),
            ("current_calories", current.calories.to_string()),
            ("other_meals", non_empty_or(other_meals, "none")),
        ]);
        let prompt = prompts::render(REGENERATE_MEAL_TEMPLATE, &values);

        let output = self.ask(prompt).await?;
        let replacement = parser::parse_meal(&output, meal_type)?;

        let mut updated = plan.clone();
        if let Some(slot) = updated
            .days
            .iter_mut()
            .find(|entry| entry.day == day)
            .and_then(|entry| entry.meals.iter_mut().find(|meal| meal.meal_type == meal_type))
        {
            *slot = replacement;
        }
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    /// Generate a seven-day workout plan
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for unsupported preferences, the provider's
    /// error if the call fails, or `ExternalServiceError` if the output is not
    /// a valid week of workouts.
    pub async fn generate_workout_plan(
        &self,
        profile: &BiometricProfile,
        preferences: &WorkoutPreferences,
    ) -> AppResult<WorkoutPlan> {
        preferences.validate()?;

        let mut values = profile_values(profile);
        values.extend(preference_values(preferences));
        let prompt = prompts::render(WORKOUT_PLAN_TEMPLATE, &values);

        let output = self.ask(prompt).await?;
        let days = parser::parse_workout_days(&output)?;

        let now = Utc::now();
        let plan = WorkoutPlan {
            preferences: preferences.clone(),
            days,
            generated_at: now,
            updated_at: now,
        };
        if plan.training_days() != usize::from(preferences.days_per_week) {
            warn!(
                requested = preferences.days_per_week,
                generated = plan.training_days(),
                "Workout plan training days differ from preferences"
            );
        }
        Ok(plan)
    }

    /// Replace one day of `plan`, leaving every other day untouched
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if `plan` has no such day, otherwise the same
    /// conditions as [`Self::generate_workout_plan`].
    pub async fn regenerate_workout_day(
        &self,
        plan: &WorkoutPlan,
        day: DayOfWeek,
        profile: &BiometricProfile,
        preferences: &WorkoutPreferences,
    ) -> AppResult<WorkoutPlan> {
        let current = plan
            .day(day)
            .ok_or_else(|| AppError::not_found(format!("Workout plan day '{day}'")))?;

        let other_days = plan
            .days
            .iter()
            .filter(|entry| entry.day != day)
            .map(|entry| format!("{}: {}", entry.day, entry.title))
            .collect::<Vec<_>>()
            .join("; ");

        let mut values = profile_values(profile);
        values.extend(preference_values(preferences));
        values.extend([
            ("day", day.to_string()),
            ("current_title", current.title.clone()),
            ("rest_day", current.rest_day.to_string()),
            ("other_days", non_empty_or(other_days, "none")),
        ]);
        let prompt = prompts::render(REGENERATE_WORKOUT_DAY_TEMPLATE, &values);

        let output = self.ask(prompt).await?;
        let replacement = parser::parse_workout_day(&output, day)?;

        let mut updated = plan.clone();
        if let Some(slot) = updated.days.iter_mut().find(|entry| entry.day == day) {
            *slot = replacement;
        }
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    /// Send one prompt and return the raw text
    async fn ask(&self, prompt: String) -> AppResult<String> {
        let mut request = ChatRequest::new(vec![
            ChatMessage::system(PLANNER_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_output_tokens);
        if let Some(model) = &self.settings.model {
            request = request.with_model(model.clone());
        }
        if self.provider.capabilities().supports_json_mode() {
            request = request.with_json_response();
        }

        let model = self
            .settings
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_owned());
        let started = Instant::now();
        let result = self.provider.complete(&request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_llm_call(self.provider.name(), &model, result.is_ok(), elapsed_ms);

        Ok(result?.content)
    }
}

fn profile_values(profile: &BiometricProfile) -> Vec<(&'static str, String)> {
    vec![
        ("sex", profile.sex.to_string()),
        ("age", profile.age.to_string()),
        ("weight_kg", format!("{:.1}", profile.weight_kg)),
        ("height_cm", format!("{:.1}", profile.height_cm)),
        ("activity_level", profile.activity_level.to_string()),
    ]
}

fn stats_values(stats: &CalculatedStats) -> Vec<(&'static str, String)> {
    vec![
        ("bmr", stats.bmr.to_string()),
        ("tdee", stats.tdee.to_string()),
        ("target_calories", stats.target_calories.to_string()),
    ]
}

fn preference_values(preferences: &WorkoutPreferences) -> Vec<(&'static str, String)> {
    vec![
        ("days_per_week", preferences.days_per_week.to_string()),
        ("session_minutes", preferences.session_minutes.to_string()),
        ("equipment", preferences.equipment.describe().to_owned()),
        ("focus", preferences.focus.describe().to_owned()),
        ("experience", preferences.experience.as_str().to_owned()),
    ]
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}
