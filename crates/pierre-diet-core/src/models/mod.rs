// ABOUTME: Domain models for onboarding profiles and generated plans
// ABOUTME: Re-exports profile, stats, diet plan, and workout plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod plan;
mod profile;

pub use plan::{
    DayOfWeek, DietDay, DietPlan, Equipment, Exercise, ExperienceLevel, Meal, MealType,
    WorkoutDay, WorkoutFocus, WorkoutPlan, WorkoutPreferences,
};
pub use profile::{ActivityLevel, BiometricProfile, CalculatedStats, DeficitIntensity, Sex};
