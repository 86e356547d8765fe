// ABOUTME: Physiological constants for the metabolic calculator and plan validation
// ABOUTME: Mifflin-St Jeor coefficients, activity multipliers, deficit fractions, plan limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Mifflin-St Jeor equation coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting
/// energy expenditure. *American Journal of Clinical Nutrition*, 51(2), 241-247.
pub mod mifflin_st_jeor {
    /// kcal per kg of body weight
    pub const WEIGHT_COEF: f64 = 10.0;
    /// kcal per cm of height
    pub const HEIGHT_COEF: f64 = 6.25;
    /// kcal per year of age (subtracted)
    pub const AGE_COEF: f64 = 5.0;
    /// Male constant
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// TDEE activity multipliers (`McArdle` et al., Exercise Physiology)
pub mod activity_factors {
    /// Little or no exercise
    pub const SEDENTARY: f64 = 1.2;
    /// Light exercise 1-3 days/week
    pub const LIGHTLY_ACTIVE: f64 = 1.375;
    /// Moderate exercise 3-5 days/week
    pub const MODERATELY_ACTIVE: f64 = 1.55;
    /// Hard exercise 6-7 days/week
    pub const VERY_ACTIVE: f64 = 1.725;
    /// Hard training twice a day or physical job
    pub const EXTRA_ACTIVE: f64 = 1.9;
}

/// Daily calorie deficit fractions below TDEE
pub mod deficit {
    /// Light deficit (10%)
    pub const LIGHT: f64 = 0.10;
    /// Moderate deficit (20%)
    pub const MODERATE: f64 = 0.20;
    /// Aggressive deficit (30%)
    pub const AGGRESSIVE: f64 = 0.30;
}

/// Energy stored in one kilogram of body fat (kcal)
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Floor for the weekly deficit used as a divisor
pub const MIN_WEEKLY_DEFICIT_KCAL: f64 = 1.0;

/// Days in the week
pub const DAYS_PER_WEEK: u32 = 7;

/// Plausible adult ranges accepted by the calculator
///
/// Within these ranges the female BMR floor is 64 kcal/day, which keeps every
/// deficit tier strictly below TDEE after rounding.
pub mod profile_limits {
    /// Lightest accepted body weight (kg)
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Heaviest accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 400.0;
    /// Shortest accepted height (cm)
    pub const MIN_HEIGHT_CM: f64 = 100.0;
    /// Tallest accepted height (cm)
    pub const MAX_HEIGHT_CM: f64 = 250.0;
    /// Oldest accepted age (years)
    pub const MAX_AGE_YEARS: u32 = 120;
}

/// Workout preference bounds
pub mod workout_limits {
    /// Minimum training days per week
    pub const MIN_DAYS_PER_WEEK: u8 = 1;
    /// Maximum training days per week
    pub const MAX_DAYS_PER_WEEK: u8 = 7;
    /// Minimum session length (minutes)
    pub const MIN_SESSION_MINUTES: u16 = 10;
    /// Maximum session length (minutes)
    pub const MAX_SESSION_MINUTES: u16 = 180;
}
