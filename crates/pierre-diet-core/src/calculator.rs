// ABOUTME: Metabolic calculator computing BMR, TDEE, calorie target, and weeks to goal
// ABOUTME: Deterministic Mifflin-St Jeor pipeline with eager input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metabolic Calculator
//!
//! Stateless transformation from a [`BiometricProfile`] and a [`DeficitIntensity`]
//! to [`CalculatedStats`]:
//!
//! 1. BMR via Mifflin-St Jeor, rounded to whole kcal
//! 2. TDEE = round(BMR x activity multiplier)
//! 3. target = round(TDEE x (1 - deficit fraction))
//! 4. weeks to goal = ceil(target loss x 7700 / max(weekly deficit, 1))
//!
//! Inputs are validated against plausible adult ranges before any arithmetic,
//! so the result is never NaN, never saturates, and always keeps the target
//! strictly below TDEE. Calling [`compute_stats`] twice with the same inputs yields the
//! same output.
//!
//! # Reference
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//! expenditure. *American Journal of Clinical Nutrition*, 51(2), 241-247.
//! <https://doi.org/10.1093/ajcn/51.2.241>

use crate::constants::{mifflin_st_jeor, DAYS_PER_WEEK, KCAL_PER_KG_FAT, MIN_WEEKLY_DEFICIT_KCAL};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, BiometricProfile, CalculatedStats, DeficitIntensity, Sex};

/// Compute calorie stats for a profile under a deficit intensity
///
/// # Errors
///
/// Returns `InvalidInput` or `ValueOutOfRange` when the profile fails
/// [`BiometricProfile::validate`], and `ValueOutOfRange` when the rounded
/// target is not strictly below TDEE.
pub fn compute_stats(
    profile: &BiometricProfile,
    deficit: DeficitIntensity,
) -> AppResult<CalculatedStats> {
    profile.validate()?;

    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.sex,
    );
    let bmr = round_kcal(bmr);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let target_calories = calculate_target_calories(tdee, deficit);
    if target_calories >= tdee {
        return Err(AppError::value_out_of_range(format!(
            "Profile yields no calorie deficit (target {target_calories} >= TDEE {tdee} kcal/day)"
        ))
        .with_details(serde_json::json!({ "bmr": bmr, "tdee": tdee })));
    }
    let weeks_to_goal = calculate_weeks_to_goal(
        profile.target_weight_loss_kg,
        tdee,
        target_calories,
    );

    tracing::trace!(
        bmr,
        tdee,
        target_calories,
        weeks_to_goal,
        deficit = %deficit,
        "Computed metabolic stats"
    );

    Ok(CalculatedStats {
        bmr,
        tdee,
        target_calories,
        weeks_to_goal,
    })
}

/// Compute stats for every deficit intensity, gentlest first
///
/// # Errors
///
/// Same conditions as [`compute_stats`].
pub fn compare_deficits(
    profile: &BiometricProfile,
) -> AppResult<Vec<(DeficitIntensity, CalculatedStats)>> {
    DeficitIntensity::ALL
        .into_iter()
        .map(|deficit| compute_stats(profile, deficit).map(|stats| (deficit, stats)))
        .collect()
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day (unrounded)
///
/// Formula: BMR = 10 x `weight_kg` + 6.25 x `height_cm` - 5 x age + s,
/// where s = +5 for men and -161 for women.
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let base = mifflin_st_jeor::WEIGHT_COEF * weight_kg + mifflin_st_jeor::HEIGHT_COEF * height_cm
        - mifflin_st_jeor::AGE_COEF * f64::from(age);

    match sex {
        Sex::Male => base + mifflin_st_jeor::MALE_CONSTANT,
        Sex::Female => base + mifflin_st_jeor::FEMALE_CONSTANT,
    }
}

/// Total daily energy expenditure from a rounded BMR
#[must_use]
pub fn calculate_tdee(bmr: u32, activity_level: ActivityLevel) -> u32 {
    round_kcal(f64::from(bmr) * activity_level.multiplier())
}

/// Daily calorie target below TDEE
#[must_use]
pub fn calculate_target_calories(tdee: u32, deficit: DeficitIntensity) -> u32 {
    round_kcal(f64::from(tdee) * (1.0 - deficit.fraction()))
}

/// Weeks needed to lose `target_weight_loss_kg` at the given daily deficit
///
/// Returns 0 when there is nothing to lose. The weekly deficit is floored at
/// 1 kcal so an empty deficit cannot divide by zero.
#[must_use]
pub fn calculate_weeks_to_goal(target_weight_loss_kg: f64, tdee: u32, target_calories: u32) -> u32 {
    if target_weight_loss_kg <= 0.0 {
        return 0;
    }

    let weekly_deficit = f64::from(tdee.saturating_sub(target_calories).saturating_mul(DAYS_PER_WEEK));
    let weeks = (target_weight_loss_kg * KCAL_PER_KG_FAT) / weekly_deficit.max(MIN_WEEKLY_DEFICIT_KCAL);

    // Safe: weeks is finite and non-negative after validation; `as` saturates at u32::MAX
    weeks.ceil() as u32
}

/// Round half away from zero and clamp into `u32`
fn round_kcal(value: f64) -> u32 {
    // Safe: callers pass finite values; negative values clamp to 0
    value.round().max(0.0) as u32
}
