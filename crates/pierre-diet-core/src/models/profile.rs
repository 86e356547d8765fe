// ABOUTME: Biometric profile, activity tiers, deficit intensity, and calculated stats
// ABOUTME: Closed enumerations keep invalid sexes, tiers, and intensities unrepresentable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{activity_factors, deficit, profile_limits, DAYS_PER_WEEK};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (+5 kcal constant)
    Male,
    /// Female (-161 kcal constant)
    Female,
}

impl Sex {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unknown sex '{other}', expected male or female"
            ))),
        }
    }
}

/// Activity level for TDEE calculation, ordered from least to most active
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

impl ActivityLevel {
    /// Every tier in ascending order
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// TDEE multiplier applied to BMR
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => activity_factors::SEDENTARY,
            Self::LightlyActive => activity_factors::LIGHTLY_ACTIVE,
            Self::ModeratelyActive => activity_factors::MODERATELY_ACTIVE,
            Self::VeryActive => activity_factors::VERY_ACTIVE,
            Self::ExtraActive => activity_factors::EXTRA_ACTIVE,
        }
    }

    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Unknown activity level '{s}', expected one of: sedentary, lightly_active, \
                     moderately_active, very_active, extra_active"
                ))
            })
    }
}

/// How far below TDEE the daily calorie target sits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeficitIntensity {
    /// 10% below TDEE
    Light,
    /// 20% below TDEE
    #[default]
    Moderate,
    /// 30% below TDEE
    Aggressive,
}

impl DeficitIntensity {
    /// Every intensity from gentlest to steepest
    pub const ALL: [Self; 3] = [Self::Light, Self::Moderate, Self::Aggressive];

    /// Fraction of TDEE removed from the daily target
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        match self {
            Self::Light => deficit::LIGHT,
            Self::Moderate => deficit::MODERATE,
            Self::Aggressive => deficit::AGGRESSIVE,
        }
    }

    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for DeficitIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeficitIntensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(AppError::invalid_input(format!(
                "Unknown deficit intensity '{other}', expected light, moderate or aggressive"
            ))),
        }
    }
}

/// Biometric inputs collected during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    /// Biological sex
    pub sex: Sex,
    /// Age in years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Habitual activity tier
    pub activity_level: ActivityLevel,
    /// Weight the user wants to lose, in kilograms
    #[serde(default)]
    pub target_weight_loss_kg: f64,
}

impl BiometricProfile {
    /// Check the profile can be fed to the calculator
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when weight, height or age is not positive, when the
    /// target weight loss is negative, or when any number is not finite.
    /// Returns `ValueOutOfRange` when a positive value lies outside
    /// [`profile_limits`] or the target loss is not below the body weight.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(AppError::invalid_input("Weight must be a positive number of kg")
                .with_details(field_details("weight_kg", self.weight_kg)));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(AppError::invalid_input("Height must be a positive number of cm")
                .with_details(field_details("height_cm", self.height_cm)));
        }
        if self.age == 0 {
            return Err(AppError::invalid_input("Age must be a positive number of years")
                .with_details(field_details("age", self.age)));
        }
        if !self.target_weight_loss_kg.is_finite() || self.target_weight_loss_kg < 0.0 {
            return Err(AppError::invalid_input("Target weight loss cannot be negative")
                .with_details(field_details("target_weight_loss_kg", self.target_weight_loss_kg)));
        }

        if !(profile_limits::MIN_WEIGHT_KG..=profile_limits::MAX_WEIGHT_KG)
            .contains(&self.weight_kg)
        {
            return Err(out_of_range(
                "weight_kg",
                self.weight_kg,
                profile_limits::MIN_WEIGHT_KG,
                profile_limits::MAX_WEIGHT_KG,
            ));
        }
        if !(profile_limits::MIN_HEIGHT_CM..=profile_limits::MAX_HEIGHT_CM)
            .contains(&self.height_cm)
        {
            return Err(out_of_range(
                "height_cm",
                self.height_cm,
                profile_limits::MIN_HEIGHT_CM,
                profile_limits::MAX_HEIGHT_CM,
            ));
        }
        if self.age > profile_limits::MAX_AGE_YEARS {
            return Err(out_of_range(
                "age",
                self.age,
                1,
                profile_limits::MAX_AGE_YEARS,
            ));
        }
        if self.target_weight_loss_kg >= self.weight_kg {
            return Err(AppError::value_out_of_range(format!(
                "Target weight loss ({} kg) must be below body weight ({} kg)",
                self.target_weight_loss_kg, self.weight_kg
            ))
            .with_details(field_details(
                "target_weight_loss_kg",
                self.target_weight_loss_kg,
            )));
        }
        Ok(())
    }
}

fn field_details<T: Serialize + Copy>(field: &str, value: T) -> serde_json::Value {
    serde_json::json!({ "field": field, "value": value })
}

fn out_of_range<T>(field: &str, value: T, min: T, max: T) -> AppError
where
    T: Serialize + fmt::Display + Copy,
{
    AppError::value_out_of_range(format!("{field} must be between {min} and {max}, got {value}"))
        .with_details(serde_json::json!({
            "field": field,
            "value": value,
            "min": min,
            "max": max
        }))
}

/// Derived calorie figures for a profile and deficit intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedStats {
    /// Basal metabolic rate (kcal/day)
    pub bmr: u32,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: u32,
    /// Daily calorie target (kcal/day)
    pub target_calories: u32,
    /// Estimated weeks to reach the target weight loss
    pub weeks_to_goal: u32,
}

impl CalculatedStats {
    /// Calories removed from TDEE each day
    #[must_use]
    pub const fn daily_deficit(&self) -> u32 {
        self.tdee.saturating_sub(self.target_calories)
    }

    /// Calories removed from TDEE each week
    #[must_use]
    pub const fn weekly_deficit(&self) -> u32 {
        self.daily_deficit().saturating_mul(DAYS_PER_WEEK)
    }
}
