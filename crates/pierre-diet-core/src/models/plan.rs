// ABOUTME: Weekly diet and workout plan models produced by the plan generator
// ABOUTME: Days, meals, exercises, and workout preferences with validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::workout_limits;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a plan entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl DayOfWeek {
    /// Week order, Monday first
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == normalized || day.as_str()[..3] == normalized)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown day of week '{s}'")))
    }
}

/// Slot a meal occupies within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Every meal slot in serving order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" | "snacks" => Ok(Self::Snack),
            other => Err(AppError::invalid_input(format!("Unknown meal type '{other}'"))),
        }
    }
}

/// A single meal in a diet plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Slot within the day
    pub meal_type: MealType,
    /// Dish name
    pub name: String,
    /// Short preparation notes
    pub description: String,
    /// Energy (kcal)
    pub calories: u32,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carbs_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
    /// Ingredient list
    pub ingredients: Vec<String>,
}

/// Meals for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietDay {
    /// Day this entry covers
    pub day: DayOfWeek,
    /// Meals in serving order
    pub meals: Vec<Meal>,
}

impl DietDay {
    /// Sum of meal calories
    #[must_use]
    pub fn total_calories(&self) -> u32 {
        self.meals.iter().map(|meal| meal.calories).sum()
    }

    /// Find the meal occupying a slot
    #[must_use]
    pub fn meal(&self, meal_type: MealType) -> Option<&Meal> {
        self.meals.iter().find(|meal| meal.meal_type == meal_type)
    }
}

/// A weekly diet plan sized to a calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    /// Daily calorie target the plan was generated for
    pub target_calories: u32,
    /// Seven days, Monday first
    pub days: Vec<DietDay>,
    /// When the plan was first generated
    pub generated_at: DateTime<Utc>,
    /// When any part of the plan last changed
    pub updated_at: DateTime<Utc>,
}

impl DietPlan {
    /// Look up a day
    #[must_use]
    pub fn day(&self, day: DayOfWeek) -> Option<&DietDay> {
        self.days.iter().find(|entry| entry.day == day)
    }

    /// Average daily calories across the week
    #[must_use]
    pub fn average_daily_calories(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        let total: u32 = self.days.iter().map(DietDay::total_calories).sum();
        f64::from(total) / self.days.len() as f64
    }
}

/// Equipment available for workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Bodyweight only
    #[default]
    Bodyweight,
    /// Dumbbells at home
    Dumbbells,
    /// Full commercial gym
    FullGym,
}

impl Equipment {
    /// Wording used in prompts
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Bodyweight => "bodyweight only, no equipment",
            Self::Dumbbells => "a pair of adjustable dumbbells",
            Self::FullGym => "a fully equipped gym",
        }
    }
}

/// Primary goal of the training plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutFocus {
    /// Maximise energy expenditure
    #[default]
    FatLoss,
    /// Build strength
    Strength,
    /// Build aerobic endurance
    Endurance,
    /// General fitness
    General,
}

impl WorkoutFocus {
    /// Wording used in prompts
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat loss while preserving muscle",
            Self::Strength => "strength development",
            Self::Endurance => "cardiovascular endurance",
            Self::General => "general fitness",
        }
    }
}

/// Training experience
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than six months of training
    #[default]
    Beginner,
    /// Six months to two years
    Intermediate,
    /// More than two years
    Advanced,
}

impl ExperienceLevel {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Workout configuration supplied by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPreferences {
    /// Training days per week
    pub days_per_week: u8,
    /// Target session length in minutes
    pub session_minutes: u16,
    /// Available equipment
    #[serde(default)]
    pub equipment: Equipment,
    /// Primary focus
    #[serde(default)]
    pub focus: WorkoutFocus,
    /// Training experience
    #[serde(default)]
    pub experience: ExperienceLevel,
}

impl WorkoutPreferences {
    /// Check preferences are within supported bounds
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when days per week or session length fall outside
    /// the supported range.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(workout_limits::MIN_DAYS_PER_WEEK..=workout_limits::MAX_DAYS_PER_WEEK)
            .contains(&self.days_per_week)
        {
            return Err(AppError::value_out_of_range(format!(
                "days_per_week must be between {} and {}, got {}",
                workout_limits::MIN_DAYS_PER_WEEK,
                workout_limits::MAX_DAYS_PER_WEEK,
                self.days_per_week
            )));
        }
        if !(workout_limits::MIN_SESSION_MINUTES..=workout_limits::MAX_SESSION_MINUTES)
            .contains(&self.session_minutes)
        {
            return Err(AppError::value_out_of_range(format!(
                "session_minutes must be between {} and {}, got {}",
                workout_limits::MIN_SESSION_MINUTES,
                workout_limits::MAX_SESSION_MINUTES,
                self.session_minutes
            )));
        }
        Ok(())
    }
}

/// One exercise prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u8,
    /// Repetitions or duration per set, e.g. "8-12" or "45s"
    pub reps: String,
    /// Rest between sets in seconds
    pub rest_seconds: u16,
    /// Coaching cues
    pub notes: Option<String>,
}

/// Training (or rest) for one day of the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Day this entry covers
    pub day: DayOfWeek,
    /// Session title, e.g. "Lower body"
    pub title: String,
    /// Whether the day is a rest day
    pub rest_day: bool,
    /// Exercises in order, empty on rest days
    pub exercises: Vec<Exercise>,
}

/// A weekly workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Preferences the plan was generated for
    pub preferences: WorkoutPreferences,
    /// Seven days, Monday first
    pub days: Vec<WorkoutDay>,
    /// When the plan was first generated
    pub generated_at: DateTime<Utc>,
    /// When any part of the plan last changed
    pub updated_at: DateTime<Utc>,
}

impl WorkoutPlan {
    /// Look up a day
    #[must_use]
    pub fn day(&self, day: DayOfWeek) -> Option<&WorkoutDay> {
        self.days.iter().find(|entry| entry.day == day)
    }

    /// Number of non-rest days
    #[must_use]
    pub fn training_days(&self) -> usize {
        self.days.iter().filter(|day| !day.rest_day).count()
    }
}
