// ABOUTME: Parses and validates model output into diet and workout plan structures
// ABOUTME: Tolerates code fences, surrounding prose, float numbers, and field aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Output Parser
//!
//! Model output is loosely structured. This module extracts the JSON document,
//! maps it onto lenient raw shapes, then converts and validates into the strict
//! domain types:
//!
//! - every day of the week appears exactly once, normalised to week order
//! - every diet day has at least one meal
//! - every training day has at least one exercise
//! - numbers are finite and non-negative; integral fields are rounded

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::constants::service_names;
use crate::errors::AppError;
use crate::models::{DayOfWeek, DietDay, Exercise, Meal, MealType, WorkoutDay};

/// Reasons model output could not be turned into a plan
#[derive(Debug, Error)]
pub enum PlanParseError {
    /// No JSON document found in the output
    #[error("no JSON document found in model output")]
    NoJson,

    /// JSON was found but does not match the expected shape
    #[error("malformed plan JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Required container is absent
    #[error("missing '{0}' in model output")]
    MissingField(&'static str),

    /// Unrecognised day name
    #[error("unknown day '{0}'")]
    InvalidDay(String),

    /// Unrecognised meal type
    #[error("unknown meal type '{0}'")]
    InvalidMealType(String),

    /// A day appears more than once
    #[error("day '{0}' appears more than once")]
    DuplicateDay(DayOfWeek),

    /// Some days are missing
    #[error("plan is missing days: {0}")]
    MissingDays(String),

    /// Diet day without meals, or training day without exercises
    #[error("day '{0}' has no entries")]
    EmptyDay(DayOfWeek),

    /// A number is negative, non-finite, or too large
    #[error("invalid value {value} for '{field}'")]
    InvalidNumber {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A text field is blank
    #[error("'{0}' must not be empty")]
    BlankField(&'static str),

    /// Replacement meal has the wrong slot
    #[error("expected a {expected} meal, got {found}")]
    WrongMealType {
        /// Requested slot
        expected: MealType,
        /// Returned slot
        found: MealType,
    },

    /// Replacement day is for another day
    #[error("expected {expected}, got {found}")]
    WrongDay {
        /// Requested day
        expected: DayOfWeek,
        /// Returned day
        found: DayOfWeek,
    },
}

impl From<PlanParseError> for AppError {
    fn from(err: PlanParseError) -> Self {
        Self::external_service(
            service_names::PLAN_GENERATOR,
            format!("model returned an unusable plan ({err})"),
        )
    }
}

type ParseResult<T> = Result<T, PlanParseError>;

/// Number accepting JSON numbers or numeric strings such as `"420"` or `"30 g"`
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) => {
            let trimmed = s.trim().trim_end_matches(|c: char| c.is_alphabetic() || c == ' ');
            trimmed
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("not a number: '{s}'")))
        }
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!("not a number: {other}"))),
    }
}

/// Reps may come back as a number or a string
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("not text: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
struct RawMeal {
    #[serde(alias = "type", alias = "meal", alias = "slot")]
    meal_type: String,
    #[serde(alias = "title", alias = "dish")]
    name: String,
    #[serde(default, alias = "notes", alias = "instructions")]
    description: String,
    #[serde(alias = "kcal", alias = "energy_kcal", deserialize_with = "lenient_number")]
    calories: f64,
    #[serde(default, alias = "protein", deserialize_with = "lenient_number")]
    protein_g: f64,
    #[serde(
        default,
        alias = "carbs",
        alias = "carbohydrates_g",
        deserialize_with = "lenient_number"
    )]
    carbs_g: f64,
    #[serde(default, alias = "fat", deserialize_with = "lenient_number")]
    fat_g: f64,
    #[serde(default)]
    ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDietDay {
    #[serde(alias = "day_of_week", alias = "weekday")]
    day: String,
    #[serde(default)]
    meals: Vec<RawMeal>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    #[serde(alias = "exercise")]
    name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    sets: f64,
    #[serde(default, alias = "repetitions", alias = "duration", deserialize_with = "lenient_text")]
    reps: String,
    #[serde(default, alias = "rest", alias = "rest_s", deserialize_with = "lenient_number")]
    rest_seconds: f64,
    #[serde(default, alias = "cues")]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawWorkoutDay {
    #[serde(alias = "day_of_week", alias = "weekday")]
    day: String,
    #[serde(default, alias = "name", alias = "focus")]
    title: String,
    #[serde(default, alias = "is_rest_day", alias = "rest")]
    rest_day: bool,
    #[serde(default)]
    exercises: Vec<RawExercise>,
}

/// Locate the JSON document inside model output
///
/// Accepts a bare document, one wrapped in markdown fences, or one surrounded
/// by prose.
///
/// # Errors
///
/// Returns [`PlanParseError::NoJson`] if nothing parseable is found.
pub fn extract_json(output: &str) -> ParseResult<Value> {
    let trimmed = output.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let Some(fenced) = strip_code_fence(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced) {
            return Ok(value);
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }

    Err(PlanParseError::NoJson)
}

/// Body of the first ```` ``` ```` fenced block, without the language tag
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Find the array of days, either top-level or under a known wrapper key
fn days_array(value: Value) -> ParseResult<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => {
            if let Some(days) = map.remove("days") {
                return Ok(days);
            }
            for wrapper in ["plan", "diet_plan", "workout_plan", "week"] {
                if let Some(inner) = map.remove(wrapper) {
                    return days_array(inner);
                }
            }
            Err(PlanParseError::MissingField("days"))
        }
        _ => Err(PlanParseError::MissingField("days")),
    }
}

/// Unwrap a single object that may be nested under `key`
///
/// A non-object value under `key` is an ordinary field of the flat object.
fn single_object(value: Value, key: &'static str) -> ParseResult<Value> {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => Ok(inner),
            Some(scalar) => {
                map.insert(key.to_owned(), scalar);
                Ok(Value::Object(map))
            }
            None => Ok(Value::Object(map)),
        },
        Value::Array(mut items) if items.len() == 1 => Ok(items.remove(0)),
        _ => Err(PlanParseError::MissingField(key)),
    }
}

fn parse_day(raw: &str) -> ParseResult<DayOfWeek> {
    DayOfWeek::from_str(raw).map_err(|_| PlanParseError::InvalidDay(raw.to_owned()))
}

fn parse_meal_type(raw: &str) -> ParseResult<MealType> {
    MealType::from_str(raw).map_err(|_| PlanParseError::InvalidMealType(raw.to_owned()))
}

fn non_negative(field: &'static str, value: f64) -> ParseResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PlanParseError::InvalidNumber { field, value })
    }
}

fn rounded(field: &'static str, value: f64, max: u32) -> ParseResult<u32> {
    let value = non_negative(field, value)?.round();
    if value > f64::from(max) {
        return Err(PlanParseError::InvalidNumber { field, value });
    }
    // Safe: bounded above and non-negative
    Ok(value as u32)
}

fn required_text(field: &'static str, value: String) -> ParseResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PlanParseError::BlankField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn convert_meal(raw: RawMeal) -> ParseResult<Meal> {
    Ok(Meal {
        meal_type: parse_meal_type(&raw.meal_type)?,
        name: required_text("name", raw.name)?,
        description: raw.description.trim().to_owned(),
        calories: rounded("calories", raw.calories, 10_000)?,
        protein_g: non_negative("protein_g", raw.protein_g)?,
        carbs_g: non_negative("carbs_g", raw.carbs_g)?,
        fat_g: non_negative("fat_g", raw.fat_g)?,
        ingredients: raw
            .ingredients
            .into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect(),
    })
}

fn convert_exercise(raw: RawExercise) -> ParseResult<Exercise> {
    Ok(Exercise {
        name: required_text("name", raw.name)?,
        sets: rounded("sets", raw.sets, u32::from(u8::MAX))? as u8,
        reps: raw.reps.trim().to_owned(),
        rest_seconds: rounded("rest_seconds", raw.rest_seconds, u32::from(u16::MAX))? as u16,
        notes: raw
            .notes
            .map(|note| note.trim().to_owned())
            .filter(|note| !note.is_empty()),
    })
}

fn convert_diet_day(raw: RawDietDay) -> ParseResult<DietDay> {
    let day = parse_day(&raw.day)?;
    let mut meals = raw
        .meals
        .into_iter()
        .map(convert_meal)
        .collect::<ParseResult<Vec<_>>>()?;
    if meals.is_empty() {
        return Err(PlanParseError::EmptyDay(day));
    }
    // Stable sort keeps two snacks in their given order
    meals.sort_by_key(|meal| meal.meal_type);
    Ok(DietDay { day, meals })
}

fn convert_workout_day(raw: RawWorkoutDay) -> ParseResult<WorkoutDay> {
    let day = parse_day(&raw.day)?;
    let exercises = raw
        .exercises
        .into_iter()
        .map(convert_exercise)
        .collect::<ParseResult<Vec<_>>>()?;
    let rest_day =
        raw.rest_day || (exercises.is_empty() && raw.title.to_lowercase().contains("rest"));
    if !rest_day && exercises.is_empty() {
        return Err(PlanParseError::EmptyDay(day));
    }
    let title = if raw.title.trim().is_empty() && rest_day {
        "Rest".to_owned()
    } else {
        required_text("title", raw.title)?
    };
    Ok(WorkoutDay {
        day,
        title,
        rest_day,
        exercises,
    })
}

/// Check every day appears exactly once and order by week
fn normalise_week<T>(mut days: Vec<T>, day_of: impl Fn(&T) -> DayOfWeek) -> ParseResult<Vec<T>> {
    let mut seen = BTreeSet::new();
    for entry in &days {
        let day = day_of(entry);
        if !seen.insert(day) {
            return Err(PlanParseError::DuplicateDay(day));
        }
    }

    let missing: Vec<&str> = DayOfWeek::ALL
        .iter()
        .filter(|day| !seen.contains(*day))
        .map(DayOfWeek::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(PlanParseError::MissingDays(missing.join(", ")));
    }

    days.sort_by_key(&day_of);
    Ok(days)
}

/// Parse a full week of meals
///
/// # Errors
///
/// Returns a [`PlanParseError`] describing the first problem found.
pub fn parse_diet_days(output: &str) -> ParseResult<Vec<DietDay>> {
    let raw: Vec<RawDietDay> = serde_json::from_value(days_array(extract_json(output)?)?)?;
    let days = raw
        .into_iter()
        .map(convert_diet_day)
        .collect::<ParseResult<Vec<_>>>()?;
    normalise_week(days, |day| day.day)
}

/// Parse a single replacement meal and check it fills `expected`
///
/// A missing meal type is taken to be `expected`.
///
/// # Errors
///
/// Returns a [`PlanParseError`] if the meal is malformed or for another slot.
pub fn parse_meal(output: &str, expected: MealType) -> ParseResult<Meal> {
    let mut value = single_object(extract_json(output)?, "meal")?;
    if let Value::Object(map) = &mut value {
        let has_type = ["meal_type", "type", "meal", "slot"]
            .iter()
            .any(|key| map.contains_key(*key));
        if !has_type {
            map.insert("meal_type".to_owned(), Value::from(expected.as_str()));
        }
    }

    let meal = convert_meal(serde_json::from_value(value)?)?;
    if meal.meal_type != expected {
        return Err(PlanParseError::WrongMealType {
            expected,
            found: meal.meal_type,
        });
    }
    Ok(meal)
}

/// Parse a full week of workouts
///
/// # Errors
///
/// Returns a [`PlanParseError`] describing the first problem found.
pub fn parse_workout_days(output: &str) -> ParseResult<Vec<WorkoutDay>> {
    let raw: Vec<RawWorkoutDay> = serde_json::from_value(days_array(extract_json(output)?)?)?;
    let days = raw
        .into_iter()
        .map(convert_workout_day)
        .collect::<ParseResult<Vec<_>>>()?;
    normalise_week(days, |day| day.day)
}

/// Parse a single replacement workout day and check it is for `expected`
///
/// # Errors
///
/// Returns a [`PlanParseError`] if the day is malformed or for another day.
pub fn parse_workout_day(output: &str, expected: DayOfWeek) -> ParseResult<WorkoutDay> {
    let mut value = single_object(extract_json(output)?, "workout_day")?;
    if let Value::Object(map) = &mut value {
        map.entry("day")
            .or_insert_with(|| Value::from(expected.as_str()));
    }

    let day = convert_workout_day(serde_json::from_value(value)?)?;
    if day.day != expected {
        return Err(PlanParseError::WrongDay {
            expected,
            found: day.day,
        });
    }
    Ok(day)
}
