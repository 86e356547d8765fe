// ABOUTME: Integration tests for parsing model output into diet and workout plans
// ABOUTME: Week normalisation, duplicate and missing days, wrappers, and lenient fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{diet_plan_output, diet_plan_value, meal_json, workout_day_json, workout_plan_output};
use pierre_diet_planner::models::{DayOfWeek, MealType};
use pierre_diet_planner::plans::parser::{
    parse_diet_days, parse_meal, parse_workout_day, parse_workout_days, PlanParseError,
};
use serde_json::json;

#[test]
fn test_full_diet_week_parses_in_week_order() {
    let days = parse_diet_days(&diet_plan_output()).unwrap();

    assert_eq!(days.len(), 7);
    let order: Vec<_> = days.iter().map(|d| d.day).collect();
    assert_eq!(order, DayOfWeek::ALL.to_vec());
    assert_eq!(days[0].meals.len(), 3);
    assert_eq!(days[0].total_calories(), 1750);
}

#[test]
fn test_shuffled_days_are_normalised() {
    let shuffled = [
        DayOfWeek::Sunday,
        DayOfWeek::Wednesday,
        DayOfWeek::Monday,
        DayOfWeek::Friday,
        DayOfWeek::Tuesday,
        DayOfWeek::Saturday,
        DayOfWeek::Thursday,
    ];
    let days = parse_diet_days(&diet_plan_value(&shuffled).to_string()).unwrap();
    let order: Vec<_> = days.iter().map(|d| d.day).collect();
    assert_eq!(order, DayOfWeek::ALL.to_vec());
}

#[test]
fn test_meals_sorted_by_slot() {
    let output = json!({
        "days": DayOfWeek::ALL.iter().map(|day| json!({
            "day": day.as_str(),
            "meals": [
                meal_json("dinner", "Stew", 700),
                meal_json("breakfast", "Oats", 400),
                meal_json("snack", "Apple", 95),
            ]
        })).collect::<Vec<_>>()
    })
    .to_string();

    let days = parse_diet_days(&output).unwrap();
    let slots: Vec<_> = days[3].meals.iter().map(|m| m.meal_type).collect();
    assert_eq!(
        slots,
        vec![MealType::Breakfast, MealType::Dinner, MealType::Snack]
    );
}

#[test]
fn test_missing_days_are_reported() {
    let output = diet_plan_value(&DayOfWeek::ALL[..5]).to_string();
    match parse_diet_days(&output) {
        Err(PlanParseError::MissingDays(missing)) => assert_eq!(missing, "saturday, sunday"),
        other => panic!("expected MissingDays, got {other:?}"),
    }
}

#[test]
fn test_duplicate_day_is_rejected() {
    let mut days = DayOfWeek::ALL.to_vec();
    days.push(DayOfWeek::Tuesday);
    let output = diet_plan_value(&days).to_string();
    assert!(matches!(
        parse_diet_days(&output),
        Err(PlanParseError::DuplicateDay(DayOfWeek::Tuesday))
    ));
}

#[test]
fn test_day_without_meals_is_rejected() {
    let mut value = diet_plan_value(&DayOfWeek::ALL);
    value["days"][2]["meals"] = json!([]);
    assert!(matches!(
        parse_diet_days(&value.to_string()),
        Err(PlanParseError::EmptyDay(DayOfWeek::Wednesday))
    ));
}

#[test]
fn test_wrapped_and_fenced_week_is_accepted() {
    let wrapped = json!({ "plan": diet_plan_value(&DayOfWeek::ALL) });
    let output = format!("Sure, here is the plan.\n```json\n{wrapped}\n```\nEnjoy your week!");
    assert_eq!(parse_diet_days(&output).unwrap().len(), 7);
}

#[test]
fn test_top_level_array_is_accepted() {
    let value = diet_plan_value(&DayOfWeek::ALL);
    let output = value["days"].to_string();
    assert_eq!(parse_diet_days(&output).unwrap().len(), 7);
}

#[test]
fn test_unknown_day_name_is_rejected() {
    let mut value = diet_plan_value(&DayOfWeek::ALL);
    value["days"][0]["day"] = json!("funday");
    assert!(matches!(
        parse_diet_days(&value.to_string()),
        Err(PlanParseError::InvalidDay(name)) if name == "funday"
    ));
}

#[test]
fn test_text_without_json_is_rejected() {
    assert!(matches!(
        parse_diet_days("I'm sorry, I can't help with that."),
        Err(PlanParseError::NoJson)
    ));
}

#[test]
fn test_object_without_days_is_rejected() {
    assert!(matches!(
        parse_diet_days(r#"{"meals": []}"#),
        Err(PlanParseError::MissingField("days"))
    ));
}

#[test]
fn test_replacement_meal_under_meal_key() {
    let output = json!({ "meal": meal_json("lunch", "Tuna wrap", 560) }).to_string();
    let meal = parse_meal(&output, MealType::Lunch).unwrap();
    assert_eq!(meal.name, "Tuna wrap");
    assert_eq!(meal.calories, 560);
    assert_eq!(meal.ingredients.len(), 2);
}

#[test]
fn test_flat_meal_with_string_meal_field() {
    let meal = parse_meal(
        r#"{"meal":"lunch","name":"Soup","calories":400}"#,
        MealType::Lunch,
    )
    .unwrap();
    assert_eq!(meal.meal_type, MealType::Lunch);
    assert_eq!(meal.name, "Soup");
    assert_eq!(meal.calories, 400);

    let err = parse_meal(
        r#"{"meal":"dinner","name":"Soup","calories":400}"#,
        MealType::Lunch,
    )
    .unwrap_err();
    assert!(matches!(err, PlanParseError::WrongMealType { .. }));
}

#[test]
fn test_full_workout_week_flags_rest_days() {
    let days = parse_workout_days(&workout_plan_output()).unwrap();

    assert_eq!(days.len(), 7);
    let training: Vec<_> = days.iter().filter(|d| !d.rest_day).map(|d| d.day).collect();
    assert_eq!(
        training,
        vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday]
    );
    assert_eq!(days[0].exercises[0].sets, 3);
    assert_eq!(days[0].exercises[0].rest_seconds, 90);
    assert_eq!(days[0].exercises[0].notes.as_deref(), Some("Keep chest up"));
    assert!(days[0].exercises[1].notes.is_none());
}

#[test]
fn test_rest_day_inferred_from_title() {
    let output = json!({ "day": "saturday", "title": "Rest and recovery", "exercises": [] })
        .to_string();
    let day = parse_workout_day(&output, DayOfWeek::Saturday).unwrap();
    assert!(day.rest_day);
    assert_eq!(day.title, "Rest and recovery");
}

#[test]
fn test_replacement_day_defaults_to_requested_day() {
    let mut value = workout_day_json(DayOfWeek::Thursday, "Upper body", false);
    value.as_object_mut().unwrap().remove("day");
    let day = parse_workout_day(&value.to_string(), DayOfWeek::Thursday).unwrap();
    assert_eq!(day.day, DayOfWeek::Thursday);
    assert_eq!(day.exercises.len(), 2);
}

#[test]
fn test_replacement_day_for_other_day_is_rejected() {
    let output = workout_day_json(DayOfWeek::Friday, "Legs", false).to_string();
    assert!(matches!(
        parse_workout_day(&output, DayOfWeek::Monday),
        Err(PlanParseError::WrongDay {
            expected: DayOfWeek::Monday,
            found: DayOfWeek::Friday
        })
    ));
}

#[test]
fn test_float_sets_and_string_reps() {
    let output = json!({
        "day": "monday",
        "title": "Conditioning",
        "exercises": [{ "exercise": "Rower", "sets": 2.6, "reps": 500, "rest": "45s" }]
    })
    .to_string();
    let day = parse_workout_day(&output, DayOfWeek::Monday).unwrap();
    let exercise = &day.exercises[0];
    assert_eq!(exercise.name, "Rower");
    assert_eq!(exercise.sets, 3);
    assert_eq!(exercise.reps, "500");
    assert_eq!(exercise.rest_seconds, 45);
}

#[test]
fn test_out_of_range_rest_is_rejected() {
    let output = json!({
        "day": "monday",
        "title": "Conditioning",
        "exercises": [{ "name": "Plank", "sets": 3, "reps": "30s", "rest_seconds": 100_000 }]
    })
    .to_string();
    assert!(matches!(
        parse_workout_day(&output, DayOfWeek::Monday),
        Err(PlanParseError::InvalidNumber {
            field: "rest_seconds",
            ..
        })
    ));
}
