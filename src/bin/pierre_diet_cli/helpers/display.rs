// ABOUTME: Output formatting helpers for pierre-diet-cli
// ABOUTME: Prints calorie stats as aligned text or pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_diet_planner::{
    errors::AppResult,
    models::{BiometricProfile, CalculatedStats, DeficitIntensity},
};
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_profile(profile: &BiometricProfile) {
    println!(
        "Profile: {} | {} years | {:.1} kg | {:.1} cm | {}",
        profile.sex, profile.age, profile.weight_kg, profile.height_cm, profile.activity_level
    );
    if profile.target_weight_loss_kg > 0.0 {
        println!("Goal:    lose {:.1} kg", profile.target_weight_loss_kg);
    }
    println!("{}", "=".repeat(60));
}

/// Print stats for one deficit intensity
pub fn display_stats(
    profile: &BiometricProfile,
    deficit: DeficitIntensity,
    stats: &CalculatedStats,
) {
    display_profile(profile);
    println!("BMR:             {:>6} kcal/day", stats.bmr);
    println!("TDEE:            {:>6} kcal/day", stats.tdee);
    println!(
        "Target ({:<10}) {:>6} kcal/day",
        format!("{deficit}):"),
        stats.target_calories
    );
    println!(
        "Deficit:         {:>6} kcal/day ({} kcal/week)",
        stats.daily_deficit(),
        stats.weekly_deficit()
    );
    if profile.target_weight_loss_kg > 0.0 {
        println!("Weeks to goal:   {:>6}", stats.weeks_to_goal);
    }
}

/// Print one row per deficit intensity
pub fn display_comparison(
    profile: &BiometricProfile,
    options: &[(DeficitIntensity, CalculatedStats)],
) {
    display_profile(profile);
    if let Some((_, stats)) = options.first() {
        println!("BMR {} kcal/day, TDEE {} kcal/day\n", stats.bmr, stats.tdee);
    }
    println!(
        "{:<12} {:>8} {:>10} {:>8}",
        "Deficit", "Target", "Deficit/d", "Weeks"
    );
    println!("{}", "-".repeat(41));
    for (deficit, stats) in options {
        println!(
            "{:<12} {:>8} {:>10} {:>8}",
            deficit.as_str(),
            stats.target_calories,
            stats.daily_deficit(),
            stats.weeks_to_goal
        );
    }
}
