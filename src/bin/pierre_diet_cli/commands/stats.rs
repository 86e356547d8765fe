// ABOUTME: Calorie stats commands for pierre-diet-cli
// ABOUTME: Runs the metabolic calculator for one or every deficit intensity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_diet_planner::{
    calculator,
    errors::AppResult,
    models::{BiometricProfile, DeficitIntensity},
};
use serde_json::json;
use tracing::debug;

use crate::helpers::display::{display_comparison, display_stats, print_json};
use crate::OutputFormat;

/// Compute and print stats for a single deficit intensity
pub fn run(
    profile: &BiometricProfile,
    deficit: DeficitIntensity,
    format: OutputFormat,
) -> AppResult<()> {
    debug!(?profile, %deficit, "Computing stats");
    let stats = calculator::compute_stats(profile, deficit)?;

    match format {
        OutputFormat::Pretty => display_stats(profile, deficit, &stats),
        OutputFormat::Json => print_json(&json!({
            "deficit": deficit,
            "bmr": stats.bmr,
            "tdee": stats.tdee,
            "target_calories": stats.target_calories,
            "weeks_to_goal": stats.weeks_to_goal,
            "daily_deficit": stats.daily_deficit(),
            "weekly_deficit": stats.weekly_deficit(),
        }))?,
    }
    Ok(())
}

/// Compute and print stats for every deficit intensity
pub fn compare(profile: &BiometricProfile, format: OutputFormat) -> AppResult<()> {
    let options = calculator::compare_deficits(profile)?;

    match format {
        OutputFormat::Pretty => display_comparison(profile, &options),
        OutputFormat::Json => {
            let rows: Vec<_> = options
                .iter()
                .map(|(deficit, stats)| {
                    json!({
                        "deficit": deficit,
                        "target_calories": stats.target_calories,
                        "daily_deficit": stats.daily_deficit(),
                        "weeks_to_goal": stats.weeks_to_goal,
                    })
                })
                .collect();
            let (bmr, tdee) = options
                .first()
                .map_or((0, 0), |(_, stats)| (stats.bmr, stats.tdee));
            print_json(&json!({ "bmr": bmr, "tdee": tdee, "options": rows }))?;
        }
    }
    Ok(())
}
