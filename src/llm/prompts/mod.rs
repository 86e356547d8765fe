// ABOUTME: Prompt templates for plan generation loaded at compile time
// ABOUTME: Renders {{placeholder}} markers with profile, stats, and preference values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! Placeholders use the `{{name}}` syntax and are filled by [`render`].

/// System instruction shared by every plan request
pub const PLANNER_SYSTEM_PROMPT: &str = include_str!("planner_system.md");

/// Full weekly diet plan
pub const DIET_PLAN_TEMPLATE: &str = include_str!("diet_plan.md");

/// Single meal replacement
pub const REGENERATE_MEAL_TEMPLATE: &str = include_str!("regenerate_meal.md");

/// Full weekly workout plan
pub const WORKOUT_PLAN_TEMPLATE: &str = include_str!("workout_plan.md");

/// Single workout day replacement
pub const REGENERATE_WORKOUT_DAY_TEMPLATE: &str = include_str!("regenerate_workout_day.md");

/// Substitute `{{key}}` markers in `template`
///
/// Unknown markers are left in place.
#[must_use]
pub fn render(template: &str, values: &[(&str, String)]) -> String {
    values
        .iter()
        .fold(template.to_owned(), |rendered, (key, value)| {
            rendered.replace(&format!("{{{{{key}}}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render(
            "{{a}} and {{a}} then {{b}} but {{c}}",
            &[("a", "x".to_owned()), ("b", "y".to_owned())],
        );
        assert_eq!(out, "x and x then y but {{c}}");
    }

    #[test]
    fn test_diet_template_mentions_target() {
        let out = render(DIET_PLAN_TEMPLATE, &[("target_calories", "1814".to_owned())]);
        assert!(out.contains("1814 kcal/day"));
        assert!(!out.contains("{{target_calories}}"));
    }
}
