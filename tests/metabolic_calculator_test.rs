// ABOUTME: Integration tests for the metabolic calculator
// ABOUTME: Reference scenarios, validation failures, and monotonicity properties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{female_profile, male_profile};
use pierre_diet_planner::calculator::{
    calculate_bmr, calculate_target_calories, calculate_tdee, calculate_weeks_to_goal,
    compare_deficits, compute_stats,
};
use pierre_diet_planner::errors::ErrorCode;
use pierre_diet_planner::models::{ActivityLevel, BiometricProfile, DeficitIntensity, Sex};

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_male_sedentary_moderate_deficit() {
    let stats = compute_stats(&male_profile(), DeficitIntensity::Moderate).unwrap();

    assert_eq!(stats.bmr, 1849);
    assert_eq!(stats.tdee, 2219);
    assert_eq!(stats.target_calories, 1775);
    assert_eq!(stats.daily_deficit(), 444);
    // 10 kg * 7700 / 3108 = 24.77
    assert_eq!(stats.weeks_to_goal, 25);
}

#[test]
fn test_male_sedentary_light_deficit() {
    let stats = compute_stats(&male_profile(), DeficitIntensity::Light).unwrap();

    assert_eq!(stats.bmr, 1849);
    assert_eq!(stats.tdee, 2219);
    assert_eq!(stats.target_calories, 1997);
    assert_eq!(stats.weeks_to_goal, 50);
}

#[test]
fn test_male_sedentary_aggressive_deficit_weeks_to_goal() {
    let stats = compute_stats(&male_profile(), DeficitIntensity::Aggressive).unwrap();

    assert_eq!(stats.target_calories, 1553);
    assert_eq!(stats.weekly_deficit(), 4662);
    // 77000 / 4662 = 16.52
    assert_eq!(stats.weeks_to_goal, 17);
}

#[test]
fn test_female_very_active_moderate_deficit() {
    let stats = compute_stats(&female_profile(), DeficitIntensity::Moderate).unwrap();

    assert_eq!(stats.bmr, 1314);
    assert_eq!(stats.tdee, 2267);
    assert_eq!(stats.target_calories, 1814);
    assert_eq!(stats.weeks_to_goal, 0);
}

#[test]
fn test_activity_tiers_for_reference_male() {
    let expected = [
        (ActivityLevel::Sedentary, 2219),
        (ActivityLevel::LightlyActive, 2542),
        (ActivityLevel::ModeratelyActive, 2866),
        (ActivityLevel::VeryActive, 3190),
        (ActivityLevel::ExtraActive, 3513),
    ];

    for (activity_level, tdee) in expected {
        let profile = BiometricProfile {
            activity_level,
            ..male_profile()
        };
        let stats = compute_stats(&profile, DeficitIntensity::Moderate).unwrap();
        assert_eq!(stats.tdee, tdee, "tdee for {activity_level}");
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_target_is_rounded_fraction_of_tdee() {
    for deficit in DeficitIntensity::ALL {
        let stats = compute_stats(&male_profile(), deficit).unwrap();
        let expected = (f64::from(stats.tdee) * (1.0 - deficit.fraction())).round() as u32;
        assert_eq!(stats.target_calories, expected);
        assert!(stats.target_calories < stats.tdee);
    }
}

#[test]
fn test_zero_target_loss_means_zero_weeks() {
    let profile = BiometricProfile {
        target_weight_loss_kg: 0.0,
        ..male_profile()
    };
    for deficit in DeficitIntensity::ALL {
        assert_eq!(compute_stats(&profile, deficit).unwrap().weeks_to_goal, 0);
    }
}

#[test]
fn test_compute_stats_is_deterministic() {
    let first = compute_stats(&female_profile(), DeficitIntensity::Aggressive).unwrap();
    let second = compute_stats(&female_profile(), DeficitIntensity::Aggressive).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bmr_monotonic_in_weight_height_and_age() {
    for sex in [Sex::Male, Sex::Female] {
        let base = calculate_bmr(70.0, 170.0, 40, sex);
        assert!(calculate_bmr(71.0, 170.0, 40, sex) > base);
        assert!(calculate_bmr(70.0, 171.0, 40, sex) > base);
        assert!(calculate_bmr(70.0, 170.0, 41, sex) < base);
    }
    assert!(
        (calculate_bmr(70.0, 170.0, 40, Sex::Male) - calculate_bmr(70.0, 170.0, 40, Sex::Female)
            - 166.0)
            .abs()
            < f64::EPSILON
    );
}

#[test]
fn test_tdee_strictly_increases_with_activity() {
    let tdees: Vec<u32> = ActivityLevel::ALL
        .into_iter()
        .map(|level| calculate_tdee(1500, level))
        .collect();
    assert!(tdees.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_weeks_to_goal_guards_zero_deficit() {
    // 5 kg with no deficit: 38500 / max(0, 1)
    assert_eq!(calculate_weeks_to_goal(5.0, 2000, 2000), 38_500);
    assert_eq!(calculate_weeks_to_goal(0.0, 2000, 2000), 0);
}

#[test]
fn test_target_calorie_helper_matches_pipeline() {
    assert_eq!(calculate_target_calories(2219, DeficitIntensity::Light), 1997);
    assert_eq!(calculate_target_calories(2267, DeficitIntensity::Moderate), 1814);
}

#[test]
fn test_compare_deficits_orders_gentlest_first() {
    let options = compare_deficits(&male_profile()).unwrap();
    let kinds: Vec<_> = options.iter().map(|(deficit, _)| *deficit).collect();
    assert_eq!(
        kinds,
        vec![
            DeficitIntensity::Light,
            DeficitIntensity::Moderate,
            DeficitIntensity::Aggressive
        ]
    );
    let targets: Vec<_> = options.iter().map(|(_, s)| s.target_calories).collect();
    assert_eq!(targets, vec![1997, 1775, 1553]);
}

// ============================================================================
// Validation
// ============================================================================

fn assert_invalid(profile: &BiometricProfile, field: &str) {
    let err = compute_stats(profile, DeficitIntensity::Moderate).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput, "{field}");
    assert_eq!(err.http_status(), 400);
    let details = err.context.details.expect("validation details");
    assert_eq!(details["field"], field);
}

#[test]
fn test_rejects_non_positive_weight() {
    assert_invalid(
        &BiometricProfile {
            weight_kg: 0.0,
            ..male_profile()
        },
        "weight_kg",
    );
    assert_invalid(
        &BiometricProfile {
            weight_kg: -5.0,
            ..male_profile()
        },
        "weight_kg",
    );
}

#[test]
fn test_rejects_non_positive_height() {
    assert_invalid(
        &BiometricProfile {
            height_cm: 0.0,
            ..female_profile()
        },
        "height_cm",
    );
}

#[test]
fn test_rejects_zero_age() {
    assert_invalid(
        &BiometricProfile {
            age: 0,
            ..female_profile()
        },
        "age",
    );
}

#[test]
fn test_rejects_nan_and_negative_target_loss() {
    assert_invalid(
        &BiometricProfile {
            weight_kg: f64::NAN,
            ..male_profile()
        },
        "weight_kg",
    );
    assert_invalid(
        &BiometricProfile {
            target_weight_loss_kg: -1.0,
            ..male_profile()
        },
        "target_weight_loss_kg",
    );
}

fn assert_out_of_range(profile: &BiometricProfile, field: &str) {
    let err = compute_stats(profile, DeficitIntensity::Light).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange, "{field}");
    let details = err.context.details.expect("range details");
    assert_eq!(details["field"], field);
}

#[test]
fn test_rejects_profile_with_non_positive_bmr() {
    let profile = BiometricProfile {
        sex: Sex::Female,
        age: 100,
        weight_kg: 1.0,
        height_cm: 1.0,
        activity_level: ActivityLevel::Sedentary,
        target_weight_loss_kg: 0.0,
    };
    let err = compute_stats(&profile, DeficitIntensity::Moderate).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_rejects_toddler_sized_profile_with_empty_deficit() {
    // Unbounded, this rounds to bmr 4, tdee 5, target 5 and 7700 weeks
    let profile = BiometricProfile {
        sex: Sex::Female,
        age: 1,
        weight_kg: 2.0,
        height_cm: 24.0,
        activity_level: ActivityLevel::Sedentary,
        target_weight_loss_kg: 1.0,
    };
    assert_out_of_range(&profile, "weight_kg");
}

#[test]
fn test_rejects_weights_that_would_saturate() {
    for weight_kg in [401.0, 1e9, 1e308] {
        assert_out_of_range(
            &BiometricProfile {
                weight_kg,
                ..male_profile()
            },
            "weight_kg",
        );
    }
}

#[test]
fn test_rejects_height_and_age_outside_range() {
    assert_out_of_range(
        &BiometricProfile {
            height_cm: 99.0,
            ..female_profile()
        },
        "height_cm",
    );
    assert_out_of_range(
        &BiometricProfile {
            height_cm: 251.0,
            ..female_profile()
        },
        "height_cm",
    );
    assert_out_of_range(
        &BiometricProfile {
            age: 121,
            ..female_profile()
        },
        "age",
    );
}

#[test]
fn test_rejects_target_loss_at_or_above_body_weight() {
    assert_out_of_range(
        &BiometricProfile {
            target_weight_loss_kg: 90.0,
            ..male_profile()
        },
        "target_weight_loss_kg",
    );
}

#[test]
fn test_range_bounds_are_inclusive() {
    for (weight_kg, height_cm, age) in [(20.0, 100.0, 120), (400.0, 250.0, 1)] {
        for sex in [Sex::Male, Sex::Female] {
            let profile = BiometricProfile {
                sex,
                age,
                weight_kg,
                height_cm,
                activity_level: ActivityLevel::Sedentary,
                target_weight_loss_kg: 1.0,
            };
            compute_stats(&profile, DeficitIntensity::Light).unwrap();
        }
    }
}

// ============================================================================
// Sweep across the accepted range
// ============================================================================

const SWEEP_AGES: [u32; 5] = [1, 18, 40, 80, 120];
const SWEEP_WEIGHTS: [f64; 5] = [20.0, 50.0, 90.0, 200.0, 400.0];
const SWEEP_HEIGHTS: [f64; 4] = [100.0, 150.0, 175.0, 250.0];

fn sweep_profile(sex: Sex, age: u32, weight_kg: f64, height_cm: f64) -> BiometricProfile {
    BiometricProfile {
        sex,
        age,
        weight_kg,
        height_cm,
        activity_level: ActivityLevel::Sedentary,
        target_weight_loss_kg: 5.0,
    }
}

#[test]
fn test_sweep_keeps_target_below_tdee_and_tiers_ordered() {
    for sex in [Sex::Male, Sex::Female] {
        for age in SWEEP_AGES {
            for weight_kg in SWEEP_WEIGHTS {
                for height_cm in SWEEP_HEIGHTS {
                    let base = sweep_profile(sex, age, weight_kg, height_cm);
                    let mut previous_tdee = 0;
                    for activity_level in ActivityLevel::ALL {
                        let profile = BiometricProfile {
                            activity_level,
                            ..base.clone()
                        };
                        let label = format!("{profile:?}");
                        let mut previous_target = u32::MAX;
                        let mut previous_weeks = u32::MAX;
                        let mut tdee = 0;
                        for deficit in DeficitIntensity::ALL {
                            let stats = compute_stats(&profile, deficit).unwrap();
                            assert!(stats.bmr > 0, "{label}");
                            assert!(stats.target_calories < stats.tdee, "{label} {deficit}");
                            assert!(stats.target_calories < previous_target, "{label} {deficit}");
                            assert!(stats.weeks_to_goal <= previous_weeks, "{label} {deficit}");
                            assert!(stats.weeks_to_goal > 0, "{label} {deficit}");
                            previous_target = stats.target_calories;
                            previous_weeks = stats.weeks_to_goal;
                            tdee = stats.tdee;
                        }
                        assert!(tdee > previous_tdee, "{label}");
                        previous_tdee = tdee;
                    }
                }
            }
        }
    }
}

#[test]
fn test_sweep_rounded_bmr_is_monotonic() {
    let bmr = |profile: &BiometricProfile| {
        compute_stats(profile, DeficitIntensity::Moderate)
            .unwrap()
            .bmr
    };

    for sex in [Sex::Male, Sex::Female] {
        for age in SWEEP_AGES {
            for height_cm in SWEEP_HEIGHTS {
                let by_weight: Vec<u32> = SWEEP_WEIGHTS
                    .iter()
                    .map(|&w| bmr(&sweep_profile(sex, age, w, height_cm)))
                    .collect();
                assert!(by_weight.windows(2).all(|p| p[0] < p[1]), "{by_weight:?}");
            }
            for weight_kg in SWEEP_WEIGHTS {
                let by_height: Vec<u32> = SWEEP_HEIGHTS
                    .iter()
                    .map(|&h| bmr(&sweep_profile(sex, age, weight_kg, h)))
                    .collect();
                assert!(by_height.windows(2).all(|p| p[0] < p[1]), "{by_height:?}");
            }
        }
        for weight_kg in SWEEP_WEIGHTS {
            for height_cm in SWEEP_HEIGHTS {
                let by_age: Vec<u32> = SWEEP_AGES
                    .iter()
                    .map(|&a| bmr(&sweep_profile(sex, a, weight_kg, height_cm)))
                    .collect();
                assert!(by_age.windows(2).all(|p| p[0] > p[1]), "{by_age:?}");
            }
        }
    }

    for age in SWEEP_AGES {
        for weight_kg in SWEEP_WEIGHTS {
            for height_cm in SWEEP_HEIGHTS {
                let male = bmr(&sweep_profile(Sex::Male, age, weight_kg, height_cm));
                let female = bmr(&sweep_profile(Sex::Female, age, weight_kg, height_cm));
                assert_eq!(male - female, 166);
            }
        }
    }
}
