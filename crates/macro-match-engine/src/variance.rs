// ABOUTME: Variance evaluator comparing scaled recipe macros with the slot target
// ABOUTME: Signed deltas for all macros, guarded percentage deviation for calories and protein
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macro_match_core::models::{MacroVariance, Nutrition, TargetMacros};

/// Compare scaled nutrition with the target
///
/// Values are unrounded so the cutoff and the score see the true deviation.
/// Round with [`MacroVariance::rounded`] only when building output.
#[must_use]
pub fn evaluate_variance(scaled: &Nutrition, target: &TargetMacros) -> MacroVariance {
    let calories = scaled.calories - target.calories;
    let protein = scaled.protein - target.protein;

    MacroVariance {
        calories,
        protein,
        carbs: scaled.carbs - target.carbs,
        fat: scaled.fat - target.fat,
        calories_pct: percent_of(calories, target.calories),
        protein_pct: percent_of(protein, target.protein),
    }
}

/// Absolute deviation as a percentage of target, 0 when the target is 0
fn percent_of(delta: f64, target: f64) -> f64 {
    if target > 0.0 {
        (delta.abs() / target) * 100.0
    } else {
        0.0
    }
}

/// Whether the calorie deviation disqualifies the recipe
#[must_use]
pub fn exceeds_calorie_cutoff(variance: &MacroVariance, max_calorie_variance_pct: f64) -> bool {
    variance.calories_pct > max_calorie_variance_pct
}
