// ABOUTME: Portion scaler computing the serving multiplier that best fits a macro target
// ABOUTME: Protein-first with a calorie ceiling, calorie-first fallback, clamped to serving bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Portion Scaler
//!
//! Protein is matched first because it is the macro most tied to body
//! composition goals; calories act as a ceiling so a protein match cannot
//! produce an oversized portion. When protein cannot drive the ratio (zero
//! target or zero protein in the recipe) the scaler falls back to calories.
//!
//! The scaler never returns NaN or infinity: every division is guarded and
//! degenerate inputs resolve to the neutral multiplier of 1.0.

use macro_match_core::constants::servings::NEUTRAL_SERVINGS;
use macro_match_core::models::recipe::round_tenth;
use macro_match_core::models::{MealContext, Nutrition, TargetMacros};
use serde::{Deserialize, Serialize};

use crate::config::ScalingConfig;

/// Which macro drives the serving multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingPriority {
    /// Match protein, capped by calories
    ProteinFirst,
    /// Match calories
    CalorieFirst,
}

impl ScalingPriority {
    /// Priority for a slot: protein-first on training days, calorie-first otherwise
    #[must_use]
    pub const fn for_context(context: &MealContext, config: &ScalingConfig) -> Self {
        if context.is_workout_day || config.protein_first_on_rest_days {
            Self::ProteinFirst
        } else {
            Self::CalorieFirst
        }
    }
}

/// Result of scaling one recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleResult {
    /// Multiplier before clamping
    pub unclamped: f64,
    /// Multiplier after clamping and rounding to one decimal
    pub servings: f64,
    /// Priority that actually produced the multiplier
    pub priority_used: ScalingPriority,
}

/// Serving multiplier search bound to a scaling configuration
#[derive(Debug, Clone, Copy)]
pub struct PortionScaler<'a> {
    config: &'a ScalingConfig,
}

impl<'a> PortionScaler<'a> {
    /// Create a scaler
    #[must_use]
    pub const fn new(config: &'a ScalingConfig) -> Self {
        Self { config }
    }

    /// Compute the clamped serving multiplier for one recipe
    #[must_use]
    pub fn scale(
        &self,
        per_serving: &Nutrition,
        target: &TargetMacros,
        priority: ScalingPriority,
    ) -> ScaleResult {
        let (unclamped, priority_used) = self.unclamped_multiplier(per_serving, target, priority);
        ScaleResult {
            unclamped,
            servings: self.clamp(unclamped),
            priority_used,
        }
    }

    /// Multiplier before clamping, with the priority that produced it
    #[must_use]
    pub fn unclamped_multiplier(
        &self,
        per_serving: &Nutrition,
        target: &TargetMacros,
        priority: ScalingPriority,
    ) -> (f64, ScalingPriority) {
        // Zero-calorie recipes make both the cap and the fallback undefined
        if per_serving.calories.is_nan() || per_serving.calories <= 0.0 {
            return (NEUTRAL_SERVINGS, ScalingPriority::CalorieFirst);
        }

        let protein_usable = target.protein > 0.0 && per_serving.protein > 0.0;
        if priority == ScalingPriority::ProteinFirst && protein_usable {
            let protein_multiplier = target.protein / per_serving.protein;
            let calorie_cap =
                (target.calories * self.config.calorie_cap_factor) / per_serving.calories;
            return (
                finite_or_neutral(protein_multiplier.min(calorie_cap)),
                ScalingPriority::ProteinFirst,
            );
        }

        let multiplier = if target.calories > 0.0 {
            target.calories / per_serving.calories
        } else {
            NEUTRAL_SERVINGS
        };
        (finite_or_neutral(multiplier), ScalingPriority::CalorieFirst)
    }

    /// Clamp to the serving bounds and round to one decimal
    #[must_use]
    pub fn clamp(&self, multiplier: f64) -> f64 {
        round_tenth(multiplier.clamp(self.config.min_servings, self.config.max_servings))
    }
}

fn finite_or_neutral(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        NEUTRAL_SERVINGS
    }
}
