// ABOUTME: Scoring weight table for the recipe match scorer
// ABOUTME: Holds every penalty and bonus magnitude of the linear scoring heuristic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use macro_match_core::constants::scoring::SNACK_CALORIE_THRESHOLD;

/// Penalty and bonus magnitudes applied by the match scorer
///
/// Penalties are points per percentage point of variance; bonuses are flat
/// points. The defaults are the production heuristic and changing them
/// changes every score the engine reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points lost per percent of calorie variance
    pub calorie_variance_penalty: f64,
    /// Points lost per percent of protein variance
    pub protein_variance_penalty: f64,
    /// Ingredient matches a food the client asked to emphasize
    pub emphasized_food_bonus: f64,
    /// Ingredient matches a preferred protein
    pub preferred_protein_bonus: f64,
    /// Ingredient matches a preferred carb
    pub preferred_carb_bonus: f64,
    /// Ingredient matches a preferred vegetable
    pub preferred_vegetable_bonus: f64,
    /// Pre-workout slot and pre-workout-suitable recipe
    pub pre_workout_bonus: f64,
    /// Post-workout slot and post-workout-suitable recipe
    pub post_workout_bonus: f64,
    /// Training day and high-protein recipe
    pub training_day_high_protein_bonus: f64,
    /// Meal-prep-friendly recipe
    pub meal_prep_bonus: f64,
    /// Quick-prep recipe
    pub quick_prep_bonus: f64,
    /// Morning slot and breakfast category
    pub morning_breakfast_bonus: f64,
    /// Evening slot and dinner category
    pub evening_dinner_bonus: f64,
    /// Snack slot and snack-sized recipe
    pub snack_bonus: f64,
    /// Recipes under this many calories count as snack-sized
    pub snack_calorie_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            calorie_variance_penalty: 2.0,
            protein_variance_penalty: 3.0,
            emphasized_food_bonus: 25.0,
            preferred_protein_bonus: 15.0,
            preferred_carb_bonus: 10.0,
            preferred_vegetable_bonus: 8.0,
            pre_workout_bonus: 15.0,
            post_workout_bonus: 15.0,
            training_day_high_protein_bonus: 10.0,
            meal_prep_bonus: 5.0,
            quick_prep_bonus: 3.0,
            morning_breakfast_bonus: 10.0,
            evening_dinner_bonus: 10.0,
            snack_bonus: 8.0,
            snack_calorie_threshold: SNACK_CALORIE_THRESHOLD,
        }
    }
}

impl ScoringWeights {
    /// Every weight as a named value, in scoring order
    #[must_use]
    pub const fn named(&self) -> [(&'static str, f64); 15] {
        [
            ("calorie_variance_penalty", self.calorie_variance_penalty),
            ("protein_variance_penalty", self.protein_variance_penalty),
            ("emphasized_food_bonus", self.emphasized_food_bonus),
            ("preferred_protein_bonus", self.preferred_protein_bonus),
            ("preferred_carb_bonus", self.preferred_carb_bonus),
            ("preferred_vegetable_bonus", self.preferred_vegetable_bonus),
            ("pre_workout_bonus", self.pre_workout_bonus),
            ("post_workout_bonus", self.post_workout_bonus),
            (
                "training_day_high_protein_bonus",
                self.training_day_high_protein_bonus,
            ),
            ("meal_prep_bonus", self.meal_prep_bonus),
            ("quick_prep_bonus", self.quick_prep_bonus),
            ("morning_breakfast_bonus", self.morning_breakfast_bonus),
            ("evening_dinner_bonus", self.evening_dinner_bonus),
            ("snack_bonus", self.snack_bonus),
            ("snack_calorie_threshold", self.snack_calorie_threshold),
        ]
    }

    /// Validate that every weight is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` naming the first bad weight
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
