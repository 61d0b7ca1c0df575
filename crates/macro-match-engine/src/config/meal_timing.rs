// ABOUTME: Meal timing macro split configuration for deriving slot targets from calories
// ABOUTME: Maps workout relation and training-day status to protein/carb/fat percentages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro splits per meal timing.
//!
//! # Scientific References
//!
//! - Pre-workout: Kerksick CM et al. (2017) DOI: 10.1186/s12970-017-0189-4
//! - Post-workout: Jäger R et al. (2017) DOI: 10.1186/s12970-017-0177-8
//! - Rest day: Impey SG et al. (2018) DOI: 10.1007/s40279-018-0867-7

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use macro_match_core::models::{MacroSplit, TargetMacros, WorkoutRelation};

/// Macro split for each meal timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTimingMacrosConfig {
    /// Pre-workout: high carbs for glycogen availability
    /// Default: (20% protein, 55% carbs, 25% fat)
    pub pre_workout: MacroSplit,
    /// Post-workout: high protein for muscle protein synthesis
    /// Default: (30% protein, 45% carbs, 25% fat)
    pub post_workout: MacroSplit,
    /// Rest day: carbohydrate periodization
    /// Default: (30% protein, 35% carbs, 35% fat)
    pub rest_day: MacroSplit,
    /// Training day meal not tied to the session
    /// Default: (25% protein, 45% carbs, 30% fat)
    pub general: MacroSplit,
}

impl Default for MealTimingMacrosConfig {
    fn default() -> Self {
        Self {
            pre_workout: MacroSplit::new(20, 55, 25),
            post_workout: MacroSplit::new(30, 45, 25),
            rest_day: MacroSplit::new(30, 35, 35),
            general: MacroSplit::new(25, 45, 30),
        }
    }
}

impl MealTimingMacrosConfig {
    /// Validate that all splits sum to 100%
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` naming the first split that does not sum to 100
    pub fn validate(&self) -> Result<(), ConfigError> {
        let splits = [
            ("pre_workout", self.pre_workout),
            ("post_workout", self.post_workout),
            ("rest_day", self.rest_day),
            ("general", self.general),
        ];

        for (name, split) in splits {
            if !split.sums_to_hundred() {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} macro percentages must sum to 100, got {}/{}/{}",
                    split.protein_pct, split.carbs_pct, split.fat_pct
                )));
            }
        }

        Ok(())
    }

    /// Split for a slot's workout relation
    ///
    /// Meals not tied to a session use the rest-day split on rest days and
    /// the general split on training days.
    #[must_use]
    pub const fn split_for(&self, relation: WorkoutRelation, is_workout_day: bool) -> MacroSplit {
        match relation {
            WorkoutRelation::PreWorkout => self.pre_workout,
            WorkoutRelation::PostWorkout => self.post_workout,
            WorkoutRelation::None if is_workout_day => self.general,
            WorkoutRelation::None => self.rest_day,
        }
    }

    /// Derive gram targets for a slot from its calorie goal
    #[must_use]
    pub fn targets_for(
        &self,
        calories: f64,
        relation: WorkoutRelation,
        is_workout_day: bool,
    ) -> TargetMacros {
        TargetMacros::from_calories(calories, self.split_for(relation, is_workout_day))
    }
}
