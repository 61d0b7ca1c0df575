// ABOUTME: Match request model: target macros, meal context, and diet preferences
// ABOUTME: Provides camelCase wire types plus request validation and limit resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::energy;
use crate::errors::{AppError, AppResult};

/// Desired nutrition for one meal slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetMacros {
    /// Target energy in kcal
    pub calories: f64,
    /// Target protein in grams
    pub protein: f64,
    /// Target carbohydrates in grams
    pub carbs: f64,
    /// Target fat in grams
    pub fat: f64,
}

impl TargetMacros {
    /// Create a target profile
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Derive gram targets from a calorie goal and a macro split
    ///
    /// Protein and carbohydrate provide 4 kcal/g, fat 9 kcal/g.
    #[must_use]
    pub fn from_calories(calories: f64, split: MacroSplit) -> Self {
        let share = |pct: u8| calories * f64::from(pct) / 100.0;
        Self {
            calories,
            protein: share(split.protein_pct) / energy::KCAL_PER_G_PROTEIN,
            carbs: share(split.carbs_pct) / energy::KCAL_PER_G_CARBS,
            fat: share(split.fat_pct) / energy::KCAL_PER_G_FAT,
        }
    }

    /// Reject negative or non-finite targets
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "targetMacros.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Protein/carbs/fat share of calories, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein percentage (0-100)
    pub protein_pct: u8,
    /// Carbohydrate percentage (0-100)
    pub carbs_pct: u8,
    /// Fat percentage (0-100)
    pub fat_pct: u8,
}

impl MacroSplit {
    /// Create a macro split
    #[must_use]
    pub const fn new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Self {
        Self {
            protein_pct,
            carbs_pct,
            fat_pct,
        }
    }

    /// Whether the percentages add up to exactly 100
    #[must_use]
    pub fn sums_to_hundred(&self) -> bool {
        u16::from(self.protein_pct) + u16::from(self.carbs_pct) + u16::from(self.fat_pct) == 100
    }
}

/// Kind of slot being filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    /// Regular meal
    #[default]
    Meal,
    /// Snack between meals
    Snack,
}

/// Position of the meal relative to a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutRelation {
    /// Eaten before training
    PreWorkout,
    /// Eaten after training
    PostWorkout,
    /// Not tied to a session
    #[default]
    None,
}

/// Time-of-day bucket for the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Morning slot
    Morning,
    /// Afternoon slot
    Afternoon,
    /// Evening slot
    Evening,
}

/// Situational context of the slot being filled
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealContext {
    /// Meal or snack
    #[serde(default)]
    pub slot_type: SlotType,
    /// Free-text slot label ("Breakfast", "Snack 2")
    #[serde(default)]
    pub slot_label: String,
    /// Relation to the day's workout
    #[serde(default)]
    pub workout_relation: WorkoutRelation,
    /// Whether the client trains that day
    #[serde(default)]
    pub is_workout_day: bool,
    /// Optional time-of-day bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
}

impl MealContext {
    /// Create a meal context
    #[must_use]
    pub fn new(slot_type: SlotType, slot_label: impl Into<String>) -> Self {
        Self {
            slot_type,
            slot_label: slot_label.into(),
            ..Self::default()
        }
    }

    /// Set the workout relation
    #[must_use]
    pub const fn with_workout(mut self, relation: WorkoutRelation, is_workout_day: bool) -> Self {
        self.workout_relation = relation;
        self.is_workout_day = is_workout_day;
        self
    }

    /// Set the time-of-day bucket
    #[must_use]
    pub const fn at(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }
}

/// Client diet preferences; every field is optional and defaults to empty
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DietPreferences {
    /// Dietary pattern ("vegan", "vegetarian", "omnivore", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_pattern: Option<String>,
    /// Restrictions ("gluten-free", "dairy-free", ...)
    pub dietary_restrictions: Vec<String>,
    /// Declared allergies
    pub allergies: Vec<String>,
    /// Free-text allergies not covered by the standard list
    pub custom_allergies: Vec<String>,
    /// Foods the client does not want
    pub foods_to_avoid: Vec<String>,
    /// Foods the client explicitly asked for
    pub foods_to_emphasize: Vec<String>,
    /// Cuisine preferences (carried for callers, not scored)
    pub cuisine_preferences: Vec<String>,
    /// Preferred protein sources
    pub preferred_proteins: Vec<String>,
    /// Preferred carbohydrate sources
    pub preferred_carbs: Vec<String>,
    /// Preferred vegetables
    pub preferred_vegetables: Vec<String>,
}

/// Full request for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    /// Macro profile to approximate
    pub target_macros: TargetMacros,
    /// Slot context
    pub meal_context: MealContext,
    /// Optional diet preferences
    #[serde(default)]
    pub diet_preferences: DietPreferences,
    /// Recipe ids to skip for plan-wide variety
    #[serde(default)]
    pub exclude_recipes: Vec<String>,
    /// Number of recommendations wanted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl MatchRequest {
    /// Create a request with default preferences and limit
    #[must_use]
    pub fn new(target_macros: TargetMacros, meal_context: MealContext) -> Self {
        Self {
            target_macros,
            meal_context,
            diet_preferences: DietPreferences::default(),
            exclude_recipes: Vec::new(),
            limit: None,
        }
    }

    /// Attach diet preferences
    #[must_use]
    pub fn with_preferences(mut self, preferences: DietPreferences) -> Self {
        self.diet_preferences = preferences;
        self
    }

    /// Skip a recipe id
    #[must_use]
    pub fn excluding(mut self, recipe_id: impl Into<String>) -> Self {
        self.exclude_recipes.push(recipe_id.into());
        self
    }

    /// Set the number of recommendations wanted
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Effective result count: default when absent or zero, clamped to `max_limit`
    #[must_use]
    pub fn resolved_limit(&self, default_limit: usize, max_limit: usize) -> usize {
        match self.limit {
            None | Some(0) => default_limit.min(max_limit),
            Some(n) => n.min(max_limit),
        }
    }

    /// Validate request-level inputs
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if the target macros are negative or non-finite
    pub fn validate(&self) -> AppResult<()> {
        self.target_macros.validate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::selection::{DEFAULT_LIMIT, MAX_LIMIT};

    #[test]
    fn test_from_calories_post_workout_split() {
        let targets = TargetMacros::from_calories(500.0, MacroSplit::new(30, 45, 25));
        assert!((targets.protein - 37.5).abs() < 0.01);
        assert!((targets.carbs - 56.25).abs() < 0.01);
        assert!((targets.fat - 13.89).abs() < 0.01);
    }

    #[test]
    fn test_validate_rejects_negative_target() {
        let targets = TargetMacros::new(500.0, -1.0, 40.0, 15.0);
        assert!(targets.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_target() {
        let targets = TargetMacros::new(f64::NAN, 10.0, 40.0, 15.0);
        assert!(targets.validate().is_err());
    }

    #[test]
    fn test_limit_resolution() {
        let request = MatchRequest::new(TargetMacros::default(), MealContext::default());
        let resolve = |r: &MatchRequest| r.resolved_limit(DEFAULT_LIMIT, MAX_LIMIT);
        assert_eq!(resolve(&request), 5);
        assert_eq!(resolve(&request.clone().with_limit(0)), 5);
        assert_eq!(resolve(&request.clone().with_limit(3)), 3);
        assert_eq!(resolve(&request.with_limit(500)), 20);

        let capped = MatchRequest::new(TargetMacros::default(), MealContext::default()).with_limit(9);
        assert_eq!(capped.resolved_limit(5, 4), 4);
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{
            "targetMacros": {"calories": 500, "protein": 40, "carbs": 40, "fat": 15},
            "mealContext": {
                "slotType": "snack",
                "slotLabel": "Afternoon snack",
                "workoutRelation": "post-workout",
                "isWorkoutDay": true,
                "timeOfDay": "afternoon"
            },
            "dietPreferences": {"allergies": ["peanut"], "customAllergies": ["sesame"]},
            "excludeRecipes": ["r9"]
        }"#;
        let request: MatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.meal_context.slot_type, SlotType::Snack);
        assert_eq!(
            request.meal_context.workout_relation,
            WorkoutRelation::PostWorkout
        );
        assert_eq!(request.meal_context.time_of_day, Some(TimeOfDay::Afternoon));
        assert_eq!(request.diet_preferences.custom_allergies, vec!["sesame"]);
        assert!(request.diet_preferences.foods_to_avoid.is_empty());
        assert_eq!(request.exclude_recipes, vec!["r9"]);
        assert!(request.limit.is_none());
    }

    #[test]
    fn test_split_sum_check() {
        assert!(MacroSplit::new(20, 55, 25).sums_to_hundred());
        assert!(!MacroSplit::new(50, 50, 50).sums_to_hundred());
    }
}
