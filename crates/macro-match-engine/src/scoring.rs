// ABOUTME: Linear match scorer producing a bounded 0-100 score and ordered reasons
// ABOUTME: Variance penalties followed by preference, workout, time-of-day, and convenience bonuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Match Scorer
//!
//! Scoring starts at 100 and applies additive adjustments in a fixed order.
//! Reasons are emitted in that same order, so the order of `ScoringWeights`
//! fields is user-visible. The accumulated value is clamped to `[0, 100]` and
//! rounded only once, at the end.

use macro_match_core::constants::scoring::{BASE_SCORE, MAX_SCORE, MIN_SCORE};
use macro_match_core::models::{
    DietPreferences, MacroVariance, MealContext, Recipe, SlotType, TimeOfDay, WorkoutRelation,
};

use crate::config::ScoringWeights;
use crate::safety::{first_match, normalize_terms};

/// Preference term lists, normalized once per request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceTerms {
    emphasized: Vec<String>,
    proteins: Vec<String>,
    carbs: Vec<String>,
    vegetables: Vec<String>,
}

impl PreferenceTerms {
    /// Trim and lowercase the preference lists, dropping blanks
    #[must_use]
    pub fn from_preferences(preferences: &DietPreferences) -> Self {
        Self {
            emphasized: normalize_terms(preferences.foods_to_emphasize.iter()),
            proteins: normalize_terms(preferences.preferred_proteins.iter()),
            carbs: normalize_terms(preferences.preferred_carbs.iter()),
            vegetables: normalize_terms(preferences.preferred_vegetables.iter()),
        }
    }

    /// Whether no preference term is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emphasized.is_empty()
            && self.proteins.is_empty()
            && self.carbs.is_empty()
            && self.vegetables.is_empty()
    }
}

/// Score and reasons for one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    /// Clamped, rounded score
    pub score: u8,
    /// Accumulated value before clamping
    pub raw: f64,
    /// Reasons in rule order
    pub reasons: Vec<String>,
}

/// Accumulates adjustments and their reasons
struct Tally {
    value: f64,
    reasons: Vec<String>,
}

impl Tally {
    fn bonus(&mut self, points: f64, reason: String) {
        self.value += points;
        self.reasons.push(reason);
    }
}

/// Match scorer bound to a weight table
#[derive(Debug, Clone, Copy)]
pub struct MatchScorer<'a> {
    weights: &'a ScoringWeights,
}

impl<'a> MatchScorer<'a> {
    /// Create a scorer
    #[must_use]
    pub const fn new(weights: &'a ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score a recipe that already passed safety and variance checks
    #[must_use]
    pub fn score(
        &self,
        recipe: &Recipe,
        context: &MealContext,
        variance: &MacroVariance,
        terms: &PreferenceTerms,
    ) -> MatchScore {
        let w = self.weights;
        let mut tally = Tally {
            value: BASE_SCORE,
            reasons: Vec::new(),
        };

        tally.value -= variance.calories_pct * w.calorie_variance_penalty;
        tally.value -= variance.protein_pct * w.protein_variance_penalty;

        self.score_preferences(recipe, terms, &mut tally);
        self.score_workout(recipe, context, &mut tally);
        self.score_convenience(recipe, &mut tally);
        self.score_timing(recipe, context, &mut tally);

        let raw = tally.value;
        MatchScore {
            score: clamp_score(raw),
            raw,
            reasons: tally.reasons,
        }
    }

    fn score_preferences(&self, recipe: &Recipe, terms: &PreferenceTerms, tally: &mut Tally) {
        if terms.is_empty() {
            return;
        }
        let w = self.weights;
        let haystack = ingredient_text(recipe);

        if let Some(term) = first_match(&haystack, &terms.emphasized) {
            tally.bonus(
                w.emphasized_food_bonus,
                format!("Includes {term}, a food you want to emphasize"),
            );
        }
        if let Some(term) = first_match(&haystack, &terms.proteins) {
            tally.bonus(
                w.preferred_protein_bonus,
                format!("Features {term}, one of your preferred proteins"),
            );
        }
        if let Some(term) = first_match(&haystack, &terms.carbs) {
            tally.bonus(
                w.preferred_carb_bonus,
                format!("Includes {term}, one of your preferred carbs"),
            );
        }
        if let Some(term) = first_match(&haystack, &terms.vegetables) {
            tally.bonus(
                w.preferred_vegetable_bonus,
                format!("Includes {term}, one of your preferred vegetables"),
            );
        }
    }

    fn score_workout(&self, recipe: &Recipe, context: &MealContext, tally: &mut Tally) {
        let w = self.weights;
        match context.workout_relation {
            WorkoutRelation::PreWorkout if recipe.flags.pre_workout_suitable => {
                tally.bonus(w.pre_workout_bonus, "Good pre-workout fuel".to_owned());
            }
            WorkoutRelation::PostWorkout if recipe.flags.post_workout_suitable => {
                tally.bonus(
                    w.post_workout_bonus,
                    "Supports post-workout recovery".to_owned(),
                );
            }
            _ => {}
        }
        if context.is_workout_day && recipe.flags.high_protein {
            tally.bonus(
                w.training_day_high_protein_bonus,
                "High protein for a training day".to_owned(),
            );
        }
    }

    fn score_convenience(&self, recipe: &Recipe, tally: &mut Tally) {
        let w = self.weights;
        if recipe.flags.meal_prep_friendly {
            tally.bonus(w.meal_prep_bonus, "Meal-prep friendly".to_owned());
        }
        if recipe.flags.quick_prep {
            tally.bonus(w.quick_prep_bonus, "Quick to prepare".to_owned());
        }
    }

    fn score_timing(&self, recipe: &Recipe, context: &MealContext, tally: &mut Tally) {
        let w = self.weights;
        let category = recipe.category.to_lowercase();
        match context.time_of_day {
            Some(TimeOfDay::Morning) if category.contains("breakfast") => {
                tally.bonus(w.morning_breakfast_bonus, "Great breakfast option".to_owned());
            }
            Some(TimeOfDay::Evening) if category.contains("dinner") => {
                tally.bonus(w.evening_dinner_bonus, "Great dinner option".to_owned());
            }
            _ => {}
        }
        // Snack size is judged on one serving, not the scaled portion
        if context.slot_type == SlotType::Snack
            && (recipe.has_tag("snack") || recipe.nutrition.calories < w.snack_calorie_threshold)
        {
            tally.bonus(w.snack_bonus, "Works well as a snack".to_owned());
        }
    }
}

/// Lowercase ingredient items joined by spaces
fn ingredient_text(recipe: &Recipe) -> String {
    recipe
        .ingredients
        .iter()
        .map(|i| i.item.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clamp to the score range and round to the nearest integer
fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return MIN_SCORE as u8;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE).round() as u8
}
