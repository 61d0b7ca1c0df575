// ABOUTME: Output models for scaled recipe recommendations
// ABOUTME: Defines ScaledRecommendation, MacroVariance, FilterSummary, and the response envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::recipe::{round_tenth, Nutrition, RecipeIngredient};
use super::request::TargetMacros;

/// Deviation of scaled nutrition from the target
///
/// Signed deltas are `scaled - target`. Percentages are absolute deviation
/// relative to the target and are 0 when the target is 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroVariance {
    /// Signed calorie delta (kcal)
    pub calories: f64,
    /// Signed protein delta (g)
    pub protein: f64,
    /// Signed carbohydrate delta (g)
    pub carbs: f64,
    /// Signed fat delta (g)
    pub fat: f64,
    /// Absolute calorie deviation in percent of target
    pub calories_pct: f64,
    /// Absolute protein deviation in percent of target
    pub protein_pct: f64,
}

impl MacroVariance {
    /// Copy with every field rounded to one decimal, for output
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            calories: round_tenth(self.calories),
            protein: round_tenth(self.protein),
            carbs: round_tenth(self.carbs),
            fat: round_tenth(self.fat),
            calories_pct: round_tenth(self.calories_pct),
            protein_pct: round_tenth(self.protein_pct),
        }
    }
}

/// One recipe scaled to the requested target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecommendation {
    /// Recipe identifier
    pub recipe_id: String,
    /// Recipe name
    pub name: String,
    /// Recipe category
    pub category: String,
    /// Recipe tags
    pub tags: Vec<String>,
    /// Image reference, passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Nutrition for one serving
    pub original_nutrition: Nutrition,
    /// Serving multiplier, one decimal, within [0.5, 3.0]
    pub servings: f64,
    /// Nutrition at `servings`
    pub scaled_nutrition: Nutrition,
    /// Deviation of `scaled_nutrition` from the target
    pub variance: MacroVariance,
    /// Suitability score, 0-100
    pub match_score: u8,
    /// Human-readable reasons, in rule evaluation order
    pub match_reasons: Vec<String>,
    /// Ingredients, unmodified
    pub ingredients: Vec<RecipeIngredient>,
    /// Directions, unmodified
    pub directions: Vec<String>,
}

/// Counts of how the candidate set was narrowed down
///
/// Lets callers tell "excluded for safety" apart from "no macro fit" when the
/// result is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    /// Recipes returned by the corpus
    pub candidates: usize,
    /// Skipped as inactive or explicitly excluded by id
    pub skipped: usize,
    /// Skipped for missing ingredients, directions, or usable nutrition
    pub incomplete: usize,
    /// Skipped by the safety filter
    pub unsafe_excluded: usize,
    /// Skipped for exceeding the calorie variance cutoff
    pub over_variance: usize,
    /// Recipes that passed every filter
    pub survivors: usize,
}

/// Response for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    /// Top recommendations, best first
    pub recipes: Vec<ScaledRecommendation>,
    /// Survivor count before the limit was applied
    pub total: usize,
    /// Target echoed back
    pub target_macros: TargetMacros,
    /// Filtering diagnostics
    pub summary: FilterSummary,
}

impl RecommendationResponse {
    /// Whether nothing survived filtering
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Ids of the returned recipes, in rank order
    #[must_use]
    pub fn recipe_ids(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.recipe_id.as_str()).collect()
    }
}
