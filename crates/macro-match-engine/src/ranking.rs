// ABOUTME: Candidate evaluation and ranking for one meal slot
// ABOUTME: Runs completeness, safety, scaling, variance, and scoring, then stably sorts survivors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use macro_match_core::models::{
    FilterSummary, MatchRequest, Recipe, RecommendationResponse, ScaledRecommendation,
};
use tracing::debug;

use crate::config::MatchingConfig;
use crate::safety::{ExclusionReason, SafetyFilter, SafetyVerdict};
use crate::scaling::{PortionScaler, ScalingPriority};
use crate::scoring::{MatchScorer, PreferenceTerms};
use crate::variance::{evaluate_variance, exceeds_calorie_cutoff};

/// Outcome of evaluating one candidate
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Inactive or listed in the request's exclusions
    Skipped,
    /// Missing ingredients, directions, or usable nutrition
    Incomplete,
    /// Rejected by the safety filter
    Unsafe(ExclusionReason),
    /// Scaled calories deviate too far from target (percent)
    OverVariance(f64),
    /// Survived every filter
    Scored(Box<ScaledRecommendation>),
}

/// Per-request state computed once and shared across candidates
struct PreparedRequest<'r> {
    request: &'r MatchRequest,
    excluded: HashSet<&'r str>,
    safety: SafetyFilter,
    terms: PreferenceTerms,
    priority: ScalingPriority,
}

/// Turns a candidate snapshot into ranked, scaled recommendations
///
/// Pure and deterministic: the same candidates and request always produce
/// the same ordering, scores, and servings.
#[derive(Debug, Clone, Default)]
pub struct RecipeMatcher {
    config: MatchingConfig,
}

impl RecipeMatcher {
    /// Create a matcher with an explicit configuration
    #[must_use]
    pub const fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Create a matcher from the global configuration
    #[must_use]
    pub fn from_global() -> Self {
        Self::new(MatchingConfig::global().clone())
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Evaluate a single recipe against a request
    #[must_use]
    pub fn evaluate(&self, recipe: &Recipe, request: &MatchRequest) -> Evaluation {
        self.evaluate_prepared(recipe, &self.prepare(request))
    }

    /// Rank candidates for a request
    ///
    /// Survivors are sorted by score, highest first. Equal scores keep the
    /// order in which the candidates were supplied.
    #[must_use]
    pub fn rank(&self, candidates: &[Recipe], request: &MatchRequest) -> RecommendationResponse {
        let prepared = self.prepare(request);
        let mut summary = FilterSummary {
            candidates: candidates.len(),
            ..FilterSummary::default()
        };
        let mut survivors = Vec::new();

        for recipe in candidates {
            match self.evaluate_prepared(recipe, &prepared) {
                Evaluation::Skipped => summary.skipped += 1,
                Evaluation::Incomplete => {
                    debug!(recipe_id = %recipe.id, "Skipping incomplete recipe");
                    summary.incomplete += 1;
                }
                Evaluation::Unsafe(reason) => {
                    debug!(recipe_id = %recipe.id, reason = %reason, "Excluded by safety filter");
                    summary.unsafe_excluded += 1;
                }
                Evaluation::OverVariance(pct) => {
                    debug!(recipe_id = %recipe.id, calories_pct = pct, "Calorie variance over cutoff");
                    summary.over_variance += 1;
                }
                Evaluation::Scored(recommendation) => survivors.push(*recommendation),
            }
        }

        summary.survivors = survivors.len();
        survivors.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        survivors.truncate(request.resolved_limit(
            self.config.selection.default_limit,
            self.config.selection.max_limit,
        ));

        RecommendationResponse {
            recipes: survivors,
            total: summary.survivors,
            target_macros: request.target_macros,
            summary,
        }
    }

    fn prepare<'r>(&self, request: &'r MatchRequest) -> PreparedRequest<'r> {
        PreparedRequest {
            request,
            excluded: request.exclude_recipes.iter().map(String::as_str).collect(),
            safety: SafetyFilter::from_preferences(&request.diet_preferences),
            terms: PreferenceTerms::from_preferences(&request.diet_preferences),
            priority: ScalingPriority::for_context(&request.meal_context, &self.config.scaling),
        }
    }

    fn evaluate_prepared(&self, recipe: &Recipe, prepared: &PreparedRequest<'_>) -> Evaluation {
        if !recipe.is_active || prepared.excluded.contains(recipe.id.as_str()) {
            return Evaluation::Skipped;
        }
        if !recipe.is_complete() {
            return Evaluation::Incomplete;
        }
        if let SafetyVerdict::Reject(reason) = prepared.safety.check(recipe) {
            return Evaluation::Unsafe(reason);
        }

        let request = prepared.request;
        let scale = PortionScaler::new(&self.config.scaling).scale(
            &recipe.nutrition,
            &request.target_macros,
            prepared.priority,
        );
        let scaled_nutrition = recipe.nutrition.scaled(scale.servings);
        let variance = evaluate_variance(&scaled_nutrition, &request.target_macros);
        if exceeds_calorie_cutoff(&variance, self.config.selection.max_calorie_variance_pct) {
            return Evaluation::OverVariance(variance.calories_pct);
        }

        let score = MatchScorer::new(&self.config.weights).score(
            recipe,
            &request.meal_context,
            &variance,
            &prepared.terms,
        );

        Evaluation::Scored(Box::new(ScaledRecommendation {
            recipe_id: recipe.id.clone(),
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            tags: recipe.tags.clone(),
            image_url: recipe.image_url.clone(),
            original_nutrition: recipe.nutrition,
            servings: scale.servings,
            scaled_nutrition,
            variance: variance.rounded(),
            match_score: score.score,
            match_reasons: score.reasons,
            ingredients: recipe.ingredients.clone(),
            directions: recipe.directions.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_match_core::models::{
        DietPreferences, DietaryFlags, MealContext, Nutrition, SlotType, TargetMacros,
        WorkoutRelation,
    };

    fn recipe(id: &str, nutrition: Nutrition) -> Recipe {
        Recipe::new(id, format!("Recipe {id}"), "lunch", nutrition)
            .with_ingredient("chicken breast", "150 g")
            .with_ingredient("rice", "1 cup")
            .with_direction("Cook")
    }

    fn post_workout_request(target: TargetMacros) -> MatchRequest {
        MatchRequest::new(
            target,
            MealContext::new(SlotType::Meal, "Lunch").with_workout(WorkoutRelation::PostWorkout, true),
        )
    }

    #[test]
    fn test_post_workout_scenario() {
        let recipe_a = recipe("a", Nutrition::new(250.0, 20.0, 20.0, 8.0)).with_flags(DietaryFlags {
            post_workout_suitable: true,
            high_protein: true,
            ..DietaryFlags::default()
        });
        let request = post_workout_request(TargetMacros::new(500.0, 40.0, 40.0, 15.0));

        let response = RecipeMatcher::default().rank(&[recipe_a], &request);

        assert_eq!(response.total, 1);
        let top = &response.recipes[0];
        assert!((top.servings - 2.0).abs() < f64::EPSILON);
        assert!((top.scaled_nutrition.calories - 500.0).abs() < f64::EPSILON);
        assert!((top.scaled_nutrition.protein - 40.0).abs() < f64::EPSILON);
        assert!(top.variance.calories_pct.abs() < f64::EPSILON);
        assert!(top.variance.protein_pct.abs() < f64::EPSILON);
        assert_eq!(top.match_score, 100);
    }

    #[test]
    fn test_allergen_excluded_despite_perfect_fit() {
        let peanut = Recipe::new("pb", "Snack Plate", "snack", Nutrition::new(500.0, 40.0, 40.0, 15.0))
            .with_ingredient("peanut butter", "2 tbsp")
            .with_direction("Spread");
        let request = post_workout_request(TargetMacros::new(500.0, 40.0, 40.0, 15.0))
            .with_preferences(DietPreferences {
                allergies: vec!["Peanut".to_owned()],
                ..DietPreferences::default()
            });

        let matcher = RecipeMatcher::default();
        assert_eq!(
            matcher.evaluate(&peanut, &request),
            Evaluation::Unsafe(ExclusionReason::Allergen("peanut".to_owned()))
        );

        let response = matcher.rank(&[peanut], &request);
        assert!(response.is_empty());
        assert_eq!(response.summary.unsafe_excluded, 1);
    }

    #[test]
    fn test_calorie_cutoff_empties_result() {
        let candidates = vec![
            recipe("a", Nutrition::new(600.0, 30.0, 60.0, 20.0)),
            recipe("b", Nutrition::new(800.0, 45.0, 70.0, 25.0)),
        ];
        // Smallest portion is 300 kcal, far over a 100 kcal target
        let request = post_workout_request(TargetMacros::new(100.0, 10.0, 10.0, 3.0));

        let response = RecipeMatcher::default().rank(&candidates, &request);
        assert!(response.is_empty());
        assert!(response.recipes.is_empty());
        assert_eq!(response.summary.over_variance, 2);
    }

    #[test]
    fn test_deviation_just_over_cutoff_is_dropped() {
        // Clamped to 3.0 servings: 702 kcal against 1003 is 30.01% under
        let lean = recipe("lean", Nutrition::new(234.0, 5.0, 20.0, 5.0));
        let request = post_workout_request(TargetMacros::new(1003.0, 200.0, 100.0, 30.0));

        let evaluation = RecipeMatcher::default().evaluate(&lean, &request);
        assert!(matches!(evaluation, Evaluation::OverVariance(pct) if pct > 30.0));
    }

    #[test]
    fn test_output_variance_is_rounded() {
        // 1.0 serving of 487 kcal against 500: 2.6% under
        let bowl = recipe("bowl", Nutrition::new(487.0, 40.0, 40.0, 15.0));
        let request = post_workout_request(TargetMacros::new(500.0, 40.0, 40.0, 15.0));

        let response = RecipeMatcher::default().rank(&[bowl], &request);
        let variance = response.recipes[0].variance;
        assert!((variance.calories_pct - 2.6).abs() < f64::EPSILON);
        assert!((variance.calories + 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snack_size_uses_per_serving_calories() {
        // 250 kcal per serving, scaled to 2.0 servings for a 500 kcal snack
        let bar = recipe("bar", Nutrition::new(250.0, 20.0, 20.0, 8.0));
        let request = MatchRequest::new(
            TargetMacros::new(500.0, 40.0, 40.0, 16.0),
            MealContext::new(SlotType::Snack, "Afternoon snack"),
        );

        let response = RecipeMatcher::default().rank(&[bar], &request);
        let top = &response.recipes[0];
        assert!((top.servings - 2.0).abs() < f64::EPSILON);
        assert!((top.scaled_nutrition.calories - 500.0).abs() < f64::EPSILON);
        assert_eq!(top.match_reasons, vec!["Works well as a snack".to_owned()]);
    }

    #[test]
    fn test_zero_protein_uses_calorie_first() {
        let fruit = Recipe::new("f", "Fruit Bowl", "snack", Nutrition::new(200.0, 0.0, 50.0, 1.0))
            .with_ingredient("banana", "1")
            .with_direction("Slice");
        let request = post_workout_request(TargetMacros::new(400.0, 0.0, 50.0, 10.0));

        let response = RecipeMatcher::default().rank(&[fruit], &request);
        let top = &response.recipes[0];
        assert!((top.servings - 2.0).abs() < f64::EPSILON);
        assert!((top.scaled_nutrition.calories - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_servings_stay_within_bounds() {
        let candidates = vec![
            recipe("tiny", Nutrition::new(100.0, 5.0, 10.0, 2.0)),
            recipe("huge", Nutrition::new(1800.0, 120.0, 150.0, 60.0)),
        ];
        let targets = [
            TargetMacros::new(900.0, 200.0, 80.0, 30.0),
            TargetMacros::new(150.0, 2.0, 10.0, 3.0),
            TargetMacros::new(0.0, 0.0, 0.0, 0.0),
        ];
        let matcher = RecipeMatcher::default();

        for target in targets {
            for recipe in &candidates {
                if let Evaluation::Scored(rec) =
                    matcher.evaluate(recipe, &post_workout_request(target))
                {
                    assert!((0.5..=3.0).contains(&rec.servings));
                }
            }
        }
    }

    #[test]
    fn test_incomplete_inactive_and_excluded_are_skipped() {
        let target = TargetMacros::new(500.0, 40.0, 40.0, 15.0);
        let nutrition = Nutrition::new(500.0, 40.0, 40.0, 15.0);
        let candidates = vec![
            Recipe::new("no-steps", "Bare", "lunch", nutrition).with_ingredient("rice", "1 cup"),
            recipe("zero", Nutrition::new(0.0, 0.0, 0.0, 0.0)),
            recipe("off", nutrition).inactive(),
            recipe("used", nutrition),
            recipe("ok", nutrition),
        ];
        let request = post_workout_request(target).excluding("used");

        let response = RecipeMatcher::default().rank(&candidates, &request);

        assert_eq!(response.recipe_ids(), vec!["ok"]);
        assert_eq!(response.summary.incomplete, 2);
        assert_eq!(response.summary.skipped, 2);
        assert_eq!(response.summary.survivors, 1);
    }

    #[test]
    fn test_ties_keep_candidate_order_and_limit_applies() {
        let nutrition = Nutrition::new(500.0, 40.0, 40.0, 15.0);
        let candidates: Vec<Recipe> = (0..8).map(|i| recipe(&format!("r{i}"), nutrition)).collect();
        let request = post_workout_request(TargetMacros::new(500.0, 40.0, 40.0, 15.0));

        let matcher = RecipeMatcher::default();
        let response = matcher.rank(&candidates, &request);
        assert_eq!(response.total, 8);
        assert_eq!(response.recipe_ids(), vec!["r0", "r1", "r2", "r3", "r4"]);

        let limited = matcher.rank(&candidates, &request.clone().with_limit(2));
        assert_eq!(limited.recipe_ids(), vec!["r0", "r1"]);

        let capped = matcher.rank(&candidates, &request.with_limit(500));
        assert_eq!(capped.recipes.len(), 8);
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let nutrition = Nutrition::new(500.0, 40.0, 40.0, 15.0);
        let plain = recipe("plain", Nutrition::new(490.0, 40.0, 40.0, 15.0));
        let preferred = recipe("preferred", nutrition).with_flags(DietaryFlags {
            quick_prep: true,
            ..DietaryFlags::default()
        });
        let off_target = recipe("off", Nutrition::new(450.0, 40.0, 40.0, 15.0));
        let request = MatchRequest::new(
            TargetMacros::new(500.0, 40.0, 40.0, 15.0),
            MealContext::new(SlotType::Meal, "Lunch"),
        );

        let response = RecipeMatcher::default().rank(&[off_target, plain, preferred], &request);
        assert_eq!(response.recipe_ids(), vec!["preferred", "plain", "off"]);
        assert_eq!(response.recipes[0].match_reasons, vec!["Quick to prepare".to_owned()]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let candidates = vec![
            recipe("a", Nutrition::new(420.0, 35.0, 40.0, 12.0)),
            recipe("b", Nutrition::new(380.0, 28.0, 45.0, 10.0)),
            recipe("c", Nutrition::new(510.0, 44.0, 38.0, 18.0)),
        ];
        let request = post_workout_request(TargetMacros::new(500.0, 40.0, 40.0, 15.0));
        let matcher = RecipeMatcher::default();

        assert_eq!(matcher.rank(&candidates, &request), matcher.rank(&candidates, &request));
    }
}
