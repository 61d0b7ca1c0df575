// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides recipe builders, request builders, and a failing corpus stub
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]

use async_trait::async_trait;
use macro_match::corpus::{CandidateQuery, RecipeCorpus};
use macro_match::errors::{AppError, AppResult};
use macro_match::models::{
    DietaryFlags, MatchRequest, MealContext, Nutrition, Recipe, SlotType, TargetMacros,
    WorkoutRelation,
};

/// A complete recipe with one ingredient per item and a single direction
pub fn recipe(id: &str, nutrition: Nutrition, items: &[&str]) -> Recipe {
    items
        .iter()
        .fold(
            Recipe::new(id, format!("Recipe {id}"), "lunch", nutrition),
            |r, item| r.with_ingredient(*item, "1 serving"),
        )
        .with_direction("Prepare and serve")
}

/// A recipe exactly matching `standard_target`
pub fn exact_recipe(id: &str) -> Recipe {
    recipe(
        id,
        Nutrition::new(500.0, 40.0, 40.0, 15.0),
        &["chicken breast", "rice"],
    )
}

/// 500 kcal, 40 g protein, 40 g carbs, 15 g fat
pub const fn standard_target() -> TargetMacros {
    TargetMacros::new(500.0, 40.0, 40.0, 15.0)
}

/// Lunch on a rest day
pub fn lunch_request() -> MatchRequest {
    MatchRequest::new(standard_target(), MealContext::new(SlotType::Meal, "Lunch"))
}

/// Post-workout meal on a training day
pub fn post_workout_request(target: TargetMacros) -> MatchRequest {
    MatchRequest::new(
        target,
        MealContext::new(SlotType::Meal, "Post-workout").with_workout(WorkoutRelation::PostWorkout, true),
    )
}

/// Flags for a recipe suited to post-workout recovery
pub fn recovery_flags() -> DietaryFlags {
    DietaryFlags {
        high_protein: true,
        post_workout_suitable: true,
        ..DietaryFlags::default()
    }
}

/// Corpus whose reads always fail
pub struct UnavailableCorpus;

#[async_trait]
impl RecipeCorpus for UnavailableCorpus {
    async fn fetch_candidates(&self, _query: &CandidateQuery) -> AppResult<Vec<Recipe>> {
        Err(AppError::corpus_unavailable("recipe store offline"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
