// ABOUTME: Core data models for recipe matching requests and responses
// ABOUTME: Re-exports recipe corpus rows, request types, and scaled recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Recipe corpus rows with per-serving nutrition and dietary flags
pub mod recipe;
/// Match request: target macros, meal context, and diet preferences
pub mod request;
/// Scaled recommendations and the response envelope
pub mod recommendation;

pub use recipe::{DietaryFlags, Nutrition, Recipe, RecipeIngredient};
pub use recommendation::{
    FilterSummary, MacroVariance, RecommendationResponse, ScaledRecommendation,
};
pub use request::{
    DietPreferences, MacroSplit, MatchRequest, MealContext, SlotType, TargetMacros, TimeOfDay,
    WorkoutRelation,
};
