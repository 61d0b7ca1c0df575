// ABOUTME: Recipe matching engine matching corpus recipes to per-slot macro targets
// ABOUTME: Safety filter, portion scaler, variance evaluator, match scorer, and ranker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Match Engine
//!
//! Given a target macro profile and the context of a meal slot, the engine
//! turns a candidate recipe set into a ranked list of scaled recommendations.
//!
//! ## Pipeline
//!
//! 1. **Completeness**: recipes without ingredients, directions, or usable
//!    calories are skipped.
//! 2. **Safety**: allergens, avoided foods, and dietary-pattern violations are
//!    excluded before anything is scored.
//! 3. **Scaling**: a serving multiplier is chosen protein-first (capped by
//!    calories) or calorie-first, then clamped to the serving bounds.
//! 4. **Variance**: scaled macros are compared with the target; recipes too
//!    far off in calories are dropped.
//! 5. **Scoring**: a hand-tuned linear heuristic produces a 0-100 score and
//!    the reasons behind it.
//! 6. **Ranking**: survivors are stably sorted by score and truncated.
//!
//! The engine is a pure function of its inputs. It never reads the corpus
//! itself; callers hand it a candidate snapshot.

/// Engine configuration: scoring weights, scaling bounds, selection limits
pub mod config;
/// Candidate evaluation and ranking
pub mod ranking;
/// Allergen, avoided-food, and dietary-pattern exclusion
pub mod safety;
/// Serving multiplier search
pub mod scaling;
/// Linear match scoring with reasons
pub mod scoring;
/// Deviation of scaled macros from target
pub mod variance;

pub use config::{
    ConfigError, MatchingConfig, MealTimingMacrosConfig, ScalingConfig, ScoringWeights,
    SelectionConfig,
};
pub use ranking::{Evaluation, RecipeMatcher};
pub use safety::{DietaryRequirements, ExclusionReason, SafetyFilter, SafetyVerdict};
pub use scaling::{PortionScaler, ScaleResult, ScalingPriority};
pub use scoring::{MatchScore, MatchScorer, PreferenceTerms};
pub use variance::{evaluate_variance, exceeds_calorie_cutoff};
