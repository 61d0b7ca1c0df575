// ABOUTME: Main library entry point for the recipe matching service
// ABOUTME: Wires recipe corpora, the matching engine, logging, and runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Match
//!
//! Selects recipes from a corpus that best approximate a meal slot's macro
//! target, scales each one to the serving count that fits, and ranks them
//! with the reasons behind each score.
//!
//! ## Architecture
//!
//! - **Corpus**: read-only recipe sources (`InMemoryCorpus`, `SqliteCorpus`)
//!   behind the `RecipeCorpus` trait
//! - **Engine** (`macro_match_engine`): safety filter, portion scaler,
//!   variance evaluator, match scorer, and ranker
//! - **Services**: request orchestration, one slot or a whole day
//! - **Config**: engine tuning via `MATCHING_*` and corpus selection via
//!   `CORPUS_SOURCE`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macro_match::corpus::InMemoryCorpus;
//! use macro_match::errors::AppResult;
//! use macro_match::models::{MatchRequest, MealContext, SlotType, TargetMacros};
//! use macro_match::services::RecipeMatchingService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let corpus = InMemoryCorpus::from_json_file("recipes.json")?;
//!     let service = RecipeMatchingService::with_global_config(corpus);
//!
//!     let request = MatchRequest::new(
//!         TargetMacros::new(500.0, 40.0, 45.0, 15.0),
//!         MealContext::new(SlotType::Meal, "Lunch"),
//!     );
//!     let response = service.recommend(&request).await?;
//!     println!("{} recipes matched", response.total);
//!     Ok(())
//! }
//! ```

/// Runtime configuration loaded from the environment
pub mod config;

/// Recipe corpus accessors
pub mod corpus;

/// Structured logging setup
pub mod logging;

/// Matching orchestration over a corpus
pub mod services;

/// Error types shared with the core crate
pub mod errors {
    pub use macro_match_core::errors::{AppError, AppResult, ErrorCode};
}

/// Domain models shared with the core crate
pub mod models {
    pub use macro_match_core::models::{
        DietPreferences, DietaryFlags, FilterSummary, MacroSplit, MacroVariance, MatchRequest,
        MealContext, Nutrition, Recipe, RecipeIngredient, RecommendationResponse,
        ScaledRecommendation, SlotType, TargetMacros, TimeOfDay, WorkoutRelation,
    };
}

pub use macro_match_core::constants;
pub use macro_match_engine as engine;
