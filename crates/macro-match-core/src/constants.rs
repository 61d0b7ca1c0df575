// ABOUTME: Engine-wide constants for recipe matching and portion scaling
// ABOUTME: Serving bounds, selection limits, and macronutrient energy densities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Serving multiplier bounds applied after portion scaling
pub mod servings {
    /// Smallest serving multiplier ever recommended
    pub const MIN_SERVINGS: f64 = 0.5;
    /// Largest serving multiplier ever recommended
    pub const MAX_SERVINGS: f64 = 3.0;
    /// Multiplier used when no ratio can be computed
    pub const NEUTRAL_SERVINGS: f64 = 1.0;
    /// Calorie headroom allowed when protein drives the multiplier (10% over target)
    pub const CALORIE_CAP_FACTOR: f64 = 1.10;
}

/// Candidate selection limits
pub mod selection {
    /// Number of recommendations returned when the caller does not ask for a count
    pub const DEFAULT_LIMIT: usize = 5;
    /// Upper bound on recommendations a single request may ask for
    pub const MAX_LIMIT: usize = 20;
    /// Candidates pulled from the corpus before filtering
    pub const CANDIDATE_POOL_SIZE: usize = 50;
    /// Calorie percentage variance above which a recipe is discarded
    pub const MAX_CALORIE_VARIANCE_PCT: f64 = 30.0;
}

/// Energy density of macronutrients (kcal per gram)
pub mod energy {
    /// Protein: 4 kcal/g
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Carbohydrate: 4 kcal/g
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// Fat: 9 kcal/g
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Heuristic thresholds used by the scorer
pub mod scoring {
    /// Starting score before penalties and bonuses
    pub const BASE_SCORE: f64 = 100.0;
    /// Lowest score ever reported
    pub const MIN_SCORE: f64 = 0.0;
    /// Highest score ever reported
    pub const MAX_SCORE: f64 = 100.0;
    /// Recipes under this many calories count as snacks
    pub const SNACK_CALORIE_THRESHOLD: f64 = 300.0;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name for the matching engine
    pub const MACRO_MATCH: &str = "macro-match";
}
