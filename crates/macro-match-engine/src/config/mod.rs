// ABOUTME: Matching engine configuration with defaults, validation, and env overrides
// ABOUTME: Orchestrates scoring weights, scaling bounds, selection limits, and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Matching Engine Configuration
//!
//! Every tunable of the engine lives here so the heuristic can be adjusted
//! and unit-tested in isolation from orchestration.
//!
//! # Module Structure
//!
//! - `weights` - Scorer penalties and bonuses
//! - `meal_timing` - Macro splits used to derive slot targets from calories
//! - `error` - Validation and parse errors
//!
//! Defaults can be overridden with `MATCHING_*` environment variables; see
//! [`MatchingConfig::load`].

/// Configuration validation and parse errors
pub mod error;
/// Per-timing macro splits for deriving slot targets
pub mod meal_timing;
/// Scoring weights table
pub mod weights;

pub use error::ConfigError;
pub use meal_timing::MealTimingMacrosConfig;
pub use weights::ScoringWeights;

use macro_match_core::constants::{selection, servings};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static MATCHING_CONFIG: OnceLock<MatchingConfig> = OnceLock::new();

/// Portion scaling bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Smallest serving multiplier (0.5)
    pub min_servings: f64,
    /// Largest serving multiplier (3.0)
    pub max_servings: f64,
    /// Calorie ceiling when protein drives the multiplier (1.10 = target + 10%)
    pub calorie_cap_factor: f64,
    /// Use protein-first scaling on rest days as well as training days
    pub protein_first_on_rest_days: bool,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_servings: servings::MIN_SERVINGS,
            max_servings: servings::MAX_SERVINGS,
            calorie_cap_factor: servings::CALORIE_CAP_FACTOR,
            protein_first_on_rest_days: false,
        }
    }
}

/// Candidate selection limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Results returned when the request has no limit
    pub default_limit: usize,
    /// Largest limit a request may ask for
    pub max_limit: usize,
    /// Candidates pulled from the corpus before filtering
    pub candidate_pool_size: usize,
    /// Calorie variance (percent) above which a recipe is discarded
    pub max_calorie_variance_pct: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_limit: selection::DEFAULT_LIMIT,
            max_limit: selection::MAX_LIMIT,
            candidate_pool_size: selection::CANDIDATE_POOL_SIZE,
            max_calorie_variance_pct: selection::MAX_CALORIE_VARIANCE_PCT,
        }
    }
}

/// Main matching engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Scorer penalties and bonuses
    pub weights: ScoringWeights,
    /// Serving multiplier bounds
    pub scaling: ScalingConfig,
    /// Result and candidate limits
    pub selection: SelectionConfig,
    /// Macro splits per meal timing
    pub meal_timing_macros: MealTimingMacrosConfig,
}

impl MatchingConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        MATCHING_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load matching config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first range, weight, or split violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scaling = &self.scaling;
        if !scaling.min_servings.is_finite() || scaling.min_servings <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "min_servings must be positive, got {}",
                scaling.min_servings
            )));
        }
        if !scaling.max_servings.is_finite() || scaling.min_servings > scaling.max_servings {
            return Err(ConfigError::InvalidRange(
                "min_servings must be <= max_servings",
            ));
        }
        if !scaling.calorie_cap_factor.is_finite() || scaling.calorie_cap_factor < 1.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "calorie_cap_factor must be >= 1.0, got {}",
                scaling.calorie_cap_factor
            )));
        }

        let selection = &self.selection;
        if selection.max_limit == 0 || selection.default_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_limit and max_limit must be at least 1".to_owned(),
            ));
        }
        if selection.default_limit > selection.max_limit {
            return Err(ConfigError::InvalidRange(
                "default_limit must be <= max_limit",
            ));
        }
        if selection.candidate_pool_size < selection.max_limit {
            return Err(ConfigError::InvalidRange(
                "candidate_pool_size must be >= max_limit",
            ));
        }
        if !selection.max_calorie_variance_pct.is_finite()
            || selection.max_calorie_variance_pct <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(format!(
                "max_calorie_variance_pct must be positive, got {}",
                selection.max_calorie_variance_pct
            )));
        }

        self.weights.validate()?;
        self.meal_timing_macros.validate()?;

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Scaling overrides
        Self::apply_env_var("MATCHING_MIN_SERVINGS", &mut self.scaling.min_servings)?;
        Self::apply_env_var("MATCHING_MAX_SERVINGS", &mut self.scaling.max_servings)?;
        Self::apply_env_var(
            "MATCHING_CALORIE_CAP_FACTOR",
            &mut self.scaling.calorie_cap_factor,
        )?;
        Self::apply_env_var(
            "MATCHING_PROTEIN_FIRST_ON_REST_DAYS",
            &mut self.scaling.protein_first_on_rest_days,
        )?;

        // Selection overrides
        Self::apply_env_var("MATCHING_DEFAULT_LIMIT", &mut self.selection.default_limit)?;
        Self::apply_env_var("MATCHING_MAX_LIMIT", &mut self.selection.max_limit)?;
        Self::apply_env_var(
            "MATCHING_CANDIDATE_POOL_SIZE",
            &mut self.selection.candidate_pool_size,
        )?;
        Self::apply_env_var(
            "MATCHING_MAX_CALORIE_VARIANCE_PCT",
            &mut self.selection.max_calorie_variance_pct,
        )?;

        // Scoring weight overrides
        let weights = &mut self.weights;
        Self::apply_env_var(
            "MATCHING_CALORIE_VARIANCE_PENALTY",
            &mut weights.calorie_variance_penalty,
        )?;
        Self::apply_env_var(
            "MATCHING_PROTEIN_VARIANCE_PENALTY",
            &mut weights.protein_variance_penalty,
        )?;
        Self::apply_env_var(
            "MATCHING_EMPHASIZED_FOOD_BONUS",
            &mut weights.emphasized_food_bonus,
        )?;
        Self::apply_env_var(
            "MATCHING_PREFERRED_PROTEIN_BONUS",
            &mut weights.preferred_protein_bonus,
        )?;
        Self::apply_env_var(
            "MATCHING_PREFERRED_CARB_BONUS",
            &mut weights.preferred_carb_bonus,
        )?;
        Self::apply_env_var(
            "MATCHING_PREFERRED_VEGETABLE_BONUS",
            &mut weights.preferred_vegetable_bonus,
        )?;
        Self::apply_env_var("MATCHING_PRE_WORKOUT_BONUS", &mut weights.pre_workout_bonus)?;
        Self::apply_env_var(
            "MATCHING_POST_WORKOUT_BONUS",
            &mut weights.post_workout_bonus,
        )?;
        Self::apply_env_var(
            "MATCHING_TRAINING_DAY_HIGH_PROTEIN_BONUS",
            &mut weights.training_day_high_protein_bonus,
        )?;
        Self::apply_env_var("MATCHING_MEAL_PREP_BONUS", &mut weights.meal_prep_bonus)?;
        Self::apply_env_var("MATCHING_QUICK_PREP_BONUS", &mut weights.quick_prep_bonus)?;
        Self::apply_env_var(
            "MATCHING_MORNING_BREAKFAST_BONUS",
            &mut weights.morning_breakfast_bonus,
        )?;
        Self::apply_env_var(
            "MATCHING_EVENING_DINNER_BONUS",
            &mut weights.evening_dinner_bonus,
        )?;
        Self::apply_env_var("MATCHING_SNACK_BONUS", &mut weights.snack_bonus)?;
        Self::apply_env_var(
            "MATCHING_SNACK_CALORIE_THRESHOLD",
            &mut weights.snack_calorie_threshold,
        )?;

        Ok(self)
    }
}
