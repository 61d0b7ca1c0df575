// ABOUTME: Recipe matching service pulling candidates from a corpus and ranking them
// ABOUTME: Handles single-slot requests and day requests that never repeat a recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use macro_match_core::errors::{AppError, AppResult};
use macro_match_core::models::{
    DietPreferences, MatchRequest, MealContext, RecommendationResponse, TargetMacros,
};
use macro_match_engine::{MatchingConfig, RecipeMatcher};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument, Span};

use crate::corpus::{CandidateQuery, RecipeCorpus};
use crate::logging::{create_match_span, record_match_outcome};

/// One slot of a day request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    /// Macro profile for this slot
    pub target_macros: TargetMacros,
    /// Slot context
    pub meal_context: MealContext,
    /// Number of recommendations wanted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SlotRequest {
    /// Create a slot with the default limit
    #[must_use]
    pub const fn new(target_macros: TargetMacros, meal_context: MealContext) -> Self {
        Self {
            target_macros,
            meal_context,
            limit: None,
        }
    }

    fn to_match_request(&self, preferences: &DietPreferences, excluded: &[String]) -> MatchRequest {
        MatchRequest {
            target_macros: self.target_macros,
            meal_context: self.meal_context.clone(),
            diet_preferences: preferences.clone(),
            exclude_recipes: excluded.to_vec(),
            limit: self.limit,
        }
    }
}

/// All slots of one day sharing diet preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRequest {
    /// Slots in the order they should be filled
    pub slots: Vec<SlotRequest>,
    /// Preferences applied to every slot
    #[serde(default)]
    pub diet_preferences: DietPreferences,
    /// Recipe ids already used elsewhere in the plan
    #[serde(default)]
    pub exclude_recipes: Vec<String>,
}

/// Recommendations for one slot of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecommendation {
    /// Slot label from the meal context
    pub slot_label: String,
    /// Ranked recommendations for the slot
    pub response: RecommendationResponse,
}

/// Matches requests against a recipe corpus
///
/// The corpus read is the only fallible step: its failures surface as
/// `ErrorCode::CorpusUnavailable`. A request that matches nothing returns an
/// empty response, never an error.
#[derive(Clone)]
pub struct RecipeMatchingService {
    corpus: Arc<dyn RecipeCorpus>,
    matcher: RecipeMatcher,
}

impl RecipeMatchingService {
    /// Create a service with an explicit engine configuration
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigInvalid` if the configuration fails validation
    pub fn new(corpus: Arc<dyn RecipeCorpus>, config: MatchingConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            corpus,
            matcher: RecipeMatcher::new(config),
        })
    }

    /// Create a service using the global engine configuration
    #[must_use]
    pub fn with_global_config(corpus: impl RecipeCorpus + 'static) -> Self {
        Self {
            corpus: Arc::new(corpus),
            matcher: RecipeMatcher::from_global(),
        }
    }

    /// Engine in use
    #[must_use]
    pub const fn matcher(&self) -> &RecipeMatcher {
        &self.matcher
    }

    /// Recommend recipes for one slot
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` for negative or non-finite targets, or
    /// `ErrorCode::CorpusUnavailable` if the corpus cannot be read
    pub async fn recommend(&self, request: &MatchRequest) -> AppResult<RecommendationResponse> {
        request.validate()?;
        let span = create_match_span("recommend", &request.meal_context.slot_label);
        self.recommend_in_span(request, &span)
            .instrument(span.clone())
            .await
    }

    async fn recommend_in_span(
        &self,
        request: &MatchRequest,
        span: &Span,
    ) -> AppResult<RecommendationResponse> {
        let started = Instant::now();
        let query = CandidateQuery::for_preferences(
            &request.diet_preferences,
            &request.exclude_recipes,
            self.matcher.config().selection.candidate_pool_size,
        );

        let candidates = self.corpus.fetch_candidates(&query).await?;
        let response = self.matcher.rank(&candidates, request);

        let summary = &response.summary;
        info!(
            corpus = self.corpus.name(),
            candidates = summary.candidates,
            unsafe_excluded = summary.unsafe_excluded,
            over_variance = summary.over_variance,
            survivors = summary.survivors,
            returned = response.recipes.len(),
            "Recipe match complete"
        );
        record_match_outcome(
            span,
            response.recipes.len(),
            started.elapsed().as_millis() as u64,
        );

        Ok(response)
    }

    /// Recommend recipes for every slot of a day
    ///
    /// Slots run in order; recipes returned for a slot are excluded from every
    /// later slot so the day never repeats a recipe.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` for an empty slot list or an invalid
    /// slot, or `ErrorCode::CorpusUnavailable` if the corpus cannot be read
    pub async fn recommend_day(
        &self,
        slots: &[SlotRequest],
        preferences: &DietPreferences,
    ) -> AppResult<Vec<SlotRecommendation>> {
        self.recommend_day_excluding(slots, preferences, &[]).await
    }

    /// Recommend a day, starting from ids already used elsewhere in the plan
    ///
    /// # Errors
    ///
    /// Same as [`Self::recommend_day`]
    pub async fn recommend_day_excluding(
        &self,
        slots: &[SlotRequest],
        preferences: &DietPreferences,
        already_used: &[String],
    ) -> AppResult<Vec<SlotRecommendation>> {
        if slots.is_empty() {
            return Err(AppError::invalid_input("Day request has no slots"));
        }

        let mut excluded = already_used.to_vec();
        let mut results = Vec::with_capacity(slots.len());
        for slot in slots {
            let response = self
                .recommend(&slot.to_match_request(preferences, &excluded))
                .await?;
            excluded.extend(response.recipes.iter().map(|r| r.recipe_id.clone()));
            results.push(SlotRecommendation {
                slot_label: slot.meal_context.slot_label.clone(),
                response,
            });
        }
        Ok(results)
    }

    /// Run a day request
    ///
    /// # Errors
    ///
    /// Same as [`Self::recommend_day`]
    pub async fn recommend_for_day(&self, request: &DayRequest) -> AppResult<Vec<SlotRecommendation>> {
        self.recommend_day_excluding(
            &request.slots,
            &request.diet_preferences,
            &request.exclude_recipes,
        )
        .await
    }
}
