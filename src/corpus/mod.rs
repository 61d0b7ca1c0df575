// ABOUTME: Read-only recipe corpus abstraction used by the matching service
// ABOUTME: Defines the RecipeCorpus trait, the candidate query, and its implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Corpus
//!
//! The corpus is owned by a separate authoring workflow. The matching service
//! only pulls a bounded candidate snapshot per request and never writes back.
//! Implementations return active recipes only, in a stable order, and report
//! read failures as `ErrorCode::CorpusUnavailable`.

use async_trait::async_trait;
use macro_match_core::constants::selection::CANDIDATE_POOL_SIZE;
use macro_match_core::errors::AppResult;
use macro_match_core::models::{DietPreferences, Recipe};
use macro_match_engine::DietaryRequirements;

/// Vec-backed corpus loaded from memory or a JSON file
pub mod memory;
/// Built-in sample recipes for seeding and demos
pub mod sample;
/// `SQLite`-backed corpus
pub mod sqlite;

pub use memory::InMemoryCorpus;
pub use sqlite::SqliteCorpus;

/// Coarse pre-filter applied by the corpus before the engine runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    /// Only recipes flagged vegetarian (or vegan)
    pub vegetarian_only: bool,
    /// Only recipes flagged vegan
    pub vegan_only: bool,
    /// Recipe ids to leave out
    pub exclude_ids: Vec<String>,
    /// Maximum number of candidates
    pub limit: usize,
}

impl Default for CandidateQuery {
    fn default() -> Self {
        Self {
            vegetarian_only: false,
            vegan_only: false,
            exclude_ids: Vec::new(),
            limit: CANDIDATE_POOL_SIZE,
        }
    }
}

impl CandidateQuery {
    /// Build a query from diet preferences and an exclusion list
    #[must_use]
    pub fn for_preferences(
        preferences: &DietPreferences,
        exclude_ids: &[String],
        limit: usize,
    ) -> Self {
        let requirements = DietaryRequirements::from_preferences(preferences);
        Self {
            vegetarian_only: requirements.vegetarian,
            vegan_only: requirements.vegan,
            exclude_ids: exclude_ids.to_vec(),
            limit,
        }
    }

    /// Whether a recipe passes this query
    #[must_use]
    pub fn admits(&self, recipe: &Recipe) -> bool {
        if !recipe.is_active || self.exclude_ids.iter().any(|id| id == &recipe.id) {
            return false;
        }
        if self.vegan_only && !recipe.flags.vegan {
            return false;
        }
        if self.vegetarian_only && !(recipe.flags.vegetarian || recipe.flags.vegan) {
            return false;
        }
        true
    }
}

/// Read-only access to a recipe corpus
#[async_trait]
pub trait RecipeCorpus: Send + Sync {
    /// Fetch up to `query.limit` active candidates, in corpus order
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` when the corpus cannot be read
    async fn fetch_candidates(&self, query: &CandidateQuery) -> AppResult<Vec<Recipe>>;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_match_core::models::{DietaryFlags, Nutrition};

    fn recipe(id: &str, flags: DietaryFlags) -> Recipe {
        Recipe::new(id, id, "lunch", Nutrition::new(400.0, 30.0, 40.0, 10.0)).with_flags(flags)
    }

    #[test]
    fn test_query_from_vegan_pattern() {
        let preferences = DietPreferences {
            dietary_pattern: Some("Vegan".to_owned()),
            ..DietPreferences::default()
        };
        let query = CandidateQuery::for_preferences(&preferences, &["x".to_owned()], 10);
        assert!(query.vegan_only);
        assert_eq!(query.exclude_ids, vec!["x".to_owned()]);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_vegetarian_query_accepts_vegan_recipes() {
        let query = CandidateQuery {
            vegetarian_only: true,
            ..CandidateQuery::default()
        };
        let vegan = recipe(
            "v",
            DietaryFlags {
                vegan: true,
                ..DietaryFlags::default()
            },
        );
        assert!(query.admits(&vegan));
        assert!(!query.admits(&recipe("m", DietaryFlags::default())));
    }

    #[test]
    fn test_query_rejects_inactive_and_excluded() {
        let query = CandidateQuery {
            exclude_ids: vec!["gone".to_owned()],
            ..CandidateQuery::default()
        };
        assert!(!query.admits(&recipe("gone", DietaryFlags::default())));
        assert!(!query.admits(&recipe("off", DietaryFlags::default()).inactive()));
        assert!(query.admits(&recipe("ok", DietaryFlags::default())));
    }
}
