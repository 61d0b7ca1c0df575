// ABOUTME: In-memory recipe corpus backed by a Vec, optionally loaded from a JSON file
// ABOUTME: Preserves insertion order so ranking ties resolve the same way on every run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use macro_match_core::errors::{AppError, AppResult};
use macro_match_core::models::Recipe;
use tracing::debug;

use super::{CandidateQuery, RecipeCorpus};

/// Recipe corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    recipes: Vec<Recipe>,
}

impl InMemoryCorpus {
    /// Create a corpus from recipes, keeping their order
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Load a JSON array of recipes
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` if the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::corpus_unavailable(format!(
                "Failed to read recipe file {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;
        let recipes: Vec<Recipe> = serde_json::from_str(&raw).map_err(|e| {
            AppError::corpus_unavailable(format!(
                "Failed to parse recipe file {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;
        debug!(path = %path.display(), count = recipes.len(), "Loaded recipe corpus");
        Ok(Self::new(recipes))
    }

    /// Number of recipes, active or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the corpus holds no recipes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes in corpus order
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

#[async_trait]
impl RecipeCorpus for InMemoryCorpus {
    async fn fetch_candidates(&self, query: &CandidateQuery) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| query.admits(recipe))
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
