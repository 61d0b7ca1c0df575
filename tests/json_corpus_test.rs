// ABOUTME: Integration tests for JSON-file corpora and corpus source selection
// ABOUTME: Loads recipe arrays from temp files and opens each corpus source kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Corpus source tests
//!
//! Tests for loading recipes from JSON and opening corpora from a source string.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use common::{exact_recipe, lunch_request};
use macro_match::config::CorpusSource;
use macro_match::corpus::sample::sample_recipes;
use macro_match::corpus::{CandidateQuery, InMemoryCorpus, RecipeCorpus};
use macro_match::engine::MatchingConfig;
use macro_match::errors::ErrorCode;
use macro_match::models::{MatchRequest, Recipe};
use macro_match::services::{DayRequest, RecipeMatchingService};
use tempfile::TempDir;

const RECIPES_JSON: &str = r#"[
  {
    "id": "tofu-bowl",
    "name": "Tofu Bowl",
    "category": "lunch",
    "nutrition": { "calories": 450, "protein": 28, "carbs": 50, "fat": 14 },
    "ingredients": [{ "item": "firm tofu", "amount": "150 g" }, { "item": "brown rice", "amount": "1 cup" }],
    "directions": ["Press tofu", "Pan-fry and serve over rice"],
    "flags": { "vegan": true, "vegetarian": true },
    "tags": ["lunch"]
  },
  {
    "id": "retired",
    "name": "Retired Dish",
    "category": "dinner",
    "nutrition": { "calories": 500, "protein": 30, "carbs": 40, "fat": 20 },
    "ingredients": [{ "item": "beef", "amount": "200 g" }],
    "directions": ["Cook"],
    "isActive": false
  }
]"#;

fn write_recipes(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("recipes.json");
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// JSON Corpus
// ============================================================================

#[tokio::test]
async fn test_json_corpus_loads_and_filters_inactive() {
    let dir = TempDir::new().unwrap();
    let path = write_recipes(&dir, RECIPES_JSON);

    let corpus = InMemoryCorpus::from_json_file(&path).unwrap();
    assert_eq!(corpus.len(), 2);

    let candidates = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, "tofu-bowl");
    assert!(candidates[0].flags.vegan);
    assert!(candidates[0].is_complete());
}

#[test]
fn test_missing_file_is_corpus_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = InMemoryCorpus::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code, ErrorCode::CorpusUnavailable);
}

#[test]
fn test_malformed_file_is_corpus_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = write_recipes(&dir, "{ not an array");
    let err = InMemoryCorpus::from_json_file(&path).unwrap_err();
    assert_eq!(err.code, ErrorCode::CorpusUnavailable);
}

// ============================================================================
// Corpus Sources
// ============================================================================

#[tokio::test]
async fn test_open_json_source() {
    let dir = TempDir::new().unwrap();
    let path = write_recipes(&dir, RECIPES_JSON);
    let source = CorpusSource::parse(&format!("json:{}", path.display())).unwrap();

    let corpus = source.open().await.unwrap();
    let candidates = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
}

#[tokio::test]
async fn test_open_sample_source() {
    let corpus = CorpusSource::Sample.open().await.unwrap();
    let candidates = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert_eq!(candidates.len(), sample_recipes().len());
}

#[tokio::test]
async fn test_open_memory_sqlite_source_starts_empty() {
    let corpus = CorpusSource::SqliteMemory.open().await.unwrap();
    assert_eq!(corpus.name(), "sqlite");
    let candidates = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_open_missing_json_source_fails() {
    let source = CorpusSource::parse("json:/definitely/not/here.json").unwrap();
    let err = source.open().await.err().unwrap();
    assert_eq!(err.code, ErrorCode::CorpusUnavailable);
}

#[tokio::test]
async fn test_service_over_json_corpus() {
    let dir = TempDir::new().unwrap();
    let recipes = vec![exact_recipe("one"), exact_recipe("two")];
    let path = write_recipes(&dir, &serde_json::to_string(&recipes).unwrap());

    let service = RecipeMatchingService::new(
        CorpusSource::Json { path }.open().await.unwrap(),
        MatchingConfig::default(),
    )
    .unwrap();

    let response = service.recommend(&lunch_request()).await.unwrap();
    assert_eq!(response.recipe_ids(), vec!["one", "two"]);
}

// ============================================================================
// Demo Files
// ============================================================================

#[tokio::test]
async fn test_demo_files_drive_the_service() {
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
    let corpus = InMemoryCorpus::from_json_file(demos.join("recipes.json")).unwrap();
    assert!(corpus.recipes().iter().all(Recipe::is_complete));

    let request: MatchRequest =
        serde_json::from_str(&fs::read_to_string(demos.join("lunch_request.json")).unwrap())
            .unwrap();
    let day: DayRequest =
        serde_json::from_str(&fs::read_to_string(demos.join("day_request.json")).unwrap())
            .unwrap();
    assert_eq!(day.slots.len(), 4);

    let service = RecipeMatchingService::new(
        Arc::new(InMemoryCorpus::new(sample_recipes())),
        MatchingConfig::default(),
    )
    .unwrap();
    let response = service.recommend(&request).await.unwrap();
    assert!(response.recipes.len() <= 3);

    let plan = service.recommend_for_day(&day).await.unwrap();
    let mut ids: Vec<&str> = plan
        .iter()
        .flat_map(|slot| slot.response.recipe_ids())
        .collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}
