// ABOUTME: Integration tests for the SQLite recipe corpus
// ABOUTME: Covers schema creation, seeding, candidate filters, ordering, and file databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite corpus tests
//!
//! Tests for storing recipes and pulling candidate snapshots from `SQLite`.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use common::{exact_recipe, lunch_request};
use macro_match::corpus::sample::sample_recipes;
use macro_match::corpus::{CandidateQuery, RecipeCorpus, SqliteCorpus};
use macro_match::errors::ErrorCode;
use macro_match::engine::MatchingConfig;
use macro_match::models::{DietaryFlags, Nutrition, Recipe};
use macro_match::services::RecipeMatchingService;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn memory_corpus() -> SqliteCorpus {
    SqliteCorpus::connect("sqlite::memory:").await.unwrap()
}

fn vegan_recipe(id: &str) -> Recipe {
    exact_recipe(id).with_flags(DietaryFlags {
        vegan: true,
        vegetarian: true,
        ..DietaryFlags::default()
    })
}

fn vegetarian_recipe(id: &str) -> Recipe {
    exact_recipe(id).with_flags(DietaryFlags {
        vegetarian: true,
        ..DietaryFlags::default()
    })
}

// ============================================================================
// Schema and Seeding
// ============================================================================

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let corpus = memory_corpus().await;
    corpus.migrate().await.unwrap();
    assert_eq!(corpus.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_and_read_back_full_recipe() {
    let corpus = memory_corpus().await;
    let recipe = exact_recipe("bowl")
        .with_tag("Lunch")
        .with_image("https://img.example/bowl.jpg")
        .with_flags(DietaryFlags {
            high_protein: true,
            meal_prep_friendly: true,
            ..DietaryFlags::default()
        });
    corpus.insert_recipe(&recipe).await.unwrap();

    let fetched = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();

    assert_eq!(fetched, vec![recipe]);
}

#[tokio::test]
async fn test_insert_replaces_existing_id() {
    let corpus = memory_corpus().await;
    corpus.insert_recipe(&exact_recipe("bowl")).await.unwrap();

    let mut updated = exact_recipe("bowl");
    updated.nutrition = Nutrition::new(600.0, 50.0, 45.0, 18.0);
    corpus.insert_recipe(&updated).await.unwrap();

    assert_eq!(corpus.count().await.unwrap(), 1);
    let fetched = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert!((fetched[0].nutrition.calories - 600.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_seed_sample_recipes() {
    let corpus = memory_corpus().await;
    let inserted = corpus.insert_all(&sample_recipes()).await.unwrap();

    assert_eq!(inserted, sample_recipes().len());
    assert_eq!(corpus.count().await.unwrap(), inserted as i64);
}

// ============================================================================
// Candidate Filters
// ============================================================================

#[tokio::test]
async fn test_inactive_recipes_are_not_candidates() {
    let corpus = memory_corpus().await;
    corpus.insert_recipe(&exact_recipe("live")).await.unwrap();
    corpus
        .insert_recipe(&exact_recipe("retired").inactive())
        .await
        .unwrap();

    let fetched = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    let ids: Vec<_> = fetched.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["live"]);
}

#[tokio::test]
async fn test_vegetarian_query_accepts_vegan_recipes() {
    let corpus = memory_corpus().await;
    corpus
        .insert_all(&[
            exact_recipe("meat"),
            vegetarian_recipe("veggie"),
            vegan_recipe("plant"),
        ])
        .await
        .unwrap();

    let vegetarian = corpus
        .fetch_candidates(&CandidateQuery {
            vegetarian_only: true,
            ..CandidateQuery::default()
        })
        .await
        .unwrap();
    let ids: Vec<_> = vegetarian.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["veggie", "plant"]);

    let vegan = corpus
        .fetch_candidates(&CandidateQuery {
            vegan_only: true,
            ..CandidateQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(vegan.len(), 1);
    assert_eq!(vegan[0].id, "plant");
}

#[tokio::test]
async fn test_exclusions_order_and_limit() {
    let corpus = memory_corpus().await;
    let recipes: Vec<_> = (0..6).map(|i| exact_recipe(&format!("r{i}"))).collect();
    corpus.insert_all(&recipes).await.unwrap();

    let fetched = corpus
        .fetch_candidates(&CandidateQuery {
            exclude_ids: vec!["r0".to_owned(), "r2".to_owned()],
            limit: 3,
            ..CandidateQuery::default()
        })
        .await
        .unwrap();

    let ids: Vec<_> = fetched.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3", "r4"]);
}

#[tokio::test]
async fn test_undecodable_row_is_skipped() {
    let corpus = memory_corpus().await;
    corpus.insert_recipe(&exact_recipe("good")).await.unwrap();
    sqlx::query(
        "INSERT INTO recipes (id, name, calories, protein, carbs, fat, ingredients) \
         VALUES ('bad', 'Bad', 500, 40, 40, 15, 'not json')",
    )
    .execute(corpus.pool())
    .await
    .unwrap();

    let fetched = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, "good");
}

#[tokio::test]
async fn test_missing_table_is_corpus_unavailable() {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    let corpus = SqliteCorpus::new(pool);

    let err = corpus
        .fetch_candidates(&CandidateQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CorpusUnavailable);
}

// ============================================================================
// File Databases
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_between_connections() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("recipes.db").display());

    {
        let corpus = SqliteCorpus::connect(&url).await.unwrap();
        corpus.insert_all(&sample_recipes()).await.unwrap();
        corpus.pool().close().await;
    }

    let reopened = SqliteCorpus::connect(&url).await.unwrap();
    assert_eq!(reopened.count().await.unwrap(), sample_recipes().len() as i64);
}

#[tokio::test]
async fn test_service_over_sqlite_corpus() {
    let corpus = memory_corpus().await;
    corpus
        .insert_all(&[exact_recipe("a"), exact_recipe("b")])
        .await
        .unwrap();
    let service = RecipeMatchingService::new(Arc::new(corpus), MatchingConfig::default()).unwrap();

    let response = service
        .recommend(&lunch_request().excluding("a"))
        .await
        .unwrap();
    assert_eq!(response.recipe_ids(), vec!["b"]);
}
