// ABOUTME: SQLite-backed recipe corpus using an sqlx connection pool
// ABOUTME: Creates the recipes table, seeds rows, and pulls filtered candidate snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use macro_match_core::errors::{AppError, AppResult};
use macro_match_core::models::{DietaryFlags, Nutrition, Recipe, RecipeIngredient};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use super::{CandidateQuery, RecipeCorpus};

/// Recipe corpus stored in a `recipes` table
///
/// Ingredients, directions, and tags are stored as JSON text columns. A row
/// that fails to decode is logged and skipped so one bad row never fails a
/// whole request.
#[derive(Debug, Clone)]
pub struct SqliteCorpus {
    pool: SqlitePool,
}

impl SqliteCorpus {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect and create the schema if needed
    ///
    /// File databases are created when missing. In-memory databases use a
    /// single connection so every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` if the database cannot be opened
    /// or the schema cannot be created
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let connection_url =
            if database_url.starts_with("sqlite:") && !in_memory && !database_url.contains('?') {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };

        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(&connection_url)
            .await
            .map_err(|e| {
                AppError::corpus_unavailable(format!("Failed to open recipe database: {e}"))
                    .with_source(e)
            })?;

        let corpus = Self::new(pool);
        corpus.migrate().await?;
        Ok(corpus)
    }

    /// Get a reference to the pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the recipes table and its index
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                calories REAL NOT NULL,
                protein REAL NOT NULL,
                carbs REAL NOT NULL,
                fat REAL NOT NULL,
                fiber REAL NOT NULL DEFAULT 0,
                ingredients TEXT NOT NULL DEFAULT '[]',
                directions TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '[]',
                is_vegetarian INTEGER NOT NULL DEFAULT 0,
                is_vegan INTEGER NOT NULL DEFAULT 0,
                is_gluten_free INTEGER NOT NULL DEFAULT 0,
                is_dairy_free INTEGER NOT NULL DEFAULT 0,
                is_high_protein INTEGER NOT NULL DEFAULT 0,
                is_low_carb INTEGER NOT NULL DEFAULT 0,
                is_meal_prep_friendly INTEGER NOT NULL DEFAULT 0,
                is_quick_prep INTEGER NOT NULL DEFAULT 0,
                is_pre_workout_suitable INTEGER NOT NULL DEFAULT 0,
                is_post_workout_suitable INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                image_url TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| schema_error(&e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_active ON recipes(is_active)")
            .execute(&self.pool)
            .await
            .map_err(|e| schema_error(&e))?;

        Ok(())
    }

    /// Insert or replace a recipe
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::StorageError` if the write fails, or
    /// `ErrorCode::SerializationError` if a list column cannot be encoded
    pub async fn insert_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;
        let directions = serde_json::to_string(&recipe.directions)?;
        let tags = serde_json::to_string(&recipe.tags)?;
        let flags = &recipe.flags;
        let nutrition = &recipe.nutrition;

        sqlx::query(
            r"
            INSERT OR REPLACE INTO recipes (
                id, name, category, calories, protein, carbs, fat, fiber,
                ingredients, directions, tags,
                is_vegetarian, is_vegan, is_gluten_free, is_dairy_free,
                is_high_protein, is_low_carb, is_meal_prep_friendly, is_quick_prep,
                is_pre_workout_suitable, is_post_workout_suitable,
                is_active, image_url
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.category)
        .bind(nutrition.calories)
        .bind(nutrition.protein)
        .bind(nutrition.carbs)
        .bind(nutrition.fat)
        .bind(nutrition.fiber)
        .bind(ingredients)
        .bind(directions)
        .bind(tags)
        .bind(flags.vegetarian)
        .bind(flags.vegan)
        .bind(flags.gluten_free)
        .bind(flags.dairy_free)
        .bind(flags.high_protein)
        .bind(flags.low_carb)
        .bind(flags.meal_prep_friendly)
        .bind(flags.quick_prep)
        .bind(flags.pre_workout_suitable)
        .bind(flags.post_workout_suitable)
        .bind(recipe.is_active)
        .bind(&recipe.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::storage(format!("Failed to insert recipe {}: {e}", recipe.id)).with_source(e)
        })?;

        Ok(())
    }

    /// Insert many recipes, returning how many were written
    ///
    /// # Errors
    ///
    /// Returns the first insert failure
    pub async fn insert_all(&self, recipes: &[Recipe]) -> AppResult<usize> {
        for recipe in recipes {
            self.insert_recipe(recipe).await?;
        }
        Ok(recipes.len())
    }

    /// Count stored recipes, active or not
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` if the query fails
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query("SELECT COUNT(*) AS total FROM recipes")
            .fetch_one(&self.pool)
            .await
            .and_then(|row| row.try_get::<i64, _>("total"))
            .map_err(|e| read_error(&e))
    }
}

#[async_trait]
impl RecipeCorpus for SqliteCorpus {
    async fn fetch_candidates(&self, query: &CandidateQuery) -> AppResult<Vec<Recipe>> {
        let mut conditions = vec!["is_active = 1".to_owned()];
        if query.vegan_only {
            conditions.push("is_vegan = 1".to_owned());
        }
        if query.vegetarian_only {
            conditions.push("(is_vegetarian = 1 OR is_vegan = 1)".to_owned());
        }
        if !query.exclude_ids.is_empty() {
            let placeholders = vec!["?"; query.exclude_ids.len()].join(", ");
            conditions.push(format!("id NOT IN ({placeholders})"));
        }

        let sql = format!(
            r"
            SELECT id, name, category, calories, protein, carbs, fat, fiber,
                   ingredients, directions, tags,
                   is_vegetarian, is_vegan, is_gluten_free, is_dairy_free,
                   is_high_protein, is_low_carb, is_meal_prep_friendly, is_quick_prep,
                   is_pre_workout_suitable, is_post_workout_suitable,
                   is_active, image_url
            FROM recipes
            WHERE {}
            ORDER BY rowid ASC
            LIMIT ?
            ",
            conditions.join(" AND ")
        );

        let mut sql_query = sqlx::query(&sql);
        for id in &query.exclude_ids {
            sql_query = sql_query.bind(id);
        }
        sql_query = sql_query.bind(i64::try_from(query.limit).unwrap_or(i64::MAX));

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(&e))?;

        let recipes: Vec<Recipe> = rows
            .iter()
            .filter_map(|row| match row_to_recipe(row) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable recipe row");
                    None
                }
            })
            .collect();

        debug!(rows = rows.len(), decoded = recipes.len(), "Fetched recipe candidates");
        Ok(recipes)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

fn schema_error(error: &sqlx::Error) -> AppError {
    AppError::corpus_unavailable(format!("Failed to create recipe schema: {error}"))
}

fn read_error(error: &sqlx::Error) -> AppError {
    AppError::corpus_unavailable(format!("Failed to read recipes: {error}"))
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let get_f64 = |column: &str| -> AppResult<f64> {
        row.try_get(column)
            .map_err(|e| AppError::internal(format!("Invalid column {column}: {e}")))
    };
    let get_flag = |column: &str| -> AppResult<bool> {
        row.try_get(column)
            .map_err(|e| AppError::internal(format!("Invalid column {column}: {e}")))
    };
    let get_text = |column: &str| -> AppResult<String> {
        row.try_get(column)
            .map_err(|e| AppError::internal(format!("Invalid column {column}: {e}")))
    };

    let ingredients: Vec<RecipeIngredient> = serde_json::from_str(&get_text("ingredients")?)?;
    let directions: Vec<String> = serde_json::from_str(&get_text("directions")?)?;
    let tags: Vec<String> = serde_json::from_str(&get_text("tags")?)?;

    Ok(Recipe {
        id: get_text("id")?,
        name: get_text("name")?,
        category: get_text("category")?,
        nutrition: Nutrition::new(
            get_f64("calories")?,
            get_f64("protein")?,
            get_f64("carbs")?,
            get_f64("fat")?,
        )
        .with_fiber(get_f64("fiber")?),
        ingredients,
        directions,
        flags: DietaryFlags {
            vegetarian: get_flag("is_vegetarian")?,
            vegan: get_flag("is_vegan")?,
            gluten_free: get_flag("is_gluten_free")?,
            dairy_free: get_flag("is_dairy_free")?,
            high_protein: get_flag("is_high_protein")?,
            low_carb: get_flag("is_low_carb")?,
            meal_prep_friendly: get_flag("is_meal_prep_friendly")?,
            quick_prep: get_flag("is_quick_prep")?,
            pre_workout_suitable: get_flag("is_pre_workout_suitable")?,
            post_workout_suitable: get_flag("is_post_workout_suitable")?,
        },
        tags,
        is_active: get_flag("is_active")?,
        image_url: row
            .try_get("image_url")
            .map_err(|e| AppError::internal(format!("Invalid column image_url: {e}")))?,
    })
}
