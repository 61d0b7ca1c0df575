// ABOUTME: macro-match CLI for recipe recommendations, day planning, seeding, and target derivation
// ABOUTME: Reads JSON requests, runs the matching service, and prints JSON responses to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! # macro-match CLI
//!
//! Command-line front end for the recipe matching service.
//!
//! Usage:
//! ```bash
//! # Recommend recipes for one slot from the built-in sample corpus
//! macro-match recommend --request demos/lunch_request.json
//!
//! # Plan a whole day against a SQLite corpus
//! macro-match day --corpus sqlite:./data/recipes.db --request demos/day_request.json
//!
//! # Seed a SQLite corpus from a JSON file (or the sample recipes when omitted)
//! macro-match seed --database ./data/recipes.db --recipes demos/recipes.json
//!
//! # Derive slot targets from calories
//! macro-match targets --calories 600 --relation post-workout --workout-day
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use macro_match::config::{CorpusSource, ServerConfig};
use macro_match::corpus::sample::sample_recipes;
use macro_match::corpus::{InMemoryCorpus, SqliteCorpus};
use macro_match::engine::MatchingConfig;
use macro_match::models::{MatchRequest, WorkoutRelation};
use macro_match::services::{DayRequest, RecipeMatchingService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "macro-match",
    about = "Recipe-to-target matching and portion scaling",
    long_about = "Select recipes that best approximate a meal slot's macro target, scale them to the right serving count, and explain each score."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Recommend recipes for one meal slot
    Recommend {
        /// Corpus source (sample, json:<path>, sqlite:<path>); defaults to CORPUS_SOURCE
        #[arg(long)]
        corpus: Option<String>,

        /// Match request JSON file
        #[arg(long)]
        request: PathBuf,
    },

    /// Recommend recipes for every slot of a day without repeats
    Day {
        /// Corpus source (sample, json:<path>, sqlite:<path>); defaults to CORPUS_SOURCE
        #[arg(long)]
        corpus: Option<String>,

        /// Day request JSON file
        #[arg(long)]
        request: PathBuf,
    },

    /// Load recipes into a SQLite corpus
    Seed {
        /// SQLite database file
        #[arg(long)]
        database: PathBuf,

        /// JSON array of recipes (defaults to the built-in sample recipes)
        #[arg(long)]
        recipes: Option<PathBuf>,
    },

    /// Derive slot macro targets from a calorie budget
    Targets {
        /// Calories for the slot
        #[arg(long)]
        calories: f64,

        /// Timing of the slot relative to training
        #[arg(long, value_enum, default_value = "none")]
        relation: RelationArg,

        /// The slot falls on a training day
        #[arg(long)]
        workout_day: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RelationArg {
    PreWorkout,
    PostWorkout,
    None,
}

impl From<RelationArg> for WorkoutRelation {
    fn from(arg: RelationArg) -> Self {
        match arg {
            RelationArg::PreWorkout => Self::PreWorkout,
            RelationArg::PostWorkout => Self::PostWorkout,
            RelationArg::None => Self::None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::from_env()?;
    let logging = if cli.verbose {
        config.logging.clone().verbose()
    } else {
        config.logging.clone()
    };
    logging.init()?;

    match cli.command {
        Command::Recommend { corpus, request } => {
            let service = open_service(corpus.as_deref(), &config).await?;
            let request: MatchRequest = read_json(&request).await?;
            print_json(&service.recommend(&request).await?)?;
        }
        Command::Day { corpus, request } => {
            let service = open_service(corpus.as_deref(), &config).await?;
            let request: DayRequest = read_json(&request).await?;
            print_json(&service.recommend_for_day(&request).await?)?;
        }
        Command::Seed { database, recipes } => {
            seed(&database, recipes.as_deref()).await?;
        }
        Command::Targets {
            calories,
            relation,
            workout_day,
        } => {
            let targets = MatchingConfig::global()
                .meal_timing_macros
                .targets_for(calories, relation.into(), workout_day);
            targets.validate()?;
            print_json(&targets)?;
        }
    }

    Ok(())
}

async fn open_service(corpus: Option<&str>, config: &ServerConfig) -> Result<RecipeMatchingService> {
    let source = match corpus {
        Some(raw) => CorpusSource::parse(raw)?,
        None => config.corpus.clone(),
    };
    let corpus = source.open().await?;
    Ok(RecipeMatchingService::new(
        corpus,
        MatchingConfig::global().clone(),
    )?)
}

async fn seed(database: &Path, recipes: Option<&Path>) -> Result<()> {
    let recipes = match recipes {
        Some(path) => InMemoryCorpus::from_json_file(path)?.recipes().to_vec(),
        None => sample_recipes(),
    };

    let url = format!("sqlite:{}", database.display());
    info!("Seeding recipe corpus at {url}");
    let corpus = SqliteCorpus::connect(&url).await?;
    let inserted = corpus.insert_all(&recipes).await?;
    let total = corpus.count().await?;

    print_json(&serde_json::json!({
        "database": database.display().to_string(),
        "inserted": inserted,
        "total": total,
    }))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
