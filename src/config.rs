// ABOUTME: Runtime configuration for the matching service loaded from environment variables
// ABOUTME: Selects the recipe corpus source and carries the logging configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use macro_match_core::errors::{AppError, AppResult};
use tracing::info;

use crate::corpus::sample::sample_recipes;
use crate::corpus::{InMemoryCorpus, RecipeCorpus, SqliteCorpus};
use crate::logging::LoggingConfig;

/// Environment variable selecting the corpus
pub const CORPUS_SOURCE_VAR: &str = "CORPUS_SOURCE";

/// Where recipes are read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorpusSource {
    /// Built-in sample recipes
    #[default]
    Sample,
    /// JSON array of recipes on disk
    Json {
        /// File path
        path: PathBuf,
    },
    /// `SQLite` database file
    Sqlite {
        /// Database file path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    SqliteMemory,
}

impl CorpusSource {
    /// Parse `sample`, `json:<path>`, `sqlite:<path>`, or `sqlite::memory:`
    ///
    /// A bare path ending in `.json` is read as a JSON corpus; any other bare
    /// path is treated as a `SQLite` file.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` for an empty source or path
    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::invalid_input("Corpus source must not be empty"));
        }
        if s == "sample" {
            return Ok(Self::Sample);
        }
        if let Some(path) = s.strip_prefix("json:") {
            return non_empty_path(path).map(|path| Self::Json { path });
        }
        if let Some(path) = s.strip_prefix("sqlite:") {
            if path == ":memory:" {
                return Ok(Self::SqliteMemory);
            }
            return non_empty_path(path.trim_start_matches("//")).map(|path| Self::Sqlite { path });
        }

        let path = PathBuf::from(s);
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Ok(Self::Json { path })
        } else {
            Ok(Self::Sqlite { path })
        }
    }

    /// `SQLite` connection string, if this is a database source
    #[must_use]
    pub fn connection_string(&self) -> Option<String> {
        match self {
            Self::Sqlite { path } => Some(format!("sqlite:{}", path.display())),
            Self::SqliteMemory => Some("sqlite::memory:".to_owned()),
            Self::Sample | Self::Json { .. } => None,
        }
    }

    /// Open the corpus
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::CorpusUnavailable` if the file or database cannot be opened
    pub async fn open(&self) -> AppResult<Arc<dyn RecipeCorpus>> {
        let corpus: Arc<dyn RecipeCorpus> = match self {
            Self::Sample => Arc::new(InMemoryCorpus::new(sample_recipes())),
            Self::Json { path } => Arc::new(InMemoryCorpus::from_json_file(path)?),
            Self::Sqlite { .. } | Self::SqliteMemory => {
                let url = self.connection_string().unwrap_or_default();
                Arc::new(SqliteCorpus::connect(&url).await?)
            }
        };
        info!(source = %self, backend = corpus.name(), "Recipe corpus opened");
        Ok(corpus)
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample => write!(f, "sample"),
            Self::Json { path } => write!(f, "json:{}", path.display()),
            Self::Sqlite { path } => write!(f, "sqlite:{}", path.display()),
            Self::SqliteMemory => write!(f, "sqlite::memory:"),
        }
    }
}

fn non_empty_path(path: &str) -> AppResult<PathBuf> {
    if path.trim().is_empty() {
        Err(AppError::invalid_input("Corpus source path must not be empty"))
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Recipe corpus source
    pub corpus: CorpusSource,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// `CORPUS_SOURCE` defaults to the built-in sample corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if `CORPUS_SOURCE` cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let corpus = match env::var(CORPUS_SOURCE_VAR) {
            Ok(raw) => CorpusSource::parse(&raw)?,
            Err(_) => CorpusSource::default(),
        };
        Ok(Self {
            corpus,
            logging: LoggingConfig::from_env(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_corpus_sources() {
        assert_eq!(CorpusSource::parse("sample").unwrap(), CorpusSource::Sample);
        assert_eq!(
            CorpusSource::parse("json:data/recipes.json").unwrap(),
            CorpusSource::Json {
                path: PathBuf::from("data/recipes.json")
            }
        );
        assert_eq!(
            CorpusSource::parse("sqlite:./data/recipes.db").unwrap(),
            CorpusSource::Sqlite {
                path: PathBuf::from("./data/recipes.db")
            }
        );
        assert_eq!(
            CorpusSource::parse("sqlite::memory:").unwrap(),
            CorpusSource::SqliteMemory
        );
        assert_eq!(
            CorpusSource::parse("recipes.JSON").unwrap(),
            CorpusSource::Json {
                path: PathBuf::from("recipes.JSON")
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(CorpusSource::parse("  ").is_err());
        assert!(CorpusSource::parse("json:").is_err());
    }

    #[test]
    fn test_display_round_trips_connection_string() {
        let source = CorpusSource::parse("sqlite:recipes.db").unwrap();
        assert_eq!(source.to_string(), "sqlite:recipes.db");
        assert_eq!(source.connection_string().unwrap(), "sqlite:recipes.db");
        assert!(CorpusSource::Sample.connection_string().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_corpus_source() {
        env::set_var(CORPUS_SOURCE_VAR, "json:fixtures/recipes.json");
        let config = ServerConfig::from_env().unwrap();
        env::remove_var(CORPUS_SOURCE_VAR);

        assert_eq!(
            config.corpus,
            CorpusSource::Json {
                path: PathBuf::from("fixtures/recipes.json")
            }
        );
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_sample() {
        env::remove_var(CORPUS_SOURCE_VAR);
        assert_eq!(ServerConfig::from_env().unwrap().corpus, CorpusSource::Sample);
    }
}
