// ABOUTME: Safety filter excluding recipes with allergens, avoided foods, or pattern violations
// ABOUTME: Absolute pre-scoring exclusion using case-insensitive substring matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Safety Filter
//!
//! Runs before any scaling or scoring. A rejected recipe is never
//! recommended, however well it would otherwise score.
//!
//! Terms are matched as lowercase substrings of the recipe name plus its
//! ingredient item names. This is deliberately lenient: "egg" also matches
//! "eggplant", and "nut" matches "coconut". Dietary patterns are checked
//! against the recipe's trusted flags, never re-derived from ingredient text.

use macro_match_core::models::{DietPreferences, Recipe};
use serde::Serialize;
use std::fmt;

/// Hard dietary-pattern requirements parsed from preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DietaryRequirements {
    /// Recipe must be flagged vegan
    pub vegan: bool,
    /// Recipe must be flagged vegetarian (or vegan)
    pub vegetarian: bool,
    /// Recipe must be flagged gluten-free
    pub gluten_free: bool,
    /// Recipe must be flagged dairy-free
    pub dairy_free: bool,
}

impl DietaryRequirements {
    /// Collect requirements from the dietary pattern and restriction list
    #[must_use]
    pub fn from_preferences(preferences: &DietPreferences) -> Self {
        let mut requirements = Self::default();
        let declared = preferences
            .dietary_pattern
            .iter()
            .chain(preferences.dietary_restrictions.iter());

        for raw in declared {
            let term = normalize_pattern(raw);
            if term.contains("vegan") {
                requirements.vegan = true;
            }
            if term.contains("vegetarian") {
                requirements.vegetarian = true;
            }
            if term.contains("gluten-free") {
                requirements.gluten_free = true;
            }
            if term.contains("dairy-free") {
                requirements.dairy_free = true;
            }
        }

        requirements
    }

    /// Whether no requirement is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.vegan || self.vegetarian || self.gluten_free || self.dairy_free)
    }

    /// First requirement the recipe fails, if any
    #[must_use]
    pub const fn first_violation(&self, recipe: &Recipe) -> Option<&'static str> {
        let flags = &recipe.flags;
        if self.vegan && !flags.vegan {
            return Some("vegan");
        }
        if self.vegetarian && !(flags.vegetarian || flags.vegan) {
            return Some("vegetarian");
        }
        if self.gluten_free && !flags.gluten_free {
            return Some("gluten-free");
        }
        if self.dairy_free && !flags.dairy_free {
            return Some("dairy-free");
        }
        None
    }
}

/// Lowercase, with spaces and underscores folded into hyphens
fn normalize_pattern(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// Why a recipe was excluded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "term", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Name or ingredients contain a declared allergen
    Allergen(String),
    /// Name or ingredients contain a food the client avoids
    AvoidedFood(String),
    /// Recipe flags violate a dietary pattern
    DietaryPattern(&'static str),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allergen(term) => write!(f, "allergen '{term}'"),
            Self::AvoidedFood(term) => write!(f, "avoided food '{term}'"),
            Self::DietaryPattern(pattern) => write!(f, "not {pattern}"),
        }
    }
}

/// Outcome of the safety check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// Recipe may be scored
    Admit,
    /// Recipe must not be recommended
    Reject(ExclusionReason),
}

impl SafetyVerdict {
    /// Whether the recipe was admitted
    #[must_use]
    pub const fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Per-request safety filter with terms normalized once
#[derive(Debug, Clone, Default)]
pub struct SafetyFilter {
    allergens: Vec<String>,
    avoided: Vec<String>,
    requirements: DietaryRequirements,
}

impl SafetyFilter {
    /// Build the filter from diet preferences
    ///
    /// Allergies and custom allergies form one allergen set. Blank terms are
    /// dropped so they cannot match every recipe.
    #[must_use]
    pub fn from_preferences(preferences: &DietPreferences) -> Self {
        Self {
            allergens: normalize_terms(
                preferences
                    .allergies
                    .iter()
                    .chain(preferences.custom_allergies.iter()),
            ),
            avoided: normalize_terms(preferences.foods_to_avoid.iter()),
            requirements: DietaryRequirements::from_preferences(preferences),
        }
    }

    /// Check a recipe against allergens, avoided foods, then dietary pattern
    #[must_use]
    pub fn check(&self, recipe: &Recipe) -> SafetyVerdict {
        let haystack = safety_haystack(recipe);

        if let Some(term) = first_match(&haystack, &self.allergens) {
            return SafetyVerdict::Reject(ExclusionReason::Allergen(term.to_owned()));
        }
        if let Some(term) = first_match(&haystack, &self.avoided) {
            return SafetyVerdict::Reject(ExclusionReason::AvoidedFood(term.to_owned()));
        }
        if let Some(pattern) = self.requirements.first_violation(recipe) {
            return SafetyVerdict::Reject(ExclusionReason::DietaryPattern(pattern));
        }

        SafetyVerdict::Admit
    }
}

/// Lowercase recipe name followed by every ingredient item
#[must_use]
pub fn safety_haystack(recipe: &Recipe) -> String {
    let mut haystack = recipe.name.to_lowercase();
    for ingredient in &recipe.ingredients {
        haystack.push(' ');
        haystack.push_str(&ingredient.item.to_lowercase());
    }
    haystack
}

/// Trim and lowercase terms, dropping blanks
pub(crate) fn normalize_terms<'a>(terms: impl Iterator<Item = &'a String>) -> Vec<String> {
    terms
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// First term contained in the haystack
pub(crate) fn first_match<'t>(haystack: &str, terms: &'t [String]) -> Option<&'t str> {
    terms
        .iter()
        .find(|term| haystack.contains(term.as_str()))
        .map(String::as_str)
}
