// ABOUTME: Recipe corpus model consumed read-only by the matching engine
// ABOUTME: Defines Recipe, RecipeIngredient, Nutrition, and trusted DietaryFlags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Nutrition for one serving of a recipe
///
/// All values are non-negative. A recipe whose calories are zero cannot be
/// scaled and is treated as degenerate corpus data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fiber in grams
    #[serde(default)]
    pub fiber: f64,
}

impl Nutrition {
    /// Create nutrition values without fiber
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber: 0.0,
        }
    }

    /// Set fiber grams
    #[must_use]
    pub const fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = fiber;
        self
    }

    /// Multiply every value by `servings`
    ///
    /// Calories are rounded to whole kcal, the other macros to one decimal.
    #[must_use]
    pub fn scaled(&self, servings: f64) -> Self {
        Self {
            calories: (self.calories * servings).round(),
            protein: round_tenth(self.protein * servings),
            carbs: round_tenth(self.carbs * servings),
            fat: round_tenth(self.fat * servings),
            fiber: round_tenth(self.fiber * servings),
        }
    }

    /// Whether every value is finite and non-negative
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat, self.fiber]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Round to one decimal place
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Single ingredient line
///
/// The amount is free text ("2 tbsp", "1 can"); the engine only searches the
/// item name and never parses quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient name, searched for allergens and preferences
    pub item: String,
    /// Free-text amount
    #[serde(default)]
    pub amount: String,
}

impl RecipeIngredient {
    /// Create an ingredient line
    #[must_use]
    pub fn new(item: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            amount: amount.into(),
        }
    }
}

/// Boolean dietary and convenience flags, derived upstream and trusted as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)] // Mirrors the flag columns of the recipe corpus
pub struct DietaryFlags {
    /// No meat or fish
    pub vegetarian: bool,
    /// No animal products
    pub vegan: bool,
    /// No gluten-containing ingredients
    pub gluten_free: bool,
    /// No dairy products
    pub dairy_free: bool,
    /// Protein-dense recipe
    pub high_protein: bool,
    /// Low carbohydrate recipe
    pub low_carb: bool,
    /// Keeps well when cooked in bulk
    pub meal_prep_friendly: bool,
    /// Short preparation time
    pub quick_prep: bool,
    /// Suitable before a workout
    pub pre_workout_suitable: bool,
    /// Suitable after a workout
    pub post_workout_suitable: bool,
}

/// A recipe row from the externally owned corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Free-form category tag ("breakfast", "dinner", ...)
    #[serde(default)]
    pub category: String,
    /// Nutrition per serving
    pub nutrition: Nutrition,
    /// Ordered ingredient lines
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered instruction steps
    #[serde(default)]
    pub directions: Vec<String>,
    /// Dietary and convenience flags
    #[serde(default)]
    pub flags: DietaryFlags,
    /// Lowercase free-form tags ("snack", "mealprep")
    #[serde(default)]
    pub tags: Vec<String>,
    /// Inactive recipes are never candidates
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Optional image reference passed through to the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

const fn default_active() -> bool {
    true
}

impl Recipe {
    /// Create an active recipe with no ingredients, directions, flags, or tags
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        nutrition: Nutrition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            nutrition,
            ingredients: Vec::new(),
            directions: Vec::new(),
            flags: DietaryFlags::default(),
            tags: Vec::new(),
            is_active: true,
            image_url: None,
        }
    }

    /// Add an ingredient line
    #[must_use]
    pub fn with_ingredient(mut self, item: impl Into<String>, amount: impl Into<String>) -> Self {
        self.ingredients.push(RecipeIngredient::new(item, amount));
        self
    }

    /// Add an instruction step
    #[must_use]
    pub fn with_direction(mut self, step: impl Into<String>) -> Self {
        self.directions.push(step.into());
        self
    }

    /// Replace the dietary flags
    #[must_use]
    pub const fn with_flags(mut self, flags: DietaryFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add a tag (stored lowercase)
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into().to_lowercase());
        self
    }

    /// Set the image reference
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Mark the recipe as inactive
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether the recipe carries enough data to be recommended
    ///
    /// Requires at least one ingredient, at least one direction, well-formed
    /// nutrition, and a positive calorie count.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.ingredients.is_empty()
            && !self.directions.is_empty()
            && self.nutrition.is_well_formed()
            && self.nutrition.calories > 0.0
    }

    /// Check for a tag (case-insensitive)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
