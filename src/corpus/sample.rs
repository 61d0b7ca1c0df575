// ABOUTME: Built-in sample recipe corpus used for seeding and local experiments
// ABOUTME: Covers breakfast, lunch, dinner, and snack recipes with varied dietary flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macro_match_core::models::{DietaryFlags, Nutrition, Recipe};

// ============================================================================
// Sample Recipe Data
// ============================================================================

struct SampleRecipe {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    nutrition: [f64; 5],
    ingredients: &'static [(&'static str, &'static str)],
    directions: &'static [&'static str],
    tags: &'static [&'static str],
    flags: DietaryFlags,
}

const NO_FLAGS: DietaryFlags = DietaryFlags {
    vegetarian: false,
    vegan: false,
    gluten_free: false,
    dairy_free: false,
    high_protein: false,
    low_carb: false,
    meal_prep_friendly: false,
    quick_prep: false,
    pre_workout_suitable: false,
    post_workout_suitable: false,
};

const SAMPLE_RECIPES: &[SampleRecipe] = &[
    SampleRecipe {
        id: "greek-yogurt-parfait",
        name: "Greek Yogurt Berry Parfait",
        category: "breakfast",
        nutrition: [320.0, 24.0, 42.0, 6.0, 5.0],
        ingredients: &[
            ("greek yogurt", "200 g"),
            ("mixed berries", "1 cup"),
            ("rolled oats", "30 g"),
            ("honey", "1 tsp"),
        ],
        directions: &[
            "Layer yogurt, berries, and oats in a glass",
            "Drizzle with honey",
        ],
        tags: &["breakfast", "snack"],
        flags: DietaryFlags {
            vegetarian: true,
            quick_prep: true,
            pre_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "egg-white-scramble",
        name: "Spinach Egg White Scramble",
        category: "breakfast",
        nutrition: [260.0, 30.0, 14.0, 8.0, 3.0],
        ingredients: &[
            ("egg whites", "250 ml"),
            ("whole egg", "1"),
            ("spinach", "2 cups"),
            ("whole wheat toast", "1 slice"),
        ],
        directions: &[
            "Wilt spinach in a non-stick pan",
            "Add eggs and scramble until set",
            "Serve with toast",
        ],
        tags: &["breakfast"],
        flags: DietaryFlags {
            vegetarian: true,
            dairy_free: true,
            high_protein: true,
            quick_prep: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "overnight-oats",
        name: "Peanut Butter Overnight Oats",
        category: "breakfast",
        nutrition: [410.0, 18.0, 52.0, 14.0, 8.0],
        ingredients: &[
            ("rolled oats", "60 g"),
            ("almond milk", "200 ml"),
            ("peanut butter", "1 tbsp"),
            ("banana", "1/2"),
            ("chia seeds", "1 tsp"),
        ],
        directions: &[
            "Stir everything together in a jar",
            "Refrigerate overnight",
        ],
        tags: &["breakfast", "mealprep"],
        flags: DietaryFlags {
            vegetarian: true,
            vegan: true,
            dairy_free: true,
            meal_prep_friendly: true,
            pre_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "chicken-rice-bowl",
        name: "Chicken Rice Bowl",
        category: "lunch",
        nutrition: [480.0, 42.0, 50.0, 10.0, 4.0],
        ingredients: &[
            ("chicken breast", "150 g"),
            ("jasmine rice", "1 cup cooked"),
            ("broccoli", "1 cup"),
            ("soy sauce", "1 tbsp"),
        ],
        directions: &[
            "Grill the chicken and slice",
            "Steam the broccoli",
            "Assemble over rice and dress with soy sauce",
        ],
        tags: &["mealprep"],
        flags: DietaryFlags {
            dairy_free: true,
            high_protein: true,
            meal_prep_friendly: true,
            post_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "turkey-quinoa-salad",
        name: "Turkey Quinoa Salad",
        category: "lunch",
        nutrition: [430.0, 35.0, 38.0, 14.0, 6.0],
        ingredients: &[
            ("ground turkey", "120 g"),
            ("quinoa", "3/4 cup cooked"),
            ("cucumber", "1/2"),
            ("cherry tomatoes", "1 cup"),
            ("olive oil", "1 tsp"),
        ],
        directions: &[
            "Brown the turkey",
            "Toss with quinoa and chopped vegetables",
            "Dress with olive oil",
        ],
        tags: &["mealprep"],
        flags: DietaryFlags {
            gluten_free: true,
            dairy_free: true,
            high_protein: true,
            meal_prep_friendly: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "lentil-curry",
        name: "Red Lentil Coconut Curry",
        category: "dinner",
        nutrition: [520.0, 24.0, 68.0, 16.0, 14.0],
        ingredients: &[
            ("red lentils", "80 g"),
            ("coconut milk", "100 ml"),
            ("sweet potato", "1 small"),
            ("spinach", "1 cup"),
            ("brown rice", "1/2 cup cooked"),
        ],
        directions: &[
            "Simmer lentils and sweet potato in coconut milk and spices",
            "Stir in spinach until wilted",
            "Serve over rice",
        ],
        tags: &["mealprep"],
        flags: DietaryFlags {
            vegetarian: true,
            vegan: true,
            gluten_free: true,
            dairy_free: true,
            meal_prep_friendly: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "salmon-sweet-potato",
        name: "Baked Salmon with Sweet Potato",
        category: "dinner",
        nutrition: [560.0, 38.0, 45.0, 22.0, 7.0],
        ingredients: &[
            ("salmon fillet", "150 g"),
            ("sweet potato", "1 medium"),
            ("asparagus", "8 spears"),
            ("lemon", "1/2"),
        ],
        directions: &[
            "Roast sweet potato wedges for 20 minutes",
            "Add salmon and asparagus and bake 12 more minutes",
            "Finish with lemon",
        ],
        tags: &[],
        flags: DietaryFlags {
            gluten_free: true,
            dairy_free: true,
            high_protein: true,
            post_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "beef-stir-fry",
        name: "Lean Beef Stir Fry",
        category: "dinner",
        nutrition: [500.0, 40.0, 42.0, 17.0, 5.0],
        ingredients: &[
            ("lean beef strips", "140 g"),
            ("bell pepper", "1"),
            ("snap peas", "1 cup"),
            ("rice noodles", "60 g"),
        ],
        directions: &[
            "Sear beef in a hot wok",
            "Add vegetables and noodles and toss until hot",
        ],
        tags: &[],
        flags: DietaryFlags {
            dairy_free: true,
            high_protein: true,
            quick_prep: true,
            post_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "protein-shake",
        name: "Banana Protein Shake",
        category: "snack",
        nutrition: [280.0, 30.0, 32.0, 4.0, 3.0],
        ingredients: &[
            ("whey protein", "1 scoop"),
            ("banana", "1"),
            ("skim milk", "250 ml"),
        ],
        directions: &["Blend until smooth"],
        tags: &["snack"],
        flags: DietaryFlags {
            vegetarian: true,
            gluten_free: true,
            high_protein: true,
            quick_prep: true,
            post_workout_suitable: true,
            ..NO_FLAGS
        },
    },
    SampleRecipe {
        id: "hummus-veggie-plate",
        name: "Hummus Veggie Plate",
        category: "snack",
        nutrition: [220.0, 8.0, 24.0, 10.0, 7.0],
        ingredients: &[
            ("hummus", "1/4 cup"),
            ("carrots", "1 cup sticks"),
            ("cucumber", "1/2"),
            ("whole wheat pita", "1/2"),
        ],
        directions: &["Slice vegetables and serve with hummus and pita"],
        tags: &["snack"],
        flags: DietaryFlags {
            vegetarian: true,
            vegan: true,
            dairy_free: true,
            quick_prep: true,
            ..NO_FLAGS
        },
    },
];

fn build(sample: &SampleRecipe) -> Recipe {
    let [calories, protein, carbs, fat, fiber] = sample.nutrition;
    let mut recipe = Recipe::new(
        sample.id,
        sample.name,
        sample.category,
        Nutrition::new(calories, protein, carbs, fat).with_fiber(fiber),
    )
    .with_flags(sample.flags);
    for (item, amount) in sample.ingredients {
        recipe = recipe.with_ingredient(*item, *amount);
    }
    for step in sample.directions {
        recipe = recipe.with_direction(*step);
    }
    for tag in sample.tags {
        recipe = recipe.with_tag(*tag);
    }
    recipe
}

/// The built-in sample corpus, in a fixed order
#[must_use]
pub fn sample_recipes() -> Vec<Recipe> {
    SAMPLE_RECIPES.iter().map(build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_recipes_are_complete_and_unique() {
        let recipes = sample_recipes();
        assert_eq!(recipes.len(), SAMPLE_RECIPES.len());
        assert!(recipes.iter().all(Recipe::is_complete));

        let mut ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), recipes.len());
    }
}
