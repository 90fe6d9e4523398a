//! Free-text search and category filtering over an in-memory recipe set.
//!
//! Both functions re-scan the full slice on every call; there is no index.
//! Matching is unranked, so the result order is the input order.

use crate::types::Recipe;

/// Returns every recipe where the query matches the title, the
/// description, or any ingredient name, case-insensitively.
///
/// An empty or whitespace-only query means "no filter" and returns the
/// whole set.
pub fn search<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim();
    if query.is_empty() {
        return recipes.iter().collect();
    }

    let needle = query.to_lowercase();

    recipes
        .iter()
        .filter(|recipe| {
            recipe.title.to_lowercase().contains(&needle)
                || recipe.description.to_lowercase().contains(&needle)
                || recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| ingredient.name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Returns every recipe whose category set contains `category`.
pub fn filter_by_category<'a>(recipes: &'a [Recipe], category: &str) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.categories.iter().any(|c| c == category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, IngredientEntry, Recipe, StepEntry};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn author() -> Author {
        Author {
            id: Uuid::new_v4(),
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            avatar: None,
        }
    }

    fn recipe(title: &str, description: &str, ingredients: &[&str], categories: &[&str]) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            image: None,
            prep_time: Some(10),
            cook_time: Some(20),
            servings: Some(4),
            difficulty: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            tags: vec![],
            ingredients: ingredients
                .iter()
                .map(|name| IngredientEntry {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    amount: "1".to_string(),
                    unit: "cup".to_string(),
                    note: None,
                })
                .collect(),
            steps: vec![StepEntry {
                order: 1,
                instruction: "Mix everything".to_string(),
                image: None,
            }],
            author: author(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn corpus() -> Vec<Recipe> {
        vec![
            recipe(
                "Classic Chocolate Chip Cookies",
                "Crisp edges, chewy middles",
                &["Flour", "Chocolate chips", "Butter"],
                &["dessert"],
            ),
            recipe(
                "Quinoa Salad",
                "Light lunch bowl",
                &["Quinoa", "Cucumber", "Lemon"],
                &["salad", "vegan", "lunch"],
            ),
            recipe(
                "Beef Stew",
                "Slow-cooked comfort food",
                &["Beef", "Carrot", "Potato"],
                &["dinner", "main"],
            ),
        ]
    }

    #[test]
    fn empty_query_returns_everything() {
        let recipes = corpus();
        assert_eq!(search(&recipes, "").len(), 3);
        assert_eq!(search(&recipes, "   ").len(), 3);
    }

    #[test]
    fn matches_title_substring() {
        let recipes = corpus();
        let results = search(&recipes, "choc");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Classic Chocolate Chip Cookies");
    }

    #[test]
    fn matches_description() {
        let recipes = corpus();
        let results = search(&recipes, "comfort");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Beef Stew");
    }

    #[test]
    fn matches_ingredient_name_case_insensitively() {
        let recipes = corpus();
        let results = search(&recipes, "qUiNoA");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Quinoa Salad");
    }

    #[test]
    fn no_match_returns_empty() {
        let recipes = corpus();
        assert!(search(&recipes, "octopus").is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let recipes = corpus();
        // "o" appears in all three titles or ingredients
        let results = search(&recipes, "o");
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Classic Chocolate Chip Cookies", "Quinoa Salad", "Beef Stew"]
        );
    }

    #[test]
    fn filter_by_category_is_exact_membership() {
        let recipes = corpus();
        let vegan = filter_by_category(&recipes, "vegan");
        assert_eq!(vegan.len(), 1);
        assert_eq!(vegan[0].title, "Quinoa Salad");

        // Substrings of a category name do not match
        assert!(filter_by_category(&recipes, "veg").is_empty());
    }

    #[test]
    fn recipe_may_belong_to_multiple_categories() {
        let recipes = corpus();
        assert_eq!(filter_by_category(&recipes, "salad").len(), 1);
        assert_eq!(filter_by_category(&recipes, "lunch").len(), 1);
        assert_eq!(filter_by_category(&recipes, "breakfast").len(), 0);
    }
}
