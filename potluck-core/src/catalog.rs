//! An insertion-ordered, in-memory recipe collection.
//!
//! This is the client-side mirror of the recipe store: the same ownership
//! and replacement rules as the server, over a plain `Vec`. It doubles as
//! the test double for anything that talks to the real store, so the
//! consistency rules can be exercised without a database.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::types::{Author, Difficulty, IngredientEntry, Recipe, StepEntry};

/// Everything a caller supplies when creating a recipe. The catalog
/// assigns the id, the author, and the creation timestamp.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<IngredientEntry>,
    pub steps: Vec<StepEntry>,
}

/// Partial update. `None` leaves the field untouched; a provided
/// collection replaces the stored one wholesale.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<IngredientEntry>>,
    pub steps: Option<Vec<StepEntry>>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe authored by `author`, returning the assigned id.
    pub fn add(&mut self, author: Author, draft: RecipeDraft) -> Uuid {
        self.add_at(author, draft, Utc::now())
    }

    /// Adds a recipe with an explicit creation time. Useful when
    /// hydrating the mirror from server data.
    pub fn add_at(&mut self, author: Author, draft: RecipeDraft, created_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.recipes.push(Recipe {
            id,
            title: draft.title,
            description: draft.description,
            image: draft.image,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
            categories: draft.categories,
            tags: draft.tags,
            ingredients: draft.ingredients,
            steps: draft.steps,
            author,
            created_at,
            updated_at: None,
        });
        id
    }

    /// Applies a partial update. Only the author may update; provided
    /// ingredient/step/category/tag collections replace the stored ones
    /// entirely.
    pub fn update(&mut self, actor_id: Uuid, id: Uuid, patch: RecipePatch) -> Result<(), CatalogError> {
        let recipe = self
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if recipe.author.id != actor_id {
            return Err(CatalogError::NotOwner);
        }

        if let Some(title) = patch.title {
            recipe.title = title;
        }
        if let Some(description) = patch.description {
            recipe.description = description;
        }
        if let Some(image) = patch.image {
            recipe.image = Some(image);
        }
        if let Some(prep_time) = patch.prep_time {
            recipe.prep_time = Some(prep_time);
        }
        if let Some(cook_time) = patch.cook_time {
            recipe.cook_time = Some(cook_time);
        }
        if let Some(servings) = patch.servings {
            recipe.servings = Some(servings);
        }
        if let Some(difficulty) = patch.difficulty {
            recipe.difficulty = Some(difficulty);
        }
        if let Some(categories) = patch.categories {
            recipe.categories = categories;
        }
        if let Some(tags) = patch.tags {
            recipe.tags = tags;
        }
        if let Some(ingredients) = patch.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(steps) = patch.steps {
            recipe.steps = steps;
        }
        recipe.updated_at = Some(Utc::now());

        Ok(())
    }

    /// Removes a recipe. Only the author may remove; removing an unknown
    /// id is an error, never a silent success.
    pub fn remove(&mut self, actor_id: Uuid, id: Uuid) -> Result<(), CatalogError> {
        let index = self
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if self.recipes[index].author.id != actor_id {
            return Err(CatalogError::NotOwner);
        }

        self.recipes.remove(index);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// All recipes in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// All recipes, most recently created first. The sort is stable, so
    /// recipes sharing a timestamp keep their insertion order.
    pub fn newest_first(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.recipes.iter().collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recipes
    }

    pub fn recipes_of(&self, author_id: Uuid) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.author.id == author_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn author(name: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            avatar: None,
        }
    }

    fn ingredient(name: &str) -> IngredientEntry {
        IngredientEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            amount: "2".to_string(),
            unit: "tbsp".to_string(),
            note: None,
        }
    }

    fn step(order: u32, instruction: &str) -> StepEntry {
        StepEntry {
            order,
            instruction: instruction.to_string(),
            image: None,
        }
    }

    fn draft(title: &str) -> RecipeDraft {
        RecipeDraft {
            title: title.to_string(),
            description: "A recipe".to_string(),
            image: None,
            prep_time: Some(5),
            cook_time: Some(15),
            servings: Some(2),
            difficulty: Some(Difficulty::Easy),
            categories: vec!["dinner".to_string()],
            tags: vec!["weeknight".to_string()],
            ingredients: vec![ingredient("Onion"), ingredient("Garlic")],
            steps: vec![step(1, "Chop"), step(2, "Fry")],
        }
    }

    #[test]
    fn add_preserves_ingredient_and_step_input() {
        let mut catalog = Catalog::new();
        let id = catalog.add(author("ana"), draft("Soffritto"));

        let recipe = catalog.get(id).unwrap();
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.steps.len(), 2);
        let orders: Vec<u32> = recipe.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert!(recipe.updated_at.is_none());
    }

    #[test]
    fn update_replaces_ingredients_wholesale() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let id = catalog.add(ana.clone(), draft("Soffritto"));

        catalog
            .update(
                ana.id,
                id,
                RecipePatch {
                    ingredients: Some(vec![ingredient("Shallot")]),
                    ..Default::default()
                },
            )
            .unwrap();

        let recipe = catalog.get(id).unwrap();
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].name, "Shallot");
        assert!(recipe.updated_at.is_some());
    }

    #[test]
    fn update_leaves_omitted_fields_untouched() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let id = catalog.add(ana.clone(), draft("Soffritto"));

        catalog
            .update(
                ana.id,
                id,
                RecipePatch {
                    title: Some("Mirepoix".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let recipe = catalog.get(id).unwrap();
        assert_eq!(recipe.title, "Mirepoix");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.categories, vec!["dinner".to_string()]);
    }

    #[test]
    fn non_owner_cannot_update_and_recipe_is_unchanged() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let bob = author("bob");
        let id = catalog.add(ana, draft("Soffritto"));

        let result = catalog.update(
            bob.id,
            id,
            RecipePatch {
                title: Some("Stolen".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(result, Err(CatalogError::NotOwner));
        assert_eq!(catalog.get(id).unwrap().title, "Soffritto");
    }

    #[test]
    fn non_owner_cannot_remove() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let bob = author("bob");
        let id = catalog.add(ana, draft("Soffritto"));

        assert_eq!(catalog.remove(bob.id, id), Err(CatalogError::NotOwner));
        assert!(catalog.get(id).is_some());
    }

    #[test]
    fn removing_unknown_id_is_not_found() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let missing = Uuid::new_v4();

        assert_eq!(
            catalog.remove(ana.id, missing),
            Err(CatalogError::NotFound(missing))
        );
    }

    #[test]
    fn updating_unknown_id_is_not_found() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let missing = Uuid::new_v4();

        assert_eq!(
            catalog.update(ana.id, missing, RecipePatch::default()),
            Err(CatalogError::NotFound(missing))
        );
    }

    #[test]
    fn remove_only_touches_the_target() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let first = catalog.add(ana.clone(), draft("First"));
        let second = catalog.add(ana.clone(), draft("Second"));

        catalog.remove(ana.id, first).unwrap();

        assert!(catalog.get(first).is_none());
        assert!(catalog.get(second).is_some());
    }

    #[test]
    fn newest_first_orders_by_creation_time() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let t1 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2025, 6, 3, 8, 0, 0).unwrap();

        catalog.add_at(ana.clone(), draft("Oldest"), t1);
        catalog.add_at(ana.clone(), draft("Middle"), t2);
        catalog.add_at(ana.clone(), draft("Newest"), t3);

        let titles: Vec<_> = catalog
            .newest_first()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn recipes_of_filters_by_author() {
        let mut catalog = Catalog::new();
        let ana = author("ana");
        let bob = author("bob");
        catalog.add(ana.clone(), draft("Ana's"));
        catalog.add(bob.clone(), draft("Bob's"));

        let mine = catalog.recipes_of(ana.id);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Ana's");
    }
}
