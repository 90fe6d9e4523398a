use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use uuid::Uuid;

use crate::models::{
    Category, Ingredient, NewRecipe, NewRecipeIngredient, NewRecipeTag, NewStep, Recipe,
    RecipeChangeset, RecipeIngredient, Step, Tag, User,
};
use crate::schema::{
    categories, ingredients, recipe_ingredients, recipe_tags, recipes, steps, tags, users,
};

pub const PER_PAGE: i64 = 10;

/// One ingredient attachment: which ingredient, and the pivot columns.
#[derive(Debug, Clone)]
pub struct IngredientInput {
    pub ingredient_id: Uuid,
    pub amount: String,
    pub unit: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StepInput {
    pub step_number: i32,
    pub instruction: String,
    pub image: Option<String>,
}

/// Everything needed to create a recipe and its dependent rows.
#[derive(Debug)]
pub struct NewRecipeAggregate {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub category_id: Option<Uuid>,
    pub ingredients: Vec<IngredientInput>,
    pub steps: Vec<StepInput>,
    pub tags: Vec<Uuid>,
}

/// Partial update. `None` scalars are left untouched. A provided
/// `ingredients`/`steps` collection replaces the stored one wholesale;
/// a provided `tags` set is reconciled against the stored associations.
#[derive(Debug, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub category_id: Option<Uuid>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub steps: Option<Vec<StepInput>>,
    pub tags: Option<Vec<Uuid>>,
}

pub struct IngredientLine {
    pub ingredient: Ingredient,
    pub amount: String,
    pub unit: String,
    pub note: Option<String>,
}

/// A recipe with every relation materialized.
pub struct RecipeWithRelations {
    pub recipe: Recipe,
    pub author: User,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientLine>,
    pub steps: Vec<Step>,
}

/// A recipe as it appears in listings: category, tags and author
/// attached, but no ingredient or step rows.
pub struct RecipeSummaryRecord {
    pub recipe: Recipe,
    pub author: User,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

pub struct Page {
    pub recipes: Vec<RecipeSummaryRecord>,
    pub total: i64,
}

/// Resolves a recipe id to its author, or `None` if the recipe does not
/// exist. Used by the ownership guard before any mutation.
pub fn author_of(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<Option<Uuid>> {
    recipes::table
        .find(recipe_id)
        .select(recipes::user_id)
        .first(conn)
        .optional()
}

/// Creates the recipe row together with its ingredient pivots, steps and
/// tag associations in one transaction.
pub fn create(
    conn: &mut PgConnection,
    author_id: Uuid,
    input: NewRecipeAggregate,
) -> QueryResult<Uuid> {
    conn.transaction(|conn| {
        let new_recipe = NewRecipe {
            user_id: author_id,
            category_id: input.category_id,
            title: &input.title,
            description: &input.description,
            image: input.image.as_deref(),
            prep_time: input.prep_time,
            cook_time: input.cook_time,
            servings: input.servings,
            difficulty: input.difficulty.as_deref(),
        };

        let recipe_id: Uuid = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        insert_ingredients(conn, recipe_id, &input.ingredients)?;
        insert_steps(conn, recipe_id, &input.steps)?;
        insert_tag_links(conn, recipe_id, &input.tags)?;

        Ok(recipe_id)
    })
}

/// Applies a partial update in one transaction: scalar columns overwrite,
/// ingredients and steps are deleted and recreated when provided, tag
/// associations are synced to the given set when provided.
pub fn update(conn: &mut PgConnection, recipe_id: Uuid, changes: RecipeChanges) -> QueryResult<()> {
    conn.transaction(|conn| {
        let changeset = RecipeChangeset {
            category_id: changes.category_id,
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            image: changes.image.as_deref(),
            prep_time: changes.prep_time,
            cook_time: changes.cook_time,
            servings: changes.servings,
            difficulty: changes.difficulty.as_deref(),
            updated_at: Utc::now(),
        };

        diesel::update(recipes::table.find(recipe_id))
            .set(&changeset)
            .execute(conn)?;

        if let Some(entries) = &changes.ingredients {
            diesel::delete(
                recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?;
            insert_ingredients(conn, recipe_id, entries)?;
        }

        if let Some(entries) = &changes.steps {
            diesel::delete(steps::table.filter(steps::recipe_id.eq(recipe_id))).execute(conn)?;
            insert_steps(conn, recipe_id, entries)?;
        }

        if let Some(target) = &changes.tags {
            let current: Vec<Uuid> = recipe_tags::table
                .filter(recipe_tags::recipe_id.eq(recipe_id))
                .select(recipe_tags::tag_id)
                .load(conn)?;

            let plan = sync_plan(&current, target);

            if !plan.to_remove.is_empty() {
                diesel::delete(
                    recipe_tags::table
                        .filter(recipe_tags::recipe_id.eq(recipe_id))
                        .filter(recipe_tags::tag_id.eq_any(&plan.to_remove)),
                )
                .execute(conn)?;
            }

            insert_tag_links(conn, recipe_id, &plan.to_add)?;
        }

        Ok(())
    })
}

/// Deletes the recipe row. Steps and pivot rows cascade at the database
/// level; tags, ingredients and categories are untouched. Returns the
/// number of rows deleted.
pub fn delete(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<usize> {
    diesel::delete(recipes::table.find(recipe_id)).execute(conn)
}

/// One page of recipes, newest first, with the total match count taken
/// from a window function so listing costs a single query plus the
/// batched relation loads.
pub fn load_page(conn: &mut PgConnection, page: i64) -> QueryResult<Page> {
    let page = page.max(1);
    let offset = (page - 1) * PER_PAGE;

    let rows: Vec<(Recipe, User, i64)> = recipes::table
        .inner_join(users::table)
        .order(recipes::created_at.desc())
        .select((
            Recipe::as_select(),
            User::as_select(),
            sql::<BigInt>("COUNT(*) OVER()"),
        ))
        .limit(PER_PAGE)
        .offset(offset)
        .load(conn)?;

    let total = rows.first().map(|(_, _, total)| *total).unwrap_or(0);
    let rows: Vec<(Recipe, User)> = rows
        .into_iter()
        .map(|(recipe, author, _)| (recipe, author))
        .collect();

    let recipes = attach_relations(conn, rows)?;

    Ok(Page { recipes, total })
}

/// Loads one recipe with category, tags, ingredients (+pivot columns),
/// steps ordered by step number, and author.
pub fn load_full(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<RecipeWithRelations>> {
    let row: Option<(Recipe, User)> = recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), User::as_select()))
        .first(conn)
        .optional()?;

    let Some((recipe, author)) = row else {
        return Ok(None);
    };

    let category = match recipe.category_id {
        Some(category_id) => categories::table
            .find(category_id)
            .select(Category::as_select())
            .first(conn)
            .optional()?,
        None => None,
    };

    let tag_rows: Vec<Tag> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq(id))
        .select(Tag::as_select())
        .order(tags::name.asc())
        .load(conn)?;

    let ingredient_rows: Vec<(RecipeIngredient, Ingredient)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(id))
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .order(ingredients::name.asc())
        .load(conn)?;

    let ingredient_lines = ingredient_rows
        .into_iter()
        .map(|(pivot, ingredient)| IngredientLine {
            ingredient,
            amount: pivot.amount,
            unit: pivot.unit,
            note: pivot.note,
        })
        .collect();

    let step_rows: Vec<Step> = steps::table
        .filter(steps::recipe_id.eq(id))
        .order(steps::step_number.asc())
        .select(Step::as_select())
        .load(conn)?;

    Ok(Some(RecipeWithRelations {
        recipe,
        author,
        category,
        tags: tag_rows,
        ingredients: ingredient_lines,
        steps: step_rows,
    }))
}

/// Batch-attaches categories and tags to (recipe, author) rows, keeping
/// the input order.
pub(crate) fn attach_relations(
    conn: &mut PgConnection,
    rows: Vec<(Recipe, User)>,
) -> QueryResult<Vec<RecipeSummaryRecord>> {
    let recipe_ids: Vec<Uuid> = rows.iter().map(|(recipe, _)| recipe.id).collect();
    let mut tag_map = load_tags_for(conn, &recipe_ids)?;

    let category_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(recipe, _)| recipe.category_id)
        .collect();
    let category_map: HashMap<Uuid, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::table
            .filter(categories::id.eq_any(&category_ids))
            .select(Category::as_select())
            .load::<Category>(conn)?
            .into_iter()
            .map(|category| (category.id, category))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(recipe, author)| {
            let category = recipe
                .category_id
                .and_then(|id| category_map.get(&id).cloned());
            let tags = tag_map.remove(&recipe.id).unwrap_or_default();
            RecipeSummaryRecord {
                recipe,
                author,
                category,
                tags,
            }
        })
        .collect())
}

fn load_tags_for(
    conn: &mut PgConnection,
    recipe_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, Vec<Tag>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, Tag)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .select((recipe_tags::recipe_id, Tag::as_select()))
        .order(tags::name.asc())
        .load(conn)?;

    let mut map: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for (recipe_id, tag) in rows {
        map.entry(recipe_id).or_default().push(tag);
    }
    Ok(map)
}

fn insert_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    entries: &[IngredientInput],
) -> QueryResult<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let entries = dedup_last_wins(entries);
    let rows: Vec<NewRecipeIngredient> = entries
        .iter()
        .map(|entry| NewRecipeIngredient {
            recipe_id,
            ingredient_id: entry.ingredient_id,
            amount: &entry.amount,
            unit: &entry.unit,
            note: entry.note.as_deref(),
        })
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn insert_steps(conn: &mut PgConnection, recipe_id: Uuid, entries: &[StepInput]) -> QueryResult<()> {
    if entries.is_empty() {
        return Ok(());
    }

    // Caller-supplied numbering is persisted as given
    let rows: Vec<NewStep> = entries
        .iter()
        .map(|entry| NewStep {
            recipe_id,
            step_number: entry.step_number,
            instruction: &entry.instruction,
            image: entry.image.as_deref(),
        })
        .collect();

    diesel::insert_into(steps::table).values(&rows).execute(conn)?;
    Ok(())
}

fn insert_tag_links(conn: &mut PgConnection, recipe_id: Uuid, tag_ids: &[Uuid]) -> QueryResult<()> {
    let mut seen = HashSet::new();
    let rows: Vec<NewRecipeTag> = tag_ids
        .iter()
        .filter(|tag_id| seen.insert(**tag_id))
        .map(|&tag_id| NewRecipeTag { recipe_id, tag_id })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    diesel::insert_into(recipe_tags::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Collapses repeated ingredient ids, keeping the last occurrence's
/// pivot values at the first occurrence's position.
fn dedup_last_wins(entries: &[IngredientInput]) -> Vec<IngredientInput> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_id: HashMap<Uuid, IngredientInput> = HashMap::new();

    for entry in entries {
        if by_id.insert(entry.ingredient_id, entry.clone()).is_none() {
            order.push(entry.ingredient_id);
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}

#[derive(Debug, PartialEq)]
pub struct SyncPlan {
    pub to_add: Vec<Uuid>,
    pub to_remove: Vec<Uuid>,
}

/// Computes the association diff for a tag sync: links to create, links
/// to drop. Links present in both sets are untouched, so tag rows keep
/// their identity.
pub fn sync_plan(current: &[Uuid], target: &[Uuid]) -> SyncPlan {
    let current_set: HashSet<Uuid> = current.iter().copied().collect();
    let target_set: HashSet<Uuid> = target.iter().copied().collect();

    let mut seen = HashSet::new();
    let to_add = target
        .iter()
        .copied()
        .filter(|id| !current_set.contains(id) && seen.insert(*id))
        .collect();

    let to_remove = current
        .iter()
        .copied()
        .filter(|id| !target_set.contains(id))
        .collect();

    SyncPlan { to_add, to_remove }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [Uuid; N] {
        std::array::from_fn(|_| Uuid::new_v4())
    }

    #[test]
    fn sync_plan_adds_missing_and_removes_extra() {
        let [a, b, c] = ids();
        let plan = sync_plan(&[a, b], &[b, c]);
        assert_eq!(plan.to_add, vec![c]);
        assert_eq!(plan.to_remove, vec![a]);
    }

    #[test]
    fn sync_plan_is_empty_when_sets_match() {
        let [a, b] = ids();
        let plan = sync_plan(&[a, b], &[b, a]);
        assert!(plan.to_add.is_empty());
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn sync_plan_from_empty_adds_everything() {
        let [a, b] = ids();
        let plan = sync_plan(&[], &[a, b]);
        assert_eq!(plan.to_add, vec![a, b]);
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn sync_plan_to_empty_removes_everything() {
        let [a, b] = ids();
        let plan = sync_plan(&[a, b], &[]);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove, vec![a, b]);
    }

    #[test]
    fn sync_plan_ignores_duplicate_targets() {
        let [a, b] = ids();
        let plan = sync_plan(&[a], &[a, b, b]);
        assert_eq!(plan.to_add, vec![b]);
    }

    fn entry(ingredient_id: Uuid, amount: &str) -> IngredientInput {
        IngredientInput {
            ingredient_id,
            amount: amount.to_string(),
            unit: "g".to_string(),
            note: None,
        }
    }

    #[test]
    fn dedup_keeps_last_write_for_repeated_ingredient() {
        let [a, b] = ids();
        let deduped = dedup_last_wins(&[entry(a, "100"), entry(b, "5"), entry(a, "250")]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].ingredient_id, a);
        assert_eq!(deduped[0].amount, "250");
        assert_eq!(deduped[1].ingredient_id, b);
    }

    #[test]
    fn dedup_preserves_distinct_entries() {
        let [a, b, c] = ids();
        let deduped = dedup_last_wins(&[entry(a, "1"), entry(b, "2"), entry(c, "3")]);
        let order: Vec<Uuid> = deduped.iter().map(|e| e.ingredient_id).collect();
        assert_eq!(order, vec![a, b, c]);
    }
}
