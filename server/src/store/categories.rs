use diesel::dsl::{count, exists, select};
use diesel::prelude::*;
use uuid::Uuid;

use crate::models::{Category, NewCategory, Recipe, User};
use crate::schema::{categories, recipes, users};

use super::recipes::{attach_relations, RecipeSummaryRecord};

/// All categories with the number of recipes in each, ordered by name.
pub fn list_with_counts(conn: &mut PgConnection) -> QueryResult<Vec<(Category, i64)>> {
    let rows: Vec<((Uuid, String), i64)> = categories::table
        .left_join(recipes::table)
        .group_by((categories::id, categories::name))
        .select((
            (categories::id, categories::name),
            count(recipes::id.nullable()),
        ))
        .order(categories::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|((id, name), recipe_count)| (Category { id, name }, recipe_count))
        .collect())
}

pub fn create(conn: &mut PgConnection, name: &str) -> QueryResult<Category> {
    diesel::insert_into(categories::table)
        .values(&NewCategory { name })
        .returning(Category::as_returning())
        .get_result(conn)
}

pub fn exists_by_id(conn: &mut PgConnection, category_id: Uuid) -> QueryResult<bool> {
    select(exists(
        categories::table.filter(categories::id.eq(category_id)),
    ))
    .get_result(conn)
}

/// One category together with its recipes newest-first, each with author
/// and tags attached.
pub fn load_with_recipes(
    conn: &mut PgConnection,
    category_id: Uuid,
) -> QueryResult<Option<(Category, Vec<RecipeSummaryRecord>)>> {
    let category: Option<Category> = categories::table
        .find(category_id)
        .select(Category::as_select())
        .first(conn)
        .optional()?;

    let Some(category) = category else {
        return Ok(None);
    };

    let rows: Vec<(Recipe, User)> = recipes::table
        .inner_join(users::table)
        .filter(recipes::category_id.eq(category_id))
        .order(recipes::created_at.desc())
        .select((Recipe::as_select(), User::as_select()))
        .load(conn)?;

    let recipes = attach_relations(conn, rows)?;

    Ok(Some((category, recipes)))
}
