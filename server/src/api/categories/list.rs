use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::store;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    /// Number of recipes in this category
    pub recipe_count: i64,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories with recipe counts", body = [CategoryWithCount]),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn list_categories(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<CategoryWithCount>>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let rows = store::categories::list_with_counts(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(category, recipe_count)| CategoryWithCount {
                id: category.id,
                name: category.name,
                recipe_count,
            })
            .collect(),
    ))
}
