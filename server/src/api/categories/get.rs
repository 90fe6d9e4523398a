use crate::api::recipes::RecipeSummaryResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::store;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithRecipesResponse {
    pub id: Uuid,
    pub name: String,
    /// This category's recipes, newest first, with author and tags
    pub recipes: Vec<RecipeSummaryResponse>,
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category with its recipes", body = CategoryWithRecipesResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryWithRecipesResponse>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let (category, recipes) = store::categories::load_with_recipes(&mut conn, id)?
        .ok_or(ApiError::NotFound("Category not found"))?;

    Ok(Json(CategoryWithRecipesResponse {
        id: category.id,
        name: category.name,
        recipes: recipes
            .into_iter()
            .map(RecipeSummaryResponse::from)
            .collect(),
    }))
}
