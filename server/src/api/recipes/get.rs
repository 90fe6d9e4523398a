use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::store;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::RecipeResponse;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with all relations", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let full = store::recipes::load_full(&mut conn, id)?
        .ok_or(ApiError::NotFound("Recipe not found"))?;

    Ok(Json(RecipeResponse::from(full)))
}
