use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::policy;
use crate::store;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let author_id = store::recipes::author_of(&mut conn, id)?
        .ok_or(ApiError::NotFound("Recipe not found"))?;

    if !policy::can_mutate_recipe(&user, author_id) {
        return Err(ApiError::Forbidden("You may only delete your own recipes"));
    }

    // Steps and pivot rows cascade at the database level
    let deleted = store::recipes::delete(&mut conn, id)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Recipe not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
