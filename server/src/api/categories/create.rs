use crate::api::recipes::CategoryResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::policy;
use crate::store;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    // Content managers may manage recipes but not categories
    if !policy::can_manage_categories(&user) {
        return Err(ApiError::Forbidden(
            "Only administrators may manage categories",
        ));
    }

    if request.name.trim().is_empty() {
        return Err(ApiError::validation("name", "Name cannot be empty"));
    }

    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let category = store::categories::create(&mut conn, request.name.trim())?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}
