use crate::api::recipes::TagResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::store;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsResponse {
    /// All tags, sorted alphabetically
    pub tags: Vec<TagResponse>,
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags", body = TagsResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn list_tags(State(pool): State<Arc<DbPool>>) -> Result<Json<TagsResponse>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let tags = store::tags::list_all(&mut conn)?;

    Ok(Json(TagsResponse {
        tags: tags.into_iter().map(TagResponse::from).collect(),
    }))
}
