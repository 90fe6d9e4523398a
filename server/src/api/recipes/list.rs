use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::store;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::RecipeSummaryResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of recipes available
    pub total: i64,
    /// The page that was returned (1-based)
    pub page: i64,
    /// Fixed page size
    pub per_page: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummaryResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Paginated recipes, newest first", body = ListRecipesResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);

    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let result = store::recipes::load_page(&mut conn, page)?;

    Ok(Json(ListRecipesResponse {
        recipes: result
            .recipes
            .into_iter()
            .map(RecipeSummaryResponse::from)
            .collect(),
        pagination: PaginationMetadata {
            total: result.total,
            page,
            per_page: store::recipes::PER_PAGE,
        },
    }))
}
