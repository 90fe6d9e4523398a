pub mod create;
pub mod get;
pub mod list;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for category endpoints (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_categories).post(create::create_category),
        )
        .route("/{id}", get(get::get_category))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_categories, get::get_category, create::create_category),
    components(schemas(
        list::CategoryWithCount,
        get::CategoryWithRecipesResponse,
        create::CreateCategoryRequest,
    ))
)]
pub struct ApiDoc;
