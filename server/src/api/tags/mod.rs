pub mod list;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for tag endpoints (mounted at /api/tags)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_tags))
}

#[derive(OpenApi)]
#[openapi(paths(list::list_tags), components(schemas(list::TagsResponse)))]
pub struct ApiDoc;
