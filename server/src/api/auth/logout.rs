use crate::api::{ApiError, ErrorResponse};
use crate::auth::{delete_session, AuthUser};
use crate::db::DbPool;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    // The extractor has already validated this header
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized("Missing Authorization header"))?;

    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;
    delete_session(&mut conn, token)?;

    Ok(StatusCode::NO_CONTENT)
}
