use crate::api::{ApiError, ErrorResponse};
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{SessionResponse, UserResponse};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "user@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let user: Option<User> = users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(email) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(&request.email)
                .sql(")"),
        )
        .select(User::as_select())
        .first(&mut conn)
        .optional()?;

    // Same response for unknown email and wrong password
    let user = user.ok_or(ApiError::Unauthorized("Invalid email or password"))?;
    if !verify_password(&request.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid email or password"));
    }

    let token = create_session(&mut conn, user.id)?;

    Ok(Json(SessionResponse {
        user: UserResponse::from(user),
        token,
    }))
}
