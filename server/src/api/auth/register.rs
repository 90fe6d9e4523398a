use crate::api::{ApiError, ErrorResponse};
use crate::auth::{create_session, hash_password};
use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{SessionResponse, UserResponse};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn validate(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::validation("username", "Username cannot be empty"));
    }
    if !request.email.contains('@') {
        return Err(ApiError::validation("email", "Email address is invalid"));
    }
    if request.password.chars().count() < 8 {
        return Err(ApiError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body(content = RegisterRequest, example = json!({"username": "user", "email": "user@example.com", "password": "password"})),
    responses(
        (status = 201, description = "User created", body = SessionResponse),
        (status = 422, description = "Validation failed or already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    validate(&request)?;

    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    let password_hash = hash_password(&request.password)
        .map_err(|_| ApiError::Internal("Failed to hash password"))?;

    let new_user = NewUser {
        username: &request.username,
        email: &request.email,
        password_hash: &password_hash,
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(user) => user,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            info,
        )) => {
            let (field, message) = if info.constraint_name().unwrap_or_default().contains("email") {
                ("email", "Email already taken")
            } else {
                ("username", "Username already taken")
            };
            return Err(ApiError::validation(field, message));
        }
        Err(e) => return Err(ApiError::from(e)),
    };

    let token = create_session(&mut conn, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user: UserResponse::from(user),
            token,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            password: "correcthorse".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn blank_username_is_rejected() {
        let mut req = request();
        req.username = " ".to_string();
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "username", .. }
        ));
    }

    #[test]
    fn mail_without_at_sign_is_rejected() {
        let mut req = request();
        req.email = "maria.example.com".to_string();
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "email", .. }));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut req = request();
        req.password = "short".to_string();
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "password", .. }
        ));
    }
}
