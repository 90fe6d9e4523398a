pub mod login;
pub mod logout;
pub mod me;
pub mod register;

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::models::User;
use crate::AppState;

/// Returns the router for auth endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register::register))
        .route("/api/auth/login", post(login::login))
        .route("/api/auth/logout", post(logout::logout))
        .route("/api/auth/me", get(me::me))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub is_content_manager: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            is_admin: user.is_admin,
            is_content_manager: user.is_content_manager,
            created_at: user.created_at,
        }
    }
}

/// Session payload returned by register and login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(register::register, login::login, logout::logout, me::me),
    components(schemas(
        UserResponse,
        SessionResponse,
        register::RegisterRequest,
        login::LoginRequest,
    ))
)]
pub struct ApiDoc;
