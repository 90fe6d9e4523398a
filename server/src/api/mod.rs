pub mod auth;
pub mod categories;
pub mod recipes;
pub mod tags;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Name of the offending field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }
}

/// Every handler failure, mapped onto the response taxonomy:
/// validation 422 (naming the field), not-found 404, unauthenticated 401,
/// forbidden 403, everything else 500 with a generic body.
#[derive(Debug)]
pub enum ApiError {
    Validation {
        field: &'static str,
        message: String,
    },
    NotFound(&'static str),
    Unauthorized(&'static str),
    Forbidden(&'static str),
    Internal(&'static str),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        ApiError::Internal("Database connection failed")
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        tracing::error!("database error: {}", e);
        ApiError::Internal("Database error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: message,
                    field: Some(field.to_string()),
                },
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(message))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, ErrorResponse::new(message)),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        auth::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        categories::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_serializes_field_name() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Title cannot be empty".to_string(),
            field: Some("title".to_string()),
        })
        .unwrap();
        assert_eq!(body["field"], "title");
    }

    #[test]
    fn plain_error_omits_field() {
        let body = serde_json::to_value(ErrorResponse::new("Recipe not found")).unwrap();
        assert!(body.get("field").is_none());
    }
}
