use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::policy;
use crate::store;
use crate::store::recipes::RecipeChanges;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    map_reference_violation, validate_scalars, IngredientPayload, RecipeResponse, StepPayload,
};

/// Partial update: omitted fields are left untouched. Providing
/// `ingredients` or `steps` replaces the stored collection entirely;
/// providing `tags` syncs the association set to exactly the given ids.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    /// One of: easy, medium, hard
    pub difficulty: Option<String>,
    pub category_id: Option<Uuid>,
    pub ingredients: Option<Vec<IngredientPayload>>,
    pub steps: Option<Vec<StepPayload>>,
    pub tags: Option<Vec<Uuid>>,
}

fn validate(request: &UpdateRecipeRequest) -> Result<(), ApiError> {
    if let Some(ref title) = request.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("title", "Title cannot be empty"));
        }
    }
    if let Some(ref description) = request.description {
        if description.trim().is_empty() {
            return Err(ApiError::validation(
                "description",
                "Description cannot be empty",
            ));
        }
    }
    if request.ingredients.as_ref().is_some_and(|i| i.is_empty()) {
        return Err(ApiError::validation(
            "ingredients",
            "At least one ingredient is required",
        ));
    }
    if request.steps.as_ref().is_some_and(|s| s.is_empty()) {
        return Err(ApiError::validation(
            "steps",
            "At least one step is required",
        ));
    }
    validate_scalars(
        request.prep_time,
        request.cook_time,
        request.servings,
        request.difficulty.as_deref(),
    )
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated, relations attached", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    // Ownership is checked before validation so a non-owner learns
    // nothing about the payload
    let author_id = store::recipes::author_of(&mut conn, id)?
        .ok_or(ApiError::NotFound("Recipe not found"))?;

    if !policy::can_mutate_recipe(&user, author_id) {
        return Err(ApiError::Forbidden("You may only modify your own recipes"));
    }

    validate(&request)?;

    if let Some(category_id) = request.category_id {
        if !store::categories::exists_by_id(&mut conn, category_id)? {
            return Err(ApiError::validation(
                "category_id",
                "Category does not exist",
            ));
        }
    }

    let changes = RecipeChanges {
        title: request.title,
        description: request.description,
        image: request.image,
        prep_time: request.prep_time,
        cook_time: request.cook_time,
        servings: request.servings,
        difficulty: request.difficulty,
        category_id: request.category_id,
        ingredients: request
            .ingredients
            .map(|entries| entries.into_iter().map(Into::into).collect()),
        steps: request
            .steps
            .map(|entries| entries.into_iter().map(Into::into).collect()),
        tags: request.tags,
    };

    store::recipes::update(&mut conn, id, changes).map_err(map_reference_violation)?;

    let full = store::recipes::load_full(&mut conn, id)?
        .ok_or(ApiError::Internal("Failed to reload updated recipe"))?;

    Ok(Json(RecipeResponse::from(full)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> UpdateRecipeRequest {
        UpdateRecipeRequest {
            title: None,
            description: None,
            image: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            difficulty: None,
            category_id: None,
            ingredients: None,
            steps: None,
            tags: None,
        }
    }

    #[test]
    fn all_fields_omitted_is_valid() {
        assert!(validate(&empty_request()).is_ok());
    }

    #[test]
    fn provided_blank_title_is_rejected() {
        let mut req = empty_request();
        req.title = Some("  ".to_string());
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "title", .. }));
    }

    #[test]
    fn provided_empty_ingredient_list_is_rejected() {
        let mut req = empty_request();
        req.ingredients = Some(vec![]);
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "ingredients", .. }
        ));
    }

    #[test]
    fn provided_empty_step_list_is_rejected() {
        let mut req = empty_request();
        req.steps = Some(vec![]);
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "steps", .. }));
    }

    #[test]
    fn empty_tag_list_is_a_valid_sync_target() {
        let mut req = empty_request();
        req.tags = Some(vec![]);
        assert!(validate(&req).is_ok());
    }
}
