use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::store;
use crate::store::recipes::NewRecipeAggregate;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    map_reference_violation, validate_scalars, IngredientPayload, RecipeResponse, StepPayload,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    /// One of: easy, medium, hard
    pub difficulty: Option<String>,
    pub category_id: Option<Uuid>,
    pub ingredients: Vec<IngredientPayload>,
    pub steps: Vec<StepPayload>,
    pub tags: Option<Vec<Uuid>>,
}

fn validate(request: &CreateRecipeRequest) -> Result<(), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::validation("title", "Title cannot be empty"));
    }
    if request.description.trim().is_empty() {
        return Err(ApiError::validation(
            "description",
            "Description cannot be empty",
        ));
    }
    if request.ingredients.is_empty() {
        return Err(ApiError::validation(
            "ingredients",
            "At least one ingredient is required",
        ));
    }
    if request.steps.is_empty() {
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
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created, relations attached", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    validate(&request)?;

    let mut conn = pool.get().map_err(|_| ApiError::db_unavailable())?;

    if let Some(category_id) = request.category_id {
        if !store::categories::exists_by_id(&mut conn, category_id)? {
            return Err(ApiError::validation(
                "category_id",
                "Category does not exist",
            ));
        }
    }

    let input = NewRecipeAggregate {
        title: request.title,
        description: request.description,
        image: request.image,
        prep_time: request.prep_time,
        cook_time: request.cook_time,
        servings: request.servings,
        difficulty: request.difficulty,
        category_id: request.category_id,
        ingredients: request.ingredients.into_iter().map(Into::into).collect(),
        steps: request.steps.into_iter().map(Into::into).collect(),
        tags: request.tags.unwrap_or_default(),
    };

    let recipe_id =
        store::recipes::create(&mut conn, user.id, input).map_err(map_reference_violation)?;

    let full = store::recipes::load_full(&mut conn, recipe_id)?
        .ok_or(ApiError::Internal("Failed to reload created recipe"))?;

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(full))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: "Shakshuka".to_string(),
            description: "Eggs poached in spiced tomato sauce".to_string(),
            image: None,
            prep_time: Some(10),
            cook_time: Some(25),
            servings: Some(2),
            difficulty: Some("easy".to_string()),
            category_id: None,
            ingredients: vec![IngredientPayload {
                ingredient_id: Uuid::new_v4(),
                amount: "4".to_string(),
                unit: "pcs".to_string(),
                note: None,
            }],
            steps: vec![StepPayload {
                step_number: 1,
                instruction: "Simmer the sauce".to_string(),
                image: None,
            }],
            tags: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut req = request();
        req.title = "   ".to_string();
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "title", .. }));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut req = request();
        req.description = String::new();
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "description", .. }
        ));
    }

    #[test]
    fn empty_ingredients_are_rejected() {
        let mut req = request();
        req.ingredients.clear();
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "ingredients", .. }
        ));
    }

    #[test]
    fn empty_steps_are_rejected() {
        let mut req = request();
        req.steps.clear();
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "steps", .. }));
    }

    #[test]
    fn bad_difficulty_is_rejected() {
        let mut req = request();
        req.difficulty = Some("impossible".to_string());
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "difficulty", .. }
        ));
    }
}
