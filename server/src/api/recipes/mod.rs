pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use potluck_core::Difficulty;

use crate::api::ApiError;
use crate::store::recipes::{
    IngredientInput, RecipeSummaryRecord, RecipeWithRelations, StepInput,
};
use crate::AppState;

/// Returns the router for recipe endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// One ingredient attachment in a create/update payload. The amount,
/// unit and note travel on the association, not the ingredient.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientPayload {
    pub ingredient_id: Uuid,
    pub amount: String,
    pub unit: String,
    pub note: Option<String>,
}

impl From<IngredientPayload> for IngredientInput {
    fn from(payload: IngredientPayload) -> Self {
        IngredientInput {
            ingredient_id: payload.ingredient_id,
            amount: payload.amount,
            unit: payload.unit,
            note: payload.note,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StepPayload {
    /// 1-based position; persisted as given
    pub step_number: i32,
    pub instruction: String,
    pub image: Option<String>,
}

impl From<StepPayload> for StepInput {
    fn from(payload: StepPayload) -> Self {
        StepInput {
            step_number: payload.step_number,
            instruction: payload.instruction,
            image: payload.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<crate::models::User> for AuthorResponse {
    fn from(user: crate::models::User) -> Self {
        AuthorResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<crate::models::Category> for CategoryResponse {
    fn from(category: crate::models::Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<crate::models::Tag> for TagResponse {
    fn from(tag: crate::models::Tag) -> Self {
        TagResponse {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientLineResponse {
    pub id: Uuid,
    pub name: String,
    pub amount: String,
    pub unit: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StepResponse {
    pub id: Uuid,
    pub step_number: i32,
    pub instruction: String,
    pub image: Option<String>,
}

/// A recipe with every relation attached, as returned by get/create/update.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    /// One of: easy, medium, hard
    pub difficulty: Option<String>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
    pub ingredients: Vec<IngredientLineResponse>,
    pub steps: Vec<StepResponse>,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeWithRelations> for RecipeResponse {
    fn from(full: RecipeWithRelations) -> Self {
        RecipeResponse {
            id: full.recipe.id,
            title: full.recipe.title,
            description: full.recipe.description,
            image: full.recipe.image,
            prep_time: full.recipe.prep_time,
            cook_time: full.recipe.cook_time,
            servings: full.recipe.servings,
            difficulty: full.recipe.difficulty,
            category: full.category.map(CategoryResponse::from),
            tags: full.tags.into_iter().map(TagResponse::from).collect(),
            ingredients: full
                .ingredients
                .into_iter()
                .map(|line| IngredientLineResponse {
                    id: line.ingredient.id,
                    name: line.ingredient.name,
                    amount: line.amount,
                    unit: line.unit,
                    note: line.note,
                })
                .collect(),
            steps: full
                .steps
                .into_iter()
                .map(|step| StepResponse {
                    id: step.id,
                    step_number: step.step_number,
                    instruction: step.instruction,
                    image: step.image,
                })
                .collect(),
            author: AuthorResponse::from(full.author),
            created_at: full.recipe.created_at,
            updated_at: full.recipe.updated_at,
        }
    }
}

/// A recipe as it appears in listings: no ingredient or step rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    /// One of: easy, medium, hard
    pub difficulty: Option<String>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeSummaryRecord> for RecipeSummaryResponse {
    fn from(record: RecipeSummaryRecord) -> Self {
        RecipeSummaryResponse {
            id: record.recipe.id,
            title: record.recipe.title,
            description: record.recipe.description,
            image: record.recipe.image,
            prep_time: record.recipe.prep_time,
            cook_time: record.recipe.cook_time,
            servings: record.recipe.servings,
            difficulty: record.recipe.difficulty,
            category: record.category.map(CategoryResponse::from),
            tags: record.tags.into_iter().map(TagResponse::from).collect(),
            author: AuthorResponse::from(record.author),
            created_at: record.recipe.created_at,
            updated_at: record.recipe.updated_at,
        }
    }
}

/// Validates the optional scalar fields shared by create and update.
pub(super) fn validate_scalars(
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    servings: Option<i32>,
    difficulty: Option<&str>,
) -> Result<(), ApiError> {
    if prep_time.is_some_and(|v| v < 0) {
        return Err(ApiError::validation(
            "prep_time",
            "Prep time cannot be negative",
        ));
    }
    if cook_time.is_some_and(|v| v < 0) {
        return Err(ApiError::validation(
            "cook_time",
            "Cook time cannot be negative",
        ));
    }
    if servings.is_some_and(|v| v <= 0) {
        return Err(ApiError::validation(
            "servings",
            "Servings must be positive",
        ));
    }
    if let Some(difficulty) = difficulty {
        if Difficulty::from_str(difficulty).is_none() {
            return Err(ApiError::validation(
                "difficulty",
                "Difficulty must be one of: easy, medium, hard",
            ));
        }
    }
    Ok(())
}

/// Maps foreign-key violations from aggregate writes onto validation
/// errors naming the collection that referenced a missing row.
pub(super) fn map_reference_violation(e: diesel::result::Error) -> ApiError {
    if let diesel::result::Error::DatabaseError(
        diesel::result::DatabaseErrorKind::ForeignKeyViolation,
        ref info,
    ) = e
    {
        let constraint = info.constraint_name().unwrap_or_default();
        if constraint.contains("ingredient") {
            return ApiError::validation("ingredients", "Unknown ingredient id");
        }
        if constraint.contains("tag") {
            return ApiError::validation("tags", "Unknown tag id");
        }
        if constraint.contains("category") {
            return ApiError::validation("category_id", "Unknown category id");
        }
    }
    ApiError::from(e)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        IngredientPayload,
        StepPayload,
        AuthorResponse,
        CategoryResponse,
        TagResponse,
        IngredientLineResponse,
        StepResponse,
        RecipeResponse,
        RecipeSummaryResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        list::ListRecipesResponse,
        list::PaginationMetadata,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_accept_absent_fields() {
        assert!(validate_scalars(None, None, None, None).is_ok());
    }

    #[test]
    fn scalars_accept_valid_values() {
        assert!(validate_scalars(Some(0), Some(45), Some(4), Some("hard")).is_ok());
    }

    #[test]
    fn negative_prep_time_is_rejected() {
        let err = validate_scalars(Some(-1), None, None, None).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "prep_time", .. }
        ));
    }

    #[test]
    fn zero_servings_is_rejected() {
        let err = validate_scalars(None, None, Some(0), None).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "servings", .. }
        ));
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = validate_scalars(None, None, None, Some("brutal")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation { field: "difficulty", .. }
        ));
    }
}
