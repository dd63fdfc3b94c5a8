use super::common::{
    created_response, map_service_error, success_response, validate_input, SuccessResponse,
};
use crate::{
    entities::category,
    errors::ApiError,
    handlers::AppState,
    services::categories::{CreateCategoryInput, UpdateCategoryInput},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 16, message = "color is required"))]
    pub color: String,
    #[validate(length(min = 1, max = 64, message = "icon is required"))]
    pub icon: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub category: category::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<category::Model>,
}

// Handler functions

/// List all categories ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories listed", body = CategoriesResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .services
        .categories
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoriesResponse { categories }))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .create(CreateCategoryInput {
            name: payload.name,
            color: payload.color,
            icon: payload.icon,
            description: payload.description,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(CategoryResponse { category }))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category fetched", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .services
        .categories
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryResponse { category }))
}

/// Update a category (partial)
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .update(
            id,
            UpdateCategoryInput {
                name: payload.name,
                color: payload.color,
                icon: payload.icon,
                description: payload.description,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryResponse { category }))
}

/// Delete a category. Succeeds whether or not the category existed.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category removed (or was already absent)", body = SuccessResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .categories
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(SuccessResponse::ok()))
}

/// Creates the router for category endpoints
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
