use super::common::{
    created_response, map_service_error, success_response, validate_input, SuccessResponse,
};
use crate::{
    entities::product,
    errors::ApiError,
    grid::Location,
    handlers::AppState,
    services::products::{CreateProductInput, UpdateProductInput},
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_code: Option<String>,
    pub qr_code: Option<String>,
    pub box_no: i32,
    pub row_no: i32,
    pub slot_no: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_code: Option<String>,
    pub qr_code: Option<String>,
    pub box_no: Option<i32>,
    pub row_no: Option<i32>,
    pub slot_no: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub product: product::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<product::Model>,
}

/// Query for code lookup; `barcode` is an accepted alias for `code`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LookupQuery {
    pub qr: Option<String>,
    pub code: Option<String>,
    pub barcode: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LookupResponse {
    pub product: Option<product::Model>,
}

// Handler functions

/// List all products, newest first
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products listed", body = ProductsResponse)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductsResponse { products }))
}

/// Create a new product in an empty slot
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failure or occupied slot", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = CreateProductInput {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        product_code: payload.product_code,
        qr_code: payload.qr_code,
        location: Location::new(payload.box_no, payload.row_no, payload.slot_no),
    };

    let product = state
        .services
        .products
        .create(input)
        .await
        .map_err(map_service_error)?;

    info!(product_id = %product.id, "product created via API");

    Ok(created_response(ProductResponse { product }))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product fetched", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse { product }))
}

/// Update a product (partial)
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failure or occupied slot", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = UpdateProductInput {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        product_code: payload.product_code,
        qr_code: payload.qr_code,
        box_no: payload.box_no,
        row_no: payload.row_no,
        slot_no: payload.slot_no,
    };

    let product = state
        .services
        .products
        .update(id, input)
        .await
        .map_err(map_service_error)?;

    info!(product_id = %product.id, "product updated via API");

    Ok(success_response(ProductResponse { product }))
}

/// Delete a product. Succeeds whether or not the product existed.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product removed (or was already absent)", body = SuccessResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(SuccessResponse::ok()))
}

/// Look up a product by scanned QR payload or product code
#[utoipa::path(
    get,
    path = "/api/v1/products/lookup",
    params(LookupQuery),
    responses(
        (status = 200, description = "Match result (product may be null)", body = LookupResponse),
        (status = 400, description = "Neither qr nor code given", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn lookup_product(
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let value = params
        .qr
        .or(params.code)
        .or(params.barcode)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("qr or code parameter is required".to_string()))?;

    let product = state
        .services
        .products
        .find_by_code(value.trim())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(LookupResponse { product }))
}

/// Creates the router for product endpoints
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/lookup", get(lookup_product))
        .route("/move", post(super::moves::move_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}
