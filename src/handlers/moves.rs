use super::common::{created_response, map_service_error, success_response, validate_input};
use crate::{
    entities::move_history,
    errors::ApiError,
    grid::Location,
    handlers::AppState,
    services::moves::{NewMove, DEFAULT_HISTORY_LIMIT},
};
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveProductRequest {
    pub product_id: Uuid,
    pub to_box: i32,
    pub to_row: i32,
    pub to_slot: i32,
    pub moved_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordMoveRequest {
    pub product_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "product_name must be 1-255 characters"))]
    pub product_name: String,
    pub from_box: i32,
    pub from_row: i32,
    pub from_slot: i32,
    pub to_box: i32,
    pub to_row: i32,
    pub to_slot: i32,
    pub moved_by: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MoveHistoryQuery {
    /// Maximum records to return (default 50)
    pub limit: Option<u64>,
    /// Restrict to one product
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovesResponse {
    pub moves: Vec<move_history::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MoveRecordResponse {
    pub record: move_history::Model,
}

// Handler functions

/// Relocate a product to a new slot
#[utoipa::path(
    post,
    path = "/api/v1/products/move",
    request_body = MoveProductRequest,
    responses(
        (status = 200, description = "Product relocated", body = super::products::ProductResponse),
        (status = 400, description = "Destination invalid or occupied", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "moves"
)]
pub async fn move_product(
    State(state): State<AppState>,
    Json(payload): Json<MoveProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let to = Location::new(payload.to_box, payload.to_row, payload.to_slot);

    let product = state
        .services
        .products
        .move_to(payload.product_id, to, payload.moved_by)
        .await
        .map_err(map_service_error)?;

    info!(product_id = %product.id, to = %to, "product moved via API");

    Ok(success_response(super::products::ProductResponse {
        product,
    }))
}

/// List recent moves, newest first
#[utoipa::path(
    get,
    path = "/api/v1/move-history",
    params(MoveHistoryQuery),
    responses(
        (status = 200, description = "Moves listed", body = MovesResponse)
    ),
    tag = "moves"
)]
pub async fn list_move_history(
    State(state): State<AppState>,
    Query(params): Query<MoveHistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 500);

    let moves = state
        .services
        .moves
        .list(limit, params.product_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(MovesResponse { moves }))
}

/// Record a move performed outside the move endpoint (manual audit entry)
#[utoipa::path(
    post,
    path = "/api/v1/move-history",
    request_body = RecordMoveRequest,
    responses(
        (status = 201, description = "Move recorded", body = MoveRecordResponse),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse)
    ),
    tag = "moves"
)]
pub async fn record_move(
    State(state): State<AppState>,
    Json(payload): Json<RecordMoveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let record = state
        .services
        .moves
        .record(NewMove {
            product_id: payload.product_id,
            product_name: payload.product_name,
            from: Location::new(payload.from_box, payload.from_row, payload.from_slot),
            to: Location::new(payload.to_box, payload.to_row, payload.to_slot),
            moved_by: payload.moved_by,
            notes: payload.notes,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(MoveRecordResponse { record }))
}

/// Creates the router for move history endpoints
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_move_history).post(record_move))
}
