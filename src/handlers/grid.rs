use super::common::success_response;
use crate::{
    errors::ApiError,
    grid::{GridDimensions, GridLimits},
    handlers::AppState,
};
use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

/// Grid layout as configured on the server. Clients may render fewer
/// boxes/rows/slots but validation always runs against `limits`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GridResponse {
    pub dimensions: GridDimensions,
    pub limits: GridLimits,
    pub total_slots: i64,
}

/// Report the configured grid dimensions and validation limits
#[utoipa::path(
    get,
    path = "/api/v1/grid",
    responses(
        (status = 200, description = "Grid configuration", body = GridResponse)
    ),
    tag = "grid"
)]
pub async fn get_grid(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let dimensions = state.config.grid.dimensions();
    let limits = state.config.grid.limits();

    Ok(success_response(GridResponse {
        total_slots: dimensions.total_slots(),
        dimensions,
        limits,
    }))
}
