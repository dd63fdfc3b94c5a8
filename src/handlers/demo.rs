use super::common::{success_response, SuccessResponse};
use crate::{demo, errors::ApiError, events::Event, handlers::AppState};
use axum::{extract::State, response::IntoResponse};
use tracing::info;

/// Restore the demo inventory to its seeded state. Only available when
/// the service runs with `demo_mode` enabled.
#[utoipa::path(
    post,
    path = "/api/v1/demo/reset",
    responses(
        (status = 200, description = "Demo inventory restored", body = SuccessResponse),
        (status = 400, description = "Demo mode is disabled", body = crate::errors::ErrorResponse)
    ),
    tag = "demo"
)]
pub async fn reset_demo(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if !state.config.demo_mode {
        return Err(ApiError::BadRequest("Demo mode is disabled".to_string()));
    }

    let products = demo::reset(&state.db, state.config.grid.dimensions())
        .await
        .map_err(ApiError::ServiceError)?;

    info!(products, "demo inventory reset via API");
    state.event_sender.emit(Event::DemoReseeded { products }).await;

    Ok(success_response(SuccessResponse::ok()))
}
