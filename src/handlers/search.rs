use super::common::{map_service_error, success_response};
use super::products::ProductsResponse;
use crate::{errors::ApiError, handlers::AppState};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match against product names (case-insensitive)
    pub q: Option<String>,
    /// Category id to filter by (assigned category, or inferred when
    /// no assignment exists)
    pub category: Option<Uuid>,
}

/// Search products by name and/or category. With neither parameter the
/// result is empty by contract; use `GET /products` for the full list.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = ProductsResponse)
    ),
    tag = "search"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.q.unwrap_or_default();

    let products = state
        .services
        .products
        .search(&query, params.category)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductsResponse { products }))
}
