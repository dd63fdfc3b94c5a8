use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slotfinder API",
        description = r#"
Warehouse slot locator backend.

Products occupy exactly one slot in a boxes/rows/slots grid. The API
covers product CRUD with duplicate-slot rejection, relocation with an
append-only move history, name/category search, QR and product-code
lookup, and category tagging.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::create_product,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::lookup_product,
        crate::handlers::moves::move_product,
        crate::handlers::moves::list_move_history,
        crate::handlers::moves::record_move,
        crate::handlers::search::search_products,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::create_category,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::grid::get_grid,
        crate::handlers::demo::reset_demo,
    ),
    tags(
        (name = "products", description = "Product storage and lookup"),
        (name = "moves", description = "Relocation and audit history"),
        (name = "search", description = "Name and category search"),
        (name = "categories", description = "Category tagging"),
        (name = "grid", description = "Grid configuration"),
        (name = "demo", description = "Demo-mode helpers")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
