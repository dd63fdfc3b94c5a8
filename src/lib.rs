//! Slotfinder API Library
//!
//! Backend for a warehouse slot locator: products occupy exactly one slot
//! in a boxes/rows/slots grid, with search, relocation auditing, QR/code
//! lookup, and category tagging.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod demo;
pub mod entities;
pub mod errors;
pub mod events;
pub mod grid;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod undo;

use axum::{routing::get, routing::post, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Versioned API routes. Health probes and the Swagger UI are mounted
/// separately by the binary.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::routes())
        .nest("/categories", handlers::categories::routes())
        .nest("/move-history", handlers::moves::routes())
        .route("/search", get(handlers::search::search_products))
        .route("/grid", get(handlers::grid::get_grid))
        .route("/demo/reset", post(handlers::demo::reset_demo))
}
