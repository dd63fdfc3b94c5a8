pub mod categories;
pub mod common;
pub mod demo;
pub mod grid;
pub mod health;
pub mod moves;
pub mod products;
pub mod search;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::grid::GridLimits;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<crate::services::products::ProductService>,
    pub categories: Arc<crate::services::categories::CategoryService>,
    pub moves: Arc<crate::services::moves::MoveHistoryService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender, limits: GridLimits) -> Self {
        let moves = Arc::new(crate::services::moves::MoveHistoryService::new(db.clone()));
        let categories = Arc::new(crate::services::categories::CategoryService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let products = Arc::new(crate::services::products::ProductService::new(
            db,
            event_sender,
            limits,
            moves.clone(),
        ));

        Self {
            products,
            categories,
            moves,
        }
    }
}
