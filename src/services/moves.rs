use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{db::DbPool, entities::move_history, errors::ServiceError, grid::Location};

/// Records returned by `list` when no explicit limit is given.
pub const DEFAULT_HISTORY_LIMIT: u64 = 50;

/// Input for one audit record.
#[derive(Debug, Clone)]
pub struct NewMove {
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub from: Location,
    pub to: Location,
    pub moved_by: Option<String>,
    pub notes: Option<String>,
}

/// Append-only relocation ledger. Observes the product store; never
/// constrains it.
#[derive(Clone)]
pub struct MoveHistoryService {
    db: Arc<DbPool>,
}

impl MoveHistoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Append one record.
    #[instrument(skip(self, new_move))]
    pub async fn record(&self, new_move: NewMove) -> Result<move_history::Model, ServiceError> {
        let record = move_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(new_move.product_id),
            product_name: Set(new_move.product_name),
            from_box: Set(new_move.from.box_no),
            from_row: Set(new_move.from.row_no),
            from_slot: Set(new_move.from.slot_no),
            to_box: Set(new_move.to.box_no),
            to_row: Set(new_move.to.row_no),
            to_slot: Set(new_move.to.slot_no),
            moved_at: Set(Utc::now()),
            moved_by: Set(new_move.moved_by),
            notes: Set(new_move.notes),
        }
        .insert(&*self.db)
        .await?;

        info!(
            move_id = %record.id,
            product = %record.product_name,
            from = %record.from_location(),
            to = %record.to_location(),
            "move recorded"
        );
        Ok(record)
    }

    /// Append one record, tolerating failure. The relocation that triggered
    /// the append has already committed; losing the history row must never
    /// surface to the caller.
    pub async fn record_best_effort(&self, new_move: NewMove) -> Option<move_history::Model> {
        match self.record(new_move).await {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("failed to append move history (relocation already committed): {}", err);
                None
            }
        }
    }

    /// Most recent moves, newest first, optionally filtered to one product.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: u64,
        product_id: Option<Uuid>,
    ) -> Result<Vec<move_history::Model>, ServiceError> {
        let mut query = move_history::Entity::find()
            .order_by_desc(move_history::Column::MovedAt)
            .limit(limit);

        if let Some(product_id) = product_id {
            query = query.filter(move_history::Column::ProductId.eq(product_id));
        }

        let records = query.all(&*self.db).await?;
        Ok(records)
    }
}
