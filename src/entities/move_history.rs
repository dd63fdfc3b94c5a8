use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::grid::Location;

/// One relocation record. Append-only: rows are never mutated or deleted
/// by the service. `product_id` is a plain reference, not a foreign key,
/// so the ledger survives product deletion; `product_name` is a snapshot
/// taken at move time for exactly that reason.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = MoveRecord)]
#[sea_orm(table_name = "move_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub product_id: Option<Uuid>,

    pub product_name: String,

    pub from_box: i32,
    pub from_row: i32,
    pub from_slot: i32,

    pub to_box: i32,
    pub to_row: i32,
    pub to_slot: i32,

    pub moved_at: DateTime<Utc>,

    pub moved_by: Option<String>,

    pub notes: Option<String>,
}

impl Model {
    pub fn from_location(&self) -> Location {
        Location::new(self.from_box, self.from_row, self.from_slot)
    }

    pub fn to_location(&self) -> Location {
        Location::new(self.to_box, self.to_row, self.to_slot)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
