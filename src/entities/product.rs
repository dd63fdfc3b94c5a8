use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::grid::Location;

/// Product entity: one stored item occupying exactly one grid slot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Product)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Product name (1-255 characters, no angle brackets)
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// URL of an externally stored image; the store holds only the string
    pub image_url: Option<String>,

    /// Secondary lookup key; uniqueness is not enforced
    pub product_code: Option<String>,

    /// QR payload for scanner lookup; uniqueness is not enforced
    pub qr_code: Option<String>,

    /// Occupied box number
    pub box_no: i32,

    /// Occupied row number within the box
    pub row_no: i32,

    /// Occupied slot number within the row
    pub slot_no: i32,

    /// Creation timestamp (store-assigned)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn location(&self) -> Location {
        Location::new(self.box_no, self.row_no, self.slot_no)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_category::Entity")]
    ProductCategories,
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(Utc::now());
            }
        }
        active_model.updated_at = Set(Utc::now());

        Ok(active_model)
    }
}
