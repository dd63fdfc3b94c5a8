use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{category, product, product_category},
    errors::ServiceError,
    events::{Event, EventSender},
    grid::{sanitize_search_query, validate_location, validate_product_name, GridLimits, Location},
    services::categories::infer_category_slug,
    services::moves::{MoveHistoryService, NewMove},
};

/// Input for product creation. Timestamps and the id are store-assigned.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_code: Option<String>,
    pub qr_code: Option<String>,
    pub location: Location,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_code: Option<String>,
    pub qr_code: Option<String>,
    pub box_no: Option<i32>,
    pub row_no: Option<i32>,
    pub slot_no: Option<i32>,
}

impl UpdateProductInput {
    fn touches_location(&self) -> bool {
        self.box_no.is_some() || self.row_no.is_some() || self.slot_no.is_some()
    }
}

/// Service owning slot assignment. All location mutations flow through
/// here; the unique index on (box_no, row_no, slot_no) backstops the
/// collision pre-checks against concurrent writers.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DbPool>,
    event_sender: EventSender,
    limits: GridLimits,
    move_log: Arc<MoveHistoryService>,
}

impl ProductService {
    pub fn new(
        db: Arc<DbPool>,
        event_sender: EventSender,
        limits: GridLimits,
        move_log: Arc<MoveHistoryService>,
    ) -> Self {
        Self {
            db,
            event_sender,
            limits,
            move_log,
        }
    }

    /// All products, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = product::Entity::find()
            .order_by_desc(product::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {}", id)))
    }

    /// Occupant of a slot, optionally ignoring one product id.
    async fn find_at_location(
        &self,
        location: Location,
        exclude: Option<Uuid>,
    ) -> Result<Option<product::Model>, ServiceError> {
        let mut query = product::Entity::find()
            .filter(product::Column::BoxNo.eq(location.box_no))
            .filter(product::Column::RowNo.eq(location.row_no))
            .filter(product::Column::SlotNo.eq(location.slot_no));

        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }

        let occupant = query.one(&*self.db).await?;
        Ok(occupant)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateProductInput) -> Result<product::Model, ServiceError> {
        validate_product_name(&input.name)?;
        validate_location(input.location, &self.limits)?;

        if self.find_at_location(input.location, None).await?.is_some() {
            debug!(location = %input.location, "create rejected: slot occupied");
            return Err(ServiceError::DuplicateLocation);
        }

        let now = Utc::now();
        let created = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            image_url: Set(input.image_url),
            product_code: Set(input.product_code),
            qr_code: Set(input.qr_code),
            box_no: Set(input.location.box_no),
            row_no: Set(input.location.row_no),
            slot_no: Set(input.location.slot_no),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(map_location_conflict)?;

        info!(product_id = %created.id, location = %created.location(), "product created");
        self.event_sender.emit(Event::ProductCreated(created.id)).await;
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get(id).await?;

        if let Some(name) = &input.name {
            validate_product_name(name)?;
        }

        let current = existing.location();
        let target = Location {
            box_no: input.box_no.unwrap_or(current.box_no),
            row_no: input.row_no.unwrap_or(current.row_no),
            slot_no: input.slot_no.unwrap_or(current.slot_no),
        };

        let touches_location = input.touches_location();

        if touches_location {
            validate_location(target, &self.limits)?;
            if self.find_at_location(target, Some(id)).await?.is_some() {
                debug!(location = %target, "update rejected: slot occupied");
                return Err(ServiceError::DuplicateLocation);
            }
        }

        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(product_code) = input.product_code {
            active.product_code = Set(Some(product_code));
        }
        if let Some(qr_code) = input.qr_code {
            active.qr_code = Set(Some(qr_code));
        }
        if touches_location {
            active.box_no = Set(target.box_no);
            active.row_no = Set(target.row_no);
            active.slot_no = Set(target.slot_no);
        }

        let updated = active
            .update(&*self.db)
            .await
            .map_err(map_location_conflict)?;

        info!(product_id = %updated.id, "product updated");
        self.event_sender.emit(Event::ProductUpdated(updated.id)).await;
        Ok(updated)
    }

    /// Idempotent delete: removing an id that never existed succeeds.
    /// Move history referencing the product is left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db;

        product_category::Entity::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(db)
            .await?;

        let result = product::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected > 0 {
            info!(product_id = %id, "product deleted");
            self.event_sender.emit(Event::ProductDeleted(id)).await;
        }
        Ok(())
    }

    /// Lookup by scanned value: `qr_code` first, then `product_code`; the
    /// first match wins. Neither column is unique, so ties are resolved by
    /// whichever row the store returns first.
    #[instrument(skip(self))]
    pub async fn find_by_code(&self, value: &str) -> Result<Option<product::Model>, ServiceError> {
        let db = &*self.db;

        if let Some(by_qr) = product::Entity::find()
            .filter(product::Column::QrCode.eq(value))
            .one(db)
            .await?
        {
            return Ok(Some(by_qr));
        }

        let by_code = product::Entity::find()
            .filter(product::Column::ProductCode.eq(value))
            .one(db)
            .await?;
        Ok(by_code)
    }

    /// Case-insensitive substring search over product names, optionally
    /// narrowed to one category. An empty query with no category filter is
    /// an empty result by contract; `list` is the "everything" call.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        category_id: Option<Uuid>,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let query = sanitize_search_query(query);
        if query.is_empty() && category_id.is_none() {
            return Ok(Vec::new());
        }

        let db = &*self.db;
        let mut find = product::Entity::find();
        if !query.is_empty() {
            let pattern = format!("%{}%", query.to_lowercase());
            find = find.filter(
                Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern),
            );
        }

        let mut products = find
            .order_by_asc(product::Column::Name)
            .all(db)
            .await?;

        if let Some(category_id) = category_id {
            let Some(category) = category::Entity::find_by_id(category_id).one(db).await? else {
                return Ok(Vec::new());
            };

            let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
            let assignments = product_category::Entity::find()
                .filter(product_category::Column::ProductId.is_in(ids))
                .all(db)
                .await?;

            let mut assigned: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
            for assignment in assignments {
                assigned
                    .entry(assignment.product_id)
                    .or_default()
                    .insert(assignment.category_id);
            }

            // Explicit assignment wins; inference only covers unassigned
            // products.
            products.retain(|p| match assigned.get(&p.id) {
                Some(categories) => categories.contains(&category_id),
                None => infer_category_slug(&p.name) == category.slug,
            });
        }

        Ok(products)
    }

    /// Relocate a product. The relocation and its audit record form one
    /// logical unit: the relocation never applies when the destination is
    /// held by another product, while a failed audit append is tolerated
    /// because the location state is already correct without it.
    #[instrument(skip(self))]
    pub async fn move_to(
        &self,
        product_id: Uuid,
        to: Location,
        moved_by: Option<String>,
    ) -> Result<product::Model, ServiceError> {
        validate_location(to, &self.limits)?;

        let product = self.get(product_id).await?;
        let from = product.location();

        if self
            .find_at_location(to, Some(product_id))
            .await?
            .is_some()
        {
            debug!(product_id = %product_id, to = %to, "move rejected: slot occupied");
            return Err(ServiceError::DuplicateLocation);
        }

        let mut active: product::ActiveModel = product.into();
        active.box_no = Set(to.box_no);
        active.row_no = Set(to.row_no);
        active.slot_no = Set(to.slot_no);

        let updated = active
            .update(&*self.db)
            .await
            .map_err(map_location_conflict)?;

        // A move onto the product's own slot still lands here and is
        // recorded with from == to.
        self.move_log
            .record_best_effort(NewMove {
                product_id: Some(updated.id),
                product_name: updated.name.clone(),
                from,
                to,
                moved_by,
                notes: None,
            })
            .await;

        info!(product_id = %updated.id, from = %from, to = %to, "product moved");
        self.event_sender
            .emit(Event::ProductMoved {
                product_id: updated.id,
                from,
                to,
            })
            .await;

        Ok(updated)
    }
}

/// Translate a unique-index violation on the location tuple into the
/// domain error; the pre-checks make this rare but a concurrent writer
/// can still lose the race.
fn map_location_conflict(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateLocation,
        _ => ServiceError::DatabaseError(err),
    }
}
