//! Demo-mode inventory. With `demo_mode` enabled the service seeds a
//! deterministic set of shop items on first start and exposes a reset
//! endpoint that restores the seed. The demo shares the production store,
//! so every invariant (slot uniqueness, audit appends) holds identically;
//! only the data is canned.

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{category, product, product_category},
    errors::ServiceError,
    grid::{GridDimensions, Location},
    services::categories::infer_category_slug,
};

/// Fixed PRNG seed so every fresh demo database lays out identically.
const SHUFFLE_SEED: u64 = 20260131;

/// Shop inventory used to populate the demo grid. Names deliberately span
/// every inference bucket, including the catch-all.
const DEMO_ITEMS: &[&str] = &[
    "Sledgehammer",
    "Screwdriver set",
    "Adjustable wrench",
    "Combination pliers",
    "Power drill",
    "Hand saw",
    "Tape measure",
    "Spirit level",
    "Utility knife",
    "Hex key set",
    "Socket wrench set",
    "Pipe wrench",
    "Wire cutters",
    "Coping saw",
    "Wood chisel",
    "Metal file",
    "C-clamp",
    "Hand vise",
    "Rubber mallet",
    "Hatchet",
    "Engine oil 5W30",
    "Synthetic motor oil",
    "Brake fluid",
    "Gear oil",
    "Power steering fluid",
    "Car tire",
    "Mud tire",
    "Inner tube",
    "Car battery",
    "Spark plug",
    "Air filter",
    "Oil filter",
    "Fuel filter",
    "Brake pads",
    "Brake disc",
    "Shock absorber",
    "Wiper blade",
    "Headlight bulb",
    "Blade fuse assortment",
    "Hydraulic jack",
    "Jumper cables",
    "Tire pressure gauge",
    "Air compressor",
    "Car polisher",
    "Car shampoo",
    "Microfiber cloth",
    "Wash sponge",
    "Plastic bucket",
    "Safety goggles",
    "Work gloves",
    "Safety helmet",
    "Ear defenders",
    "Dust mask",
    "Reflective vest",
    "Safety boots",
    "Steel toolbox",
    "Tool bag",
    "Extension cord",
    "Power strip",
    "LED flashlight",
    "Work light",
    "Aluminum ladder",
    "Step stool",
    "Hand truck",
    "Garden trowel",
    "Leaf rake",
    "Garden hose",
    "Paint brush",
    "Paint roller",
    "Masking tape",
    "Duct tape",
    "Electrical tape",
    "Super glue",
    "Silicone sealant",
    "Lubricant spray",
    "Rust remover",
    "Sandpaper pack",
    "Polishing wool",
    "Cable ties",
];

/// All slot addresses of the grid, deterministically shuffled so seeded
/// products scatter instead of filling box 1 first.
fn shuffled_positions(dims: GridDimensions) -> Vec<Location> {
    let slots_per_box = dims.rows_per_box * dims.slots_per_row;
    let total = dims.boxes * slots_per_box;

    let mut positions: Vec<Location> = (0..total)
        .map(|index| {
            let box_no = index / slots_per_box + 1;
            let within_box = index % slots_per_box;
            Location::new(
                box_no,
                within_box / dims.slots_per_row + 1,
                within_box % dims.slots_per_row + 1,
            )
        })
        .collect();

    let mut seed = SHUFFLE_SEED;
    let mut rand = move || {
        seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) % 4_294_967_296;
        seed as f64 / 4_294_967_296.0
    };

    for i in (1..positions.len()).rev() {
        let j = (rand() * (i as f64 + 1.0)) as usize;
        positions.swap(i, j);
    }

    positions
}

/// Seed the demo inventory when the product table is empty. Returns the
/// number of products inserted (0 when data already exists).
#[instrument(skip(db))]
pub async fn seed_if_empty(db: &DbPool, dims: GridDimensions) -> Result<usize, ServiceError> {
    let existing = product::Entity::find().count(db).await?;
    if existing > 0 {
        info!(existing, "demo seed skipped; products already present");
        return Ok(0);
    }
    seed(db, dims).await
}

/// Restore the demo seed: all products and their category assignments are
/// replaced. Move history is an append-only ledger and is left untouched.
#[instrument(skip(db))]
pub async fn reset(db: &DbPool, dims: GridDimensions) -> Result<usize, ServiceError> {
    product_category::Entity::delete_many().exec(db).await?;
    product::Entity::delete_many().exec(db).await?;
    seed(db, dims).await
}

async fn seed(db: &DbPool, dims: GridDimensions) -> Result<usize, ServiceError> {
    let positions = shuffled_positions(dims);
    let count = DEMO_ITEMS.len().min(positions.len());

    // Inference slugs resolve to whatever the seeded default categories
    // carry in this database.
    let categories = category::Entity::find().all(db).await?;
    let by_slug: HashMap<String, Uuid> = categories
        .into_iter()
        .map(|c| (c.slug, c.id))
        .collect();

    let base = Utc
        .with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .expect("valid seed timestamp");

    for (i, name) in DEMO_ITEMS.iter().take(count).enumerate() {
        let position = positions[i];
        let created_at = base + Duration::minutes(i as i64);

        let inserted = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(None),
            image_url: Set(Some(format!("/demo-products/item-{:03}.jpg", i + 1))),
            product_code: Set(Some(format!("SKU-{:04}", i + 1))),
            qr_code: Set(Some(format!("QR-{:04}", i + 1))),
            box_no: Set(position.box_no),
            row_no: Set(position.row_no),
            slot_no: Set(position.slot_no),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        }
        .insert(db)
        .await?;

        if let Some(category_id) = by_slug.get(infer_category_slug(name)) {
            product_category::ActiveModel {
                product_id: Set(inserted.id),
                category_id: Set(*category_id),
                created_at: Set(created_at),
            }
            .insert(db)
            .await?;
        }
    }

    info!(count, "demo inventory seeded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_deterministic_and_collision_free() {
        let dims = GridDimensions::default();
        let first = shuffled_positions(dims);
        let second = shuffled_positions(dims);
        assert_eq!(first, second);

        let unique: std::collections::HashSet<_> = first.iter().collect();
        assert_eq!(unique.len() as i64, dims.total_slots());
    }

    #[test]
    fn demo_items_fit_the_default_grid() {
        let dims = GridDimensions::default();
        assert!(DEMO_ITEMS.len() as i64 <= dims.total_slots());
    }

    #[test]
    fn positions_stay_inside_dimensions() {
        let dims = GridDimensions {
            boxes: 3,
            rows_per_box: 4,
            slots_per_row: 5,
        };
        for p in shuffled_positions(dims) {
            assert!((1..=3).contains(&p.box_no));
            assert!((1..=4).contains(&p.row_no));
            assert!((1..=5).contains(&p.slot_no));
        }
    }
}
