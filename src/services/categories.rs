use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{category, product_category},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Built-in category set seeded into every fresh database. Slugs are the
/// stable contract between stored categories and keyword inference.
pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    DefaultCategory {
        slug: "drive-systems",
        name: "Engines & Motors",
        color: "#3B82F6",
        icon: "Settings",
        description: "Engines, motors, and drive systems",
    },
    DefaultCategory {
        slug: "sensors-control",
        name: "Sensors & Control",
        color: "#10B981",
        icon: "Cpu",
        description: "Sensors, switches, and control equipment",
    },
    DefaultCategory {
        slug: "pumps-fluids",
        name: "Pumps & Fluids",
        color: "#F59E0B",
        icon: "Gauge",
        description: "Pumps, valves, fluids, and hydraulics",
    },
    DefaultCategory {
        slug: "mechanical-parts",
        name: "Mechanical Parts",
        color: "#EF4444",
        icon: "Cog",
        description: "Gears, belts, chains, and couplings",
    },
    DefaultCategory {
        slug: "tools-equipment",
        name: "Tools & Equipment",
        color: "#8B5CF6",
        icon: "Wrench",
        description: "Hand tools and site equipment",
    },
];

/// Catch-all slug used when no keyword rule matches.
pub const FALLBACK_SLUG: &str = "tools-equipment";

#[derive(Debug, Clone, Copy)]
pub struct DefaultCategory {
    pub slug: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

// Keyword rules evaluated in priority order; the first hit wins. Rules may
// overlap ("motor oil" is a drive-systems match, not pumps-fluids).
static INFERENCE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)(engine|motor|drive)").unwrap(),
            "drive-systems",
        ),
        (
            Regex::new(r"(?i)(sensor|controller|switch|control)").unwrap(),
            "sensors-control",
        ),
        (
            Regex::new(r"(?i)(pump|valve|fluid|oil)").unwrap(),
            "pumps-fluids",
        ),
        (
            Regex::new(r"(?i)(belt|gear|coupling|shaft|chain|sprocket)").unwrap(),
            "mechanical-parts",
        ),
    ]
});

/// Heuristic fallback classification by product name. Never authoritative:
/// an explicit `product_categories` row always takes precedence.
pub fn infer_category_slug(name: &str) -> &'static str {
    for (rule, slug) in INFERENCE_RULES.iter() {
        if rule.is_match(name) {
            return slug;
        }
    }
    FALLBACK_SLUG
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "category".to_string()
    } else {
        slug
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Service for category tagging
#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl CategoryService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Insert any missing default categories. Idempotent; called at startup.
    pub async fn ensure_defaults(&self) -> Result<(), ServiceError> {
        let db = &*self.db;
        for default in DEFAULT_CATEGORIES {
            let exists = category::Entity::find()
                .filter(category::Column::Slug.eq(default.slug))
                .one(db)
                .await?
                .is_some();
            if exists {
                continue;
            }

            let now = Utc::now();
            category::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(default.name.to_string()),
                color: Set(default.color.to_string()),
                icon: Set(default.icon.to_string()),
                description: Set(Some(default.description.to_string())),
                slug: Set(default.slug.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(db)
            .await?;
            info!(slug = default.slug, "seeded default category");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<category::Model, ServiceError> {
        category::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {}", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<category::Model, ServiceError> {
        if input.name.trim().is_empty()
            || input.color.trim().is_empty()
            || input.icon.trim().is_empty()
        {
            return Err(ServiceError::ValidationError(
                "Name, color, and icon are required".to_string(),
            ));
        }

        let now = Utc::now();
        let created = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_string()),
            color: Set(input.color.trim().to_string()),
            icon: Set(input.icon.trim().to_string()),
            description: Set(input.description),
            slug: Set(slugify(&input.name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::ValidationError(
                "A category with a similar name already exists".to_string(),
            ),
            _ => ServiceError::DatabaseError(err),
        })?;

        info!(category_id = %created.id, name = %created.name, "category created");
        self.event_sender.emit(Event::CategoryCreated(created.id)).await;
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<category::Model, ServiceError> {
        let existing = self.get(id).await?;

        let mut active: category::ActiveModel = existing.into();
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "Category name cannot be empty".to_string(),
                ));
            }
            active.name = Set(name.trim().to_string());
        }
        if let Some(color) = input.color {
            active.color = Set(color.trim().to_string());
        }
        if let Some(icon) = input.icon {
            active.icon = Set(icon.trim().to_string());
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;

        info!(category_id = %updated.id, "category updated");
        self.event_sender.emit(Event::CategoryUpdated(updated.id)).await;
        Ok(updated)
    }

    /// Idempotent delete: removing an unknown id succeeds. Assignment rows
    /// for the category are cleaned up alongside it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db;

        product_category::Entity::delete_many()
            .filter(product_category::Column::CategoryId.eq(id))
            .exec(db)
            .await?;

        let result = category::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected > 0 {
            info!(category_id = %id, "category deleted");
            self.event_sender.emit(Event::CategoryDeleted(id)).await;
        }
        Ok(())
    }

    /// Record an explicit product-to-category assignment. Re-assigning an
    /// existing pair is a no-op.
    #[instrument(skip(self))]
    pub async fn assign(&self, product_id: Uuid, category_id: Uuid) -> Result<(), ServiceError> {
        let result = product_category::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(())
            }
            Err(err) => Err(ServiceError::DatabaseError(err)),
        }
    }

    /// Explicit assignments for one product (may be empty).
    pub async fn categories_for(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<category::Model>, ServiceError> {
        let db = &*self.db;
        let assignments = product_category::Entity::find()
            .filter(product_category::Column::ProductId.eq(product_id))
            .all(db)
            .await?;

        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = assignments.iter().map(|a| a.category_id).collect();
        let categories = category::Entity::find()
            .filter(category::Column::Id.is_in(ids))
            .order_by_asc(category::Column::Name)
            .all(db)
            .await?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_follows_priority_order() {
        assert_eq!(infer_category_slug("Electric motor"), "drive-systems");
        assert_eq!(infer_category_slug("Pressure sensor"), "sensors-control");
        assert_eq!(infer_category_slug("Hydraulic pump"), "pumps-fluids");
        assert_eq!(infer_category_slug("Timing belt"), "mechanical-parts");
        assert_eq!(infer_category_slug("Claw hammer"), FALLBACK_SLUG);
    }

    #[test]
    fn overlapping_keywords_resolve_to_first_rule() {
        // "motor" (rule 1) beats "oil" (rule 3).
        assert_eq!(infer_category_slug("Motor oil 5W30"), "drive-systems");
        // "control" (rule 2) beats "valve" (rule 3).
        assert_eq!(infer_category_slug("Control valve"), "sensors-control");
    }

    #[test]
    fn inference_is_case_insensitive() {
        assert_eq!(infer_category_slug("GEAR BOX"), "mechanical-parts");
        assert_eq!(infer_category_slug("gear box"), "mechanical-parts");
    }

    #[test]
    fn slugify_normalizes_names() {
        assert_eq!(slugify("Spare Parts"), "spare-parts");
        assert_eq!(slugify("  Fasteners & Fixings  "), "fasteners-fixings");
        assert_eq!(slugify("!!!"), "category");
    }
}
