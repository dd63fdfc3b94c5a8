//! Grid coordinate space: the (box, row, slot) addressing scheme, the
//! configurable grid dimensions, and the pure validation rules every
//! mutation must pass before it reaches the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ServiceError;

/// Hard ceiling on product names, matching the storage column.
pub const MAX_NAME_LEN: usize = 255;

/// Search queries are truncated to this many characters before matching.
pub const MAX_QUERY_LEN: usize = 100;

/// Inclusive bounds for one grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Validation bounds for each axis of the grid. Locations are validated
/// against these, not against the currently displayed dimensions, so a
/// product placed under a larger layout stays addressable after the
/// client shrinks its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridLimits {
    pub boxes: AxisRange,
    pub rows: AxisRange,
    pub slots: AxisRange,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            boxes: AxisRange::new(1, 8),
            rows: AxisRange::new(1, 12),
            slots: AxisRange::new(1, 12),
        }
    }
}

/// Displayed grid shape: how many boxes, rows per box, and slots per row
/// the client renders. A presentation/validation parameter only; it is
/// never persisted per user on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridDimensions {
    pub boxes: i32,
    pub rows_per_box: i32,
    pub slots_per_row: i32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            boxes: 2,
            rows_per_box: 6,
            slots_per_row: 8,
        }
    }
}

impl GridDimensions {
    /// Clamp each axis into the configured limits.
    pub fn clamped(self, limits: &GridLimits) -> Self {
        Self {
            boxes: limits.boxes.clamp(self.boxes),
            rows_per_box: limits.rows.clamp(self.rows_per_box),
            slots_per_row: limits.slots.clamp(self.slots_per_row),
        }
    }

    pub fn total_slots(&self) -> i64 {
        self.boxes as i64 * self.rows_per_box as i64 * self.slots_per_row as i64
    }
}

/// A single slot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub box_no: i32,
    pub row_no: i32,
    pub slot_no: i32,
}

impl Location {
    pub const fn new(box_no: i32, row_no: i32, slot_no: i32) -> Self {
        Self {
            box_no,
            row_no,
            slot_no,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B{}-R{}-S{}", self.box_no, self.row_no, self.slot_no)
    }
}

/// Validate a slot address against the per-axis limits.
pub fn validate_location(location: Location, limits: &GridLimits) -> Result<(), ServiceError> {
    if !limits.boxes.contains(location.box_no) {
        return Err(ServiceError::ValidationError(format!(
            "Box number must be between {} and {}",
            limits.boxes.min, limits.boxes.max
        )));
    }

    if !limits.rows.contains(location.row_no) {
        return Err(ServiceError::ValidationError(format!(
            "Row number must be between {} and {}",
            limits.rows.min, limits.rows.max
        )));
    }

    if !limits.slots.contains(location.slot_no) {
        return Err(ServiceError::ValidationError(format!(
            "Slot number must be between {} and {}",
            limits.slots.min, limits.slots.max
        )));
    }

    Ok(())
}

/// Validate a product name: required, bounded, and free of `<`/`>`.
pub fn validate_product_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "Product name is required".to_string(),
        ));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::ValidationError(format!(
            "Product name must be less than {} characters",
            MAX_NAME_LEN
        )));
    }

    if name.contains(['<', '>']) {
        return Err(ServiceError::ValidationError(
            "Product name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Normalize a raw search query: trim, strip `<`/`>`, cap the length.
pub fn sanitize_search_query(query: &str) -> String {
    query
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_QUERY_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: GridLimits = GridLimits {
        boxes: AxisRange::new(1, 8),
        rows: AxisRange::new(1, 12),
        slots: AxisRange::new(1, 12),
    };

    #[test]
    fn location_bounds_are_inclusive() {
        assert!(validate_location(Location::new(1, 1, 1), &LIMITS).is_ok());
        assert!(validate_location(Location::new(8, 12, 12), &LIMITS).is_ok());
    }

    #[test]
    fn out_of_range_axes_are_rejected() {
        for bad in [
            Location::new(0, 1, 1),
            Location::new(9, 1, 1),
            Location::new(1, 0, 1),
            Location::new(1, 13, 1),
            Location::new(1, 1, 0),
            Location::new(1, 1, 13),
        ] {
            assert!(
                validate_location(bad, &LIMITS).is_err(),
                "expected {bad} to be rejected"
            );
        }
    }

    #[test]
    fn name_rules() {
        assert!(validate_product_name("Hydraulic pump").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(256)).is_err());
        assert!(validate_product_name("pump <script>").is_err());
    }

    #[test]
    fn query_sanitization_strips_and_truncates() {
        assert_eq!(sanitize_search_query("  bolt  "), "bolt");
        assert_eq!(sanitize_search_query("<b>bolt</b>"), "bbolt/b");
        assert_eq!(sanitize_search_query(&"q".repeat(500)).len(), MAX_QUERY_LEN);
    }

    #[test]
    fn dimensions_clamp_into_limits() {
        let dims = GridDimensions {
            boxes: 99,
            rows_per_box: 0,
            slots_per_row: 8,
        }
        .clamped(&LIMITS);
        assert_eq!(dims.boxes, 8);
        assert_eq!(dims.rows_per_box, 1);
        assert_eq!(dims.slots_per_row, 8);
        assert_eq!(dims.total_slots(), 8 * 1 * 8);
    }
}
