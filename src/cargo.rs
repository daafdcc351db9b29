//! Cargo item model
//!
//! Normalizes a consignment's physical dimensions into weight and volume.
//! Volume is always recomputed from the dimensions: it is a method, never
//! a stored field, so it can never drift out of sync.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::error::{LoadPlanError, Result};
use crate::types::{ConsignmentState, Fragility, Priority};
use serde::{Deserialize, Serialize};

/// Cubic centimetres per cubic metre
const CM3_PER_M3: f64 = 1_000_000.0;

/// Physical dimensions of a consignment.
///
/// Linear measures are centimetres, weight is kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64, weight: f64) -> Self {
        Self {
            length,
            width,
            height,
            weight,
        }
    }

    /// Derived volume in cubic metres
    #[inline]
    pub fn volume_m3(&self) -> f64 {
        self.length * self.width * self.height / CM3_PER_M3
    }

    /// An item with any zero dimension cannot be placed in the load plan
    #[inline]
    pub fn is_placeable(&self) -> bool {
        self.length > 0.0 && self.width > 0.0 && self.height > 0.0
    }

    /// Validate the dimensions: every measure must be a non-negative,
    /// finite number. Zero is allowed (the item is simply unplaceable).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("weight", self.weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LoadPlanError::validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// A placement coordinate within the trailer load footprint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A consignment: one physical unit of goods tied to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoItem {
    pub id: String,
    pub job_id: String,
    pub title: String,
    pub customer: String,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub fragility: Fragility,
    /// Assigned placement, if the allocation engine has placed this item
    #[serde(default)]
    pub position: Option<Position>,
    /// Human-readable plot label ("P1", "P2", ...) assigned at placement
    #[serde(default)]
    pub plot_id: Option<String>,
    #[serde(default)]
    pub state: ConsignmentState,
}

impl CargoItem {
    /// Create a new cargo item with validated dimensions.
    ///
    /// The item starts unplaced in the `allocated` state.
    pub fn new(
        id: impl Into<String>,
        job_id: impl Into<String>,
        title: impl Into<String>,
        customer: impl Into<String>,
        dimensions: Dimensions,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(LoadPlanError::validation("cargo item id must not be empty"));
        }
        dimensions.validate()?;

        Ok(Self {
            id,
            job_id: job_id.into(),
            title: title.into(),
            customer: customer.into(),
            dimensions,
            priority: Priority::default(),
            fragility: Fragility::default(),
            position: None,
            plot_id: None,
            state: ConsignmentState::default(),
        })
    }

    /// Set the priority class (builder-style)
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the fragility class (builder-style)
    pub fn with_fragility(mut self, fragility: Fragility) -> Self {
        self.fragility = fragility;
        self
    }

    /// Derived volume in cubic metres
    #[inline]
    pub fn volume_m3(&self) -> f64 {
        self.dimensions.volume_m3()
    }

    /// Weight in kilograms
    #[inline]
    pub fn weight_kg(&self) -> f64 {
        self.dimensions.weight
    }

    /// True if the allocation engine may place this item
    #[inline]
    pub fn is_placeable(&self) -> bool {
        self.dimensions.is_placeable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pallet() -> CargoItem {
        CargoItem::new(
            "cargo-1",
            "job-1",
            "Pallet of tiles",
            "Acme Builders",
            Dimensions::new(120.0, 100.0, 150.0, 900.0),
        )
        .unwrap()
    }

    #[test]
    fn test_volume_is_recomputed_from_dimensions() {
        let mut item = pallet();
        // 120 * 100 * 150 cm³ = 1.8 m³
        assert!((item.volume_m3() - 1.8).abs() < 1e-9);

        // Changing a dimension changes the derived volume immediately
        item.dimensions.height = 300.0;
        assert!((item.volume_m3() - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_zero_dimension_is_unplaceable() {
        let mut item = pallet();
        item.dimensions.width = 0.0;
        assert!(!item.is_placeable());
        // Zero is not a validation failure, just unplaceable
        assert!(item.dimensions.validate().is_ok());
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let result = CargoItem::new(
            "cargo-2",
            "job-2",
            "Bad crate",
            "Acme",
            Dimensions::new(-10.0, 50.0, 50.0, 20.0),
        );
        assert!(matches!(result, Err(LoadPlanError::Validation(_))));
    }

    #[test]
    fn test_nan_dimension_rejected() {
        let dims = Dimensions::new(f64::NAN, 50.0, 50.0, 20.0);
        assert!(dims.validate().is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = CargoItem::new("  ", "job-1", "t", "c", Dimensions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_new_item_starts_allocated_and_unplaced() {
        let item = pallet();
        assert_eq!(item.state, ConsignmentState::Allocated);
        assert!(item.position.is_none());
        assert!(item.plot_id.is_none());
    }

    #[test]
    fn test_serde_uses_camel_case_field_names() {
        let item = pallet();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"jobId\""));
        assert!(json.contains("\"plotId\""));
        let back: CargoItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
