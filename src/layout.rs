//! Trailer layout
//!
//! The capacity envelope and placed cargo items for one vehicle. The
//! layout owns its cargo collection; totals and utilization are always
//! derived through [`TrailerLayout::summary`], never stored, so they can
//! never go stale.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::capacity::CapacitySummary;
use crate::cargo::{CargoItem, Position};
use crate::engine::allocation::{self, AllocationConfig, Envelope};
use crate::error::{LoadPlanError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One vehicle's load: physical envelope, capacity ceilings, and the
/// ordered cargo collection.
///
/// Linear measures are centimetres; `max_weight` is kilograms and
/// `max_volume` cubic metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerLayout {
    pub id: String,
    pub vehicle_id: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub max_weight: f64,
    pub max_volume: f64,
    #[serde(default)]
    items: Vec<CargoItem>,
}

impl TrailerLayout {
    /// Create an empty layout with a validated envelope.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        length: f64,
        width: f64,
        height: f64,
        max_weight: f64,
        max_volume: f64,
    ) -> Result<Self> {
        for (name, value) in [
            ("length", length),
            ("width", width),
            ("height", height),
            ("maxWeight", max_weight),
            ("maxVolume", max_volume),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LoadPlanError::validation(format!(
                    "trailer {name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            length,
            width,
            height,
            max_weight,
            max_volume,
            items: Vec::new(),
        })
    }

    /// The cargo collection, in load order
    pub fn items(&self) -> &[CargoItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&CargoItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut CargoItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LoadPlanError::unknown_item(id))
    }

    /// Add a consignment to the layout. Ids must be unique within a
    /// layout.
    pub fn add_item(&mut self, item: CargoItem) -> Result<()> {
        if self.find(&item.id).is_some() {
            return Err(LoadPlanError::validation(format!(
                "duplicate cargo item id '{}'",
                item.id
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove a consignment (explicit operator delete). Returns the
    /// removed item.
    pub fn remove_item(&mut self, id: &str) -> Result<CargoItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LoadPlanError::unknown_item(id))?;
        Ok(self.items.remove(idx))
    }

    /// The 2-D plan-view footprint for the allocation engine: x runs
    /// along the trailer length, y across its width.
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.length, self.width)
    }

    /// Single recomputation entry point for the derived totals.
    pub fn summary(&self) -> CapacitySummary {
        CapacitySummary::recompute(&self.items, self.max_weight, self.max_volume)
    }

    /// Run the allocation engine over the current cargo collection,
    /// replacing every placement.
    pub fn allocate(&mut self, config: &AllocationConfig) {
        self.items = allocation::allocate(&self.items, &self.envelope(), config);
        let summary = self.summary();
        info!(
            layout = %self.id,
            items = self.items.len(),
            utilization = format!("{:.1}%", summary.utilization_percentage),
            overloaded = summary.is_overloaded(),
            "allocated trailer layout"
        );
    }

    /// Reject a consignment's placement.
    pub fn reject(&mut self, id: &str) -> Result<()> {
        self.find_mut(id)?.reject();
        Ok(())
    }

    /// Accept a previously rejected consignment. Returns true if the
    /// state changed (no-op unless the item was rejected).
    pub fn accept(&mut self, id: &str) -> Result<bool> {
        Ok(self.find_mut(id)?.accept())
    }

    /// Manually reposition a consignment.
    pub fn move_item(&mut self, id: &str, new_position: Position) -> Result<()> {
        self.find_mut(id)?.move_to(new_position);
        Ok(())
    }
}
