//! Load plan store
//!
//! Named, versioned snapshots of a layout for later recall. A saved plan
//! is a deep snapshot: later mutation of the live layout never affects it,
//! and `load(save(...).id)` reproduces the exact cargo and delivery sets
//! that were passed in.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::error::{LoadPlanError, Result};
use crate::layout::TrailerLayout;
use crate::sequencing::DeliveryItem;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A named snapshot of a trailer layout and its delivery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPlan {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Unix seconds at save time
    pub created_at: u64,
    pub layout: TrailerLayout,
    #[serde(default)]
    pub deliveries: Vec<DeliveryItem>,
}

/// In-memory registry of saved load plans.
#[derive(Debug, Default)]
pub struct LoadPlanStore {
    plans: Vec<LoadPlan>,
    next_id: u64,
}

impl LoadPlanStore {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            next_id: 1,
        }
    }

    /// Snapshot `layout` and `deliveries` under a name. Assigns a
    /// monotonic id and a creation timestamp, and stores deep copies.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        layout: &TrailerLayout,
        deliveries: &[DeliveryItem],
    ) -> &LoadPlan {
        let plan = LoadPlan {
            id: self.next_id,
            name: name.into(),
            description: description.into(),
            created_at: unix_now(),
            layout: layout.clone(),
            deliveries: deliveries.to_vec(),
        };
        self.next_id += 1;
        info!(id = plan.id, name = %plan.name, "saved load plan");
        self.plans.push(plan);
        // push just happened, the list cannot be empty
        &self.plans[self.plans.len() - 1]
    }

    /// Recall a saved plan by id.
    pub fn load(&self, id: u64) -> Result<&LoadPlan> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or(LoadPlanError::UnknownPlan { id })
    }

    /// All saved plans, oldest first.
    pub fn list(&self) -> &[LoadPlan] {
        &self.plans
    }

    /// Write one saved plan to a JSON file for the external storage
    /// collaborator.
    pub fn export_to_file<P: AsRef<Path>>(&self, id: u64, path: P) -> Result<()> {
        let plan = self.load(id)?;
        let json = serde_json::to_string_pretty(plan)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a plan from a JSON file into the store. The plan is assigned
    /// a fresh id so imports can never collide with existing snapshots.
    pub fn import_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&LoadPlan> {
        let content = std::fs::read_to_string(path)?;
        let mut plan: LoadPlan = serde_json::from_str(&content)?;
        plan.id = self.next_id;
        self.next_id += 1;
        self.plans.push(plan);
        Ok(&self.plans[self.plans.len() - 1])
    }
}

/// Seconds since UNIX_EPOCH; 0 if the system clock is before the epoch
fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::{CargoItem, Dimensions};
    use crate::sequencing::VehicleLoadMap;

    fn layout_with_cargo() -> TrailerLayout {
        let mut layout =
            TrailerLayout::new("layout-1", "HGV-42", 1350.0, 255.0, 270.0, 26_000.0, 92.5)
                .unwrap();
        layout
            .add_item(
                CargoItem::new(
                    "cargo-1",
                    "job-1",
                    "Pallet",
                    "Customer",
                    Dimensions::new(300.0, 300.0, 100.0, 2500.0),
                )
                .unwrap(),
            )
            .unwrap();
        layout
    }

    fn deliveries() -> Vec<DeliveryItem> {
        let map = VehicleLoadMap::new(
            "map-1",
            "HGV-42",
            "driver-7",
            "2026-08-07",
            vec![DeliveryItem::new("d1", "job-1", "09:00".parse().unwrap())],
        );
        map.items().to_vec()
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = LoadPlanStore::new();
        let layout = layout_with_cargo();
        let deliveries = deliveries();

        let id = store.save("Friday run", "North route", &layout, &deliveries).id;
        let plan = store.load(id).unwrap();

        assert_eq!(plan.name, "Friday run");
        assert_eq!(plan.layout, layout);
        assert_eq!(plan.deliveries, deliveries);
        // Totals reproduce exactly
        assert_eq!(plan.layout.summary(), layout.summary());
    }

    #[test]
    fn test_snapshot_is_deep() {
        let mut store = LoadPlanStore::new();
        let mut layout = layout_with_cargo();
        let id = store.save("before", "", &layout, &[]).id;

        // Mutate the live layout after saving
        layout.remove_item("cargo-1").unwrap();

        let plan = store.load(id).unwrap();
        assert_eq!(plan.layout.items().len(), 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = LoadPlanStore::new();
        let layout = layout_with_cargo();
        let first = store.save("a", "", &layout, &[]).id;
        let second = store.save("b", "", &layout, &[]).id;
        assert!(second > first);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_unknown_plan_id() {
        let store = LoadPlanStore::new();
        assert!(matches!(
            store.load(99),
            Err(LoadPlanError::UnknownPlan { id: 99 })
        ));
    }

    #[test]
    fn test_file_export_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        let mut store = LoadPlanStore::new();
        let layout = layout_with_cargo();
        let deliveries = deliveries();
        let id = store.save("export me", "round trip", &layout, &deliveries).id;
        store.export_to_file(id, &path).unwrap();

        let mut other = LoadPlanStore::new();
        let imported = other.import_from_file(&path).unwrap();
        assert_eq!(imported.name, "export me");
        assert_eq!(imported.layout, layout);
        assert_eq!(imported.deliveries, deliveries);
    }
}
