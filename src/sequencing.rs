//! Delivery sequencing engine
//!
//! Assigns and repairs delivery order and position class for a set of
//! deliveries, and tracks per-delivery status.
//!
//! # Design Principles
//!
//! - **Pure transformations**: the free functions take a collection and
//!   return a new one; the host owns storage and re-render
//! - **Single derivation point**: sequence numbers and position classes
//!   are always re-derived together, so no operation can leave sequence
//!   numbers renumbered but position classes stale
//! - **Validated transitions**: the status machine is linear
//!   (`pending → in_progress → completed`, with the direct
//!   `pending → completed` shortcut) and nothing leaves `completed`
//!
//! The [`VehicleLoadMap`] wrapper is the command layer: it validates item
//! ids, keeps its derived counters consistent, and reports the status
//! events that feed the external job-tracking collaborator.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::error::{LoadPlanError, Result};
use crate::types::{DeliveryPosition, DeliveryStatus, Role, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// One consignment's slot in the unload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub id: String,
    pub job_id: String,
    /// Position in the unload order, contiguous from 1
    pub delivery_sequence: u32,
    #[serde(default)]
    pub position: DeliveryPosition,
    pub estimated_time: TimeOfDay,
    /// Unix seconds, stamped when the delivery completes
    #[serde(default)]
    pub actual_time: Option<u64>,
    #[serde(default)]
    pub status: DeliveryStatus,
    #[serde(default)]
    pub driver_notes: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Whether the sequence may be changed without approval
    #[serde(default = "default_flexible")]
    pub is_flexible: bool,
}

fn default_flexible() -> bool {
    true
}

impl DeliveryItem {
    /// Create a delivery for a job. The sequence is assigned when the
    /// item joins a load map.
    pub fn new(
        id: impl Into<String>,
        job_id: impl Into<String>,
        estimated_time: TimeOfDay,
    ) -> Self {
        Self {
            id: id.into(),
            job_id: job_id.into(),
            delivery_sequence: 0,
            position: DeliveryPosition::default(),
            estimated_time,
            actual_time: None,
            status: DeliveryStatus::default(),
            driver_notes: None,
            admin_notes: None,
            is_flexible: true,
        }
    }

    /// Mark this delivery inflexible (builder-style)
    pub fn pinned(mut self) -> Self {
        self.is_flexible = false;
        self
    }

    /// Apply a validated status transition.
    ///
    /// On `completed`, stamps `actual_time` with the current time if not
    /// already set. Fails without mutating on anything the linear
    /// progression does not allow, including same-state transitions.
    pub fn transition(
        &mut self,
        new_status: DeliveryStatus,
    ) -> std::result::Result<(), DeliveryTransitionError> {
        if self.status == new_status {
            return Err(DeliveryTransitionError::AlreadyInStatus { status: new_status });
        }
        if !self.status.can_transition_to(new_status) {
            return Err(DeliveryTransitionError::NotAllowed {
                from: self.status,
                to: new_status,
            });
        }

        self.status = new_status;
        if new_status == DeliveryStatus::Completed && self.actual_time.is_none() {
            self.actual_time = Some(unix_now());
        }
        Ok(())
    }
}

/// Errors that can occur during delivery status transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTransitionError {
    /// Attempted a transition to the current status
    #[error("Delivery is already {status}")]
    AlreadyInStatus { status: DeliveryStatus },

    /// Attempted a transition the linear progression does not allow
    #[error("Cannot move delivery from {from} to {to}")]
    NotAllowed {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },
}

impl From<DeliveryTransitionError> for LoadPlanError {
    fn from(err: DeliveryTransitionError) -> Self {
        LoadPlanError::Transition(err.to_string())
    }
}

/// Status-change event for the external job-tracking collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub job_id: String,
    pub new_delivery_status: DeliveryStatus,
}

// ============================================================================
// Pure transformations
// ============================================================================

/// Re-derive every item's position class from the current sequence order.
///
/// Sorted by `delivery_sequence`: the first drop is tail, the last is
/// bulkhead (N ≥ 2), the rest are middle. A sole delivery is tail.
pub fn derive_positions(items: &mut [DeliveryItem]) {
    let count = items.len();
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by_key(|&i| items[i].delivery_sequence);

    for (rank, &idx) in order.iter().enumerate() {
        items[idx].position = DeliveryPosition::classify(rank, count);
    }
}

/// Stable-sort by estimated time, renumber 1..N, and re-derive position
/// classes. The earliest estimate becomes sequence 1 (tail, first off).
pub fn optimize_by_time(items: Vec<DeliveryItem>) -> Vec<DeliveryItem> {
    let mut items = items;
    items.sort_by_key(|item| item.estimated_time);
    for (idx, item) in items.iter_mut().enumerate() {
        item.delivery_sequence = (idx + 1) as u32;
    }
    derive_positions(&mut items);
    debug!(count = items.len(), "optimized delivery order by time");
    items
}

/// Exchange the sequence numbers of the two named items and re-derive
/// position classes for the whole set. Positions in the collection (array
/// order) are untouched; only the sequence values move.
///
/// Returns the input unchanged if either id is absent or both name the
/// same item.
pub fn swap(items: Vec<DeliveryItem>, id_a: &str, id_b: &str) -> Vec<DeliveryItem> {
    let mut items = items;
    let idx_a = items.iter().position(|i| i.id == id_a);
    let idx_b = items.iter().position(|i| i.id == id_b);

    match (idx_a, idx_b) {
        (Some(a), Some(b)) if a != b => {
            let seq_a = items[a].delivery_sequence;
            items[a].delivery_sequence = items[b].delivery_sequence;
            items[b].delivery_sequence = seq_a;
            derive_positions(&mut items);
            items
        }
        _ => items,
    }
}

/// Transition one delivery's status.
///
/// On `completed`, stamps `actual_time` with the current time if not
/// already set. Invalid transitions (anything the linear progression does
/// not allow, including same-state) leave the collection unchanged and
/// return a typed error.
pub fn update_status(
    items: Vec<DeliveryItem>,
    id: &str,
    new_status: DeliveryStatus,
) -> Result<Vec<DeliveryItem>> {
    let mut items = items;
    let item = items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| LoadPlanError::unknown_item(id))?;
    item.transition(new_status)?;
    Ok(items)
}

/// Seconds since UNIX_EPOCH; 0 if the system clock is before the epoch
fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================================================
// Vehicle load map
// ============================================================================

/// The ordered delivery run for one vehicle on one date.
///
/// Owns the delivery collection and its derived counters. All mutation
/// goes through the validated methods, which finish every derived-field
/// recomputation before returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLoadMap {
    id: String,
    vehicle_id: String,
    driver_id: String,
    date: String,
    items: Vec<DeliveryItem>,
    total_deliveries: u32,
    completed_deliveries: u32,
    is_optimized: bool,
}

impl VehicleLoadMap {
    /// Build a load map from deliveries in their given order: sequence
    /// numbers are assigned 1..N in input order and position classes
    /// derived from them.
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        driver_id: impl Into<String>,
        date: impl Into<String>,
        mut items: Vec<DeliveryItem>,
    ) -> Self {
        for (idx, item) in items.iter_mut().enumerate() {
            item.delivery_sequence = (idx + 1) as u32;
        }
        derive_positions(&mut items);

        let mut map = Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            driver_id: driver_id.into(),
            date: date.into(),
            items,
            total_deliveries: 0,
            completed_deliveries: 0,
            is_optimized: false,
        };
        map.refresh_derived();
        map
    }

    /// Single recomputation entry point for the derived counters
    fn refresh_derived(&mut self) {
        self.total_deliveries = self.items.len() as u32;
        self.completed_deliveries = self
            .items
            .iter()
            .filter(|i| i.status == DeliveryStatus::Completed)
            .count() as u32;
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    #[inline]
    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    #[inline]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The deliveries, in collection order (not necessarily unload order)
    pub fn items(&self) -> &[DeliveryItem] {
        &self.items
    }

    /// The deliveries sorted into unload order
    pub fn items_in_sequence(&self) -> Vec<&DeliveryItem> {
        let mut sorted: Vec<&DeliveryItem> = self.items.iter().collect();
        sorted.sort_by_key(|i| i.delivery_sequence);
        sorted
    }

    #[inline]
    pub fn total_deliveries(&self) -> u32 {
        self.total_deliveries
    }

    #[inline]
    pub fn completed_deliveries(&self) -> u32 {
        self.completed_deliveries
    }

    #[inline]
    pub fn is_optimized(&self) -> bool {
        self.is_optimized
    }

    pub fn find(&self, id: &str) -> Option<&DeliveryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Re-sequence the run by estimated delivery time and mark it
    /// optimized.
    pub fn optimize_by_time(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.items = optimize_by_time(items);
        self.is_optimized = true;
        self.refresh_derived();
        info!(id = %self.id, "load map optimized by estimated time");
    }

    /// Exchange the unload slots of two deliveries.
    ///
    /// Unlike the pure [`swap`] function, unknown ids are reported as
    /// errors here: the command layer validates, the transformation stays
    /// total.
    pub fn swap(&mut self, id_a: &str, id_b: &str) -> Result<()> {
        for id in [id_a, id_b] {
            if self.find(id).is_none() {
                return Err(LoadPlanError::unknown_item(id));
            }
        }
        let items = std::mem::take(&mut self.items);
        self.items = swap(items, id_a, id_b);
        self.refresh_derived();
        Ok(())
    }

    /// Transition one delivery's status and report the event for the
    /// job-tracking collaborator. The completed-count is recomputed
    /// before this returns; on error the map is untouched.
    pub fn update_status(&mut self, id: &str, new_status: DeliveryStatus) -> Result<StatusUpdate> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LoadPlanError::unknown_item(id))?;
        item.transition(new_status)?;
        let job_id = item.job_id.clone();

        self.refresh_derived();
        info!(id, status = %new_status, "delivery status updated");
        Ok(StatusUpdate {
            job_id,
            new_delivery_status: new_status,
        })
    }

    /// Attach a note to one delivery. Drivers and admins write to
    /// separate note fields.
    pub fn add_note(&mut self, id: &str, role: Role, note: impl Into<String>) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LoadPlanError::unknown_item(id))?;
        match role {
            Role::Driver => item.driver_notes = Some(note.into()),
            Role::Admin => item.admin_notes = Some(note.into()),
        }
        Ok(())
    }
}

impl fmt::Display for VehicleLoadMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LoadMap {} ({}/{} complete{})",
            self.id,
            self.completed_deliveries,
            self.total_deliveries,
            if self.is_optimized { ", optimized" } else { "" }
        )
    }
}
