//! Planning session
//!
//! One operator or driver editing one trailer layout and its delivery run.
//! The session is the role-gated command surface over the engine: planning
//! operations (allocate, optimize, save, reposition) require an admin
//! caller, while field operations (swap, status updates, accept/reject,
//! notes) are open to drivers. A disallowed operation fails with a typed
//! permission error, never a silent no-op.
//!
//! Status changes are forwarded to the external job-tracking collaborator
//! through [`JobStatusSink`]. A sink failure is reported as
//! [`LoadPlanError::SyncFailed`] *after* the in-memory change has been
//! committed; the session state is authoritative and the caller may retry
//! propagation independently.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::capacity::CapacitySummary;
use crate::cargo::{CargoItem, Position};
use crate::engine::allocation::AllocationConfig;
use crate::error::{LoadPlanError, Result};
use crate::layout::TrailerLayout;
use crate::plan_store::LoadPlanStore;
use crate::sequencing::{StatusUpdate, VehicleLoadMap};
use crate::types::{DeliveryStatus, Role};
use tracing::warn;

/// Receives status-change events for the external job-tracking store.
///
/// Implementations should be cheap and non-blocking; the engine invokes
/// them synchronously, fire-and-forget, and never rolls back on failure.
pub trait JobStatusSink {
    fn notify(&mut self, update: &StatusUpdate) -> std::result::Result<(), String>;
}

/// Discards every event. The default sink for tests and headless runs.
#[derive(Debug, Default)]
pub struct NullStatusSink;

impl JobStatusSink for NullStatusSink {
    fn notify(&mut self, _update: &StatusUpdate) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// A planning session: one caller, one layout, one load map.
pub struct PlanningSession {
    role: Role,
    layout: TrailerLayout,
    load_map: VehicleLoadMap,
    store: LoadPlanStore,
    sink: Box<dyn JobStatusSink>,
    allocation: AllocationConfig,
}

impl PlanningSession {
    pub fn new(role: Role, layout: TrailerLayout, load_map: VehicleLoadMap) -> Self {
        Self {
            role,
            layout,
            load_map,
            store: LoadPlanStore::new(),
            sink: Box::new(NullStatusSink),
            allocation: AllocationConfig::default(),
        }
    }

    /// Attach a job-tracking collaborator (builder-style)
    pub fn with_sink(mut self, sink: Box<dyn JobStatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Override the allocation tuning (builder-style)
    pub fn with_allocation_config(mut self, config: AllocationConfig) -> Self {
        self.allocation = config;
        self
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn layout(&self) -> &TrailerLayout {
        &self.layout
    }

    pub fn load_map(&self) -> &VehicleLoadMap {
        &self.load_map
    }

    pub fn store(&self) -> &LoadPlanStore {
        &self.store
    }

    fn require_privileged(&self, operation: &str) -> Result<()> {
        if self.role.is_privileged() {
            Ok(())
        } else {
            Err(LoadPlanError::permission(self.role, operation))
        }
    }

    // ------------------------------------------------------------------
    // Privileged planning operations
    // ------------------------------------------------------------------

    /// Run the allocation engine over the layout. Admin only.
    pub fn allocate(&mut self) -> Result<CapacitySummary> {
        self.require_privileged("allocate the trailer layout")?;
        self.layout.allocate(&self.allocation);
        Ok(self.layout.summary())
    }

    /// Re-sequence the delivery run by estimated time. Admin only.
    pub fn optimize_by_time(&mut self) -> Result<()> {
        self.require_privileged("optimize the delivery sequence")?;
        self.load_map.optimize_by_time();
        Ok(())
    }

    /// Manually reposition a consignment. Admin only.
    pub fn move_item(&mut self, id: &str, new_position: Position) -> Result<()> {
        self.require_privileged("reposition cargo")?;
        self.layout.move_item(id, new_position)
    }

    /// Add a consignment to the layout. Admin only.
    pub fn add_item(&mut self, item: CargoItem) -> Result<()> {
        self.require_privileged("add cargo to the layout")?;
        self.layout.add_item(item)
    }

    /// Remove a consignment from the layout (explicit operator delete).
    /// Admin only. Returns the removed item.
    pub fn remove_item(&mut self, id: &str) -> Result<CargoItem> {
        self.require_privileged("remove cargo from the layout")?;
        self.layout.remove_item(id)
    }

    /// Snapshot the current layout and delivery run under a name.
    /// Admin only. Returns the new plan id.
    pub fn save_plan(&mut self, name: &str, description: &str) -> Result<u64> {
        self.require_privileged("save a load plan")?;
        let plan = self
            .store
            .save(name, description, &self.layout, self.load_map.items());
        Ok(plan.id)
    }

    // ------------------------------------------------------------------
    // Field operations (driver-permitted)
    // ------------------------------------------------------------------

    /// Exchange the unload slots of two deliveries.
    ///
    /// A driver may only swap deliveries that are both flexible; pinned
    /// deliveries need an admin.
    pub fn swap(&mut self, id_a: &str, id_b: &str) -> Result<()> {
        if !self.role.is_privileged() {
            for id in [id_a, id_b] {
                let item = self
                    .load_map
                    .find(id)
                    .ok_or_else(|| LoadPlanError::unknown_item(id))?;
                if !item.is_flexible {
                    return Err(LoadPlanError::permission(
                        self.role,
                        format!("re-sequence pinned delivery '{id}'"),
                    ));
                }
            }
        }
        self.load_map.swap(id_a, id_b)
    }

    /// Transition a delivery's status and propagate the event to the
    /// job-tracking collaborator.
    ///
    /// On a sink failure the status change is already committed; the
    /// returned [`LoadPlanError::SyncFailed`] tells the caller to retry
    /// the propagation, not the transition.
    pub fn update_status(&mut self, id: &str, new_status: DeliveryStatus) -> Result<StatusUpdate> {
        let update = self.load_map.update_status(id, new_status)?;
        if let Err(reason) = self.sink.notify(&update) {
            warn!(job = %update.job_id, %reason, "status propagation failed");
            return Err(LoadPlanError::sync_failed(reason));
        }
        Ok(update)
    }

    /// Reject a consignment's placement.
    pub fn reject(&mut self, id: &str) -> Result<()> {
        self.layout.reject(id)
    }

    /// Accept a previously rejected consignment. Returns true if the
    /// state changed.
    pub fn accept(&mut self, id: &str) -> Result<bool> {
        self.layout.accept(id)
    }

    /// Attach a note to a delivery; it lands in the caller's role field.
    pub fn add_note(&mut self, id: &str, note: &str) -> Result<()> {
        self.load_map.add_note(id, self.role, note)
    }
}
