//! loadplan Library
//!
//! Trailer load planning and delivery sequencing for fleet operations.
//!
//! The engine is a pure data/algorithm layer: it packs consignments into a
//! vehicle's load volume under weight/volume ceilings, assigns each one a
//! delivery slot (first-off / last-off / intermediate), and lets an
//! operator or driver re-sequence, accept, or reject items while every
//! derived metric (totals, utilization, sequence numbers, position
//! classes) stays consistent. Persistence and job-status propagation are
//! delegated to external collaborators.

pub mod capacity;
pub mod cargo;
pub mod cli;
pub mod consignment;
pub mod engine;
pub mod error;
pub mod jobs;
pub mod layout;
pub mod plan_store;
pub mod sequencing;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use capacity::CapacitySummary;
pub use cargo::{CargoItem, Dimensions, Position};
pub use engine::allocation::{allocate, AllocationConfig, Envelope};
pub use error::{LoadPlanError, Result};
pub use jobs::{load_jobs_from_file, JobRecord, LoadDimensions, VehicleRecord};
pub use layout::TrailerLayout;
pub use plan_store::{LoadPlan, LoadPlanStore};
pub use sequencing::{
    derive_positions, optimize_by_time, swap, update_status, DeliveryItem,
    DeliveryTransitionError, StatusUpdate, VehicleLoadMap,
};
pub use session::{JobStatusSink, NullStatusSink, PlanningSession};
pub use types::{
    ConsignmentState, DeliveryPosition, DeliveryStatus, Fragility, Priority, Role, TimeOfDay,
    TimeParseError,
};
