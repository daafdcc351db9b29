//! Error handling for the load planning engine.
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All fallible operations in the engine return these types for consistency.
//!
//! The taxonomy follows three rules:
//! - Validation and permission failures are fatal to the single operation,
//!   never to the session; the data model is left untouched.
//! - Capacity overflow is *not* an error; it is a planning signal carried
//!   on [`crate::capacity::CapacitySummary`].
//! - A collaborator sync failure is reported *after* the in-memory mutation
//!   has been committed; the engine state is authoritative.

use crate::types::Role;
use thiserror::Error;

/// Main error type for the load planning engine
#[derive(Error, Debug)]
pub enum LoadPlanError {
    /// Validation errors (dimensions, ids, malformed times)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation named an item id that is not in the collection
    #[error("Unknown item '{id}'")]
    UnknownItem { id: String },

    /// An operation named a load plan id that is not in the store
    #[error("Unknown load plan #{id}")]
    UnknownPlan { id: u64 },

    /// Delivery status transition errors
    #[error("Transition error: {0}")]
    Transition(String),

    /// Role-gated operation invoked by an unauthorized caller
    #[error("Permission denied: role '{role}' may not {operation}")]
    Permission { role: Role, operation: String },

    /// Status propagation to the job-tracking collaborator failed.
    ///
    /// The in-memory state change has already been applied; the caller
    /// may retry the propagation independently.
    #[error("Sync failed: {0}")]
    SyncFailed(String),

    /// IO errors (snapshot files, job files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, LoadPlanError>;

// Convenient error constructors
impl LoadPlanError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown-item error
    pub fn unknown_item(id: impl Into<String>) -> Self {
        Self::UnknownItem { id: id.into() }
    }

    /// Create a permission error
    pub fn permission(role: Role, operation: impl Into<String>) -> Self {
        Self::Permission {
            role,
            operation: operation.into(),
        }
    }

    /// Create a sync-failed error
    pub fn sync_failed(msg: impl Into<String>) -> Self {
        Self::SyncFailed(msg.into())
    }
}
