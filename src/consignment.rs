//! Consignment state machine
//!
//! Tracks placement acceptance for a cargo item, distinct from delivery
//! status. The states and their transitions:
//!
//! ```text
//! allocated ──reject──▶ rejected ──accept──▶ allocated
//!     │                     │
//!     └──────move───────────┴──────move──────▶ modified
//! ```
//!
//! - `reject` is always permitted, from any state
//! - `accept` is only meaningful from `rejected`; anywhere else it is a
//!   no-op, not an error
//! - any manual repositioning moves the item to `modified`, regardless of
//!   prior state, and persists the new coordinate
//!
//! State changes never alter the delivery sequence: sequencing and
//! consignment acceptance are orthogonal axes.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::cargo::{CargoItem, Position};
use crate::types::ConsignmentState;
use tracing::debug;

impl CargoItem {
    /// Reject this consignment's placement. Always permitted.
    pub fn reject(&mut self) {
        debug!(id = %self.id, from = %self.state, "consignment rejected");
        self.state = ConsignmentState::Rejected;
    }

    /// Accept a previously rejected placement, returning the item to
    /// `allocated`. Returns true if the state changed; on any state other
    /// than `rejected` this is a no-op and returns false.
    pub fn accept(&mut self) -> bool {
        if self.state == ConsignmentState::Rejected {
            self.state = ConsignmentState::Allocated;
            debug!(id = %self.id, "consignment accepted");
            true
        } else {
            false
        }
    }

    /// Manually reposition this consignment (the command equivalent of a
    /// drag-and-drop). Persists the coordinate and marks the item
    /// `modified` regardless of prior state.
    pub fn move_to(&mut self, new_position: Position) {
        debug!(id = %self.id, x = new_position.x, y = new_position.y, "consignment moved");
        self.position = Some(new_position);
        self.state = ConsignmentState::Modified;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::Dimensions;

    fn item() -> CargoItem {
        CargoItem::new(
            "cargo-1",
            "job-1",
            "Crate",
            "Customer",
            Dimensions::new(100.0, 100.0, 100.0, 500.0),
        )
        .unwrap()
    }

    #[test]
    fn test_reject_then_accept_returns_to_allocated() {
        let mut c = item();
        c.reject();
        assert_eq!(c.state, ConsignmentState::Rejected);
        assert!(c.accept());
        assert_eq!(c.state, ConsignmentState::Allocated);
    }

    #[test]
    fn test_accept_on_allocated_is_noop() {
        let mut c = item();
        assert!(!c.accept());
        assert_eq!(c.state, ConsignmentState::Allocated);
    }

    #[test]
    fn test_accept_on_modified_is_noop() {
        let mut c = item();
        c.move_to(Position::new(10.0, 20.0, 0.0));
        assert!(!c.accept());
        assert_eq!(c.state, ConsignmentState::Modified);
    }

    #[test]
    fn test_reject_always_permitted() {
        let mut c = item();
        c.move_to(Position::new(10.0, 20.0, 0.0));
        c.reject();
        assert_eq!(c.state, ConsignmentState::Rejected);

        // Rejecting twice stays rejected
        c.reject();
        assert_eq!(c.state, ConsignmentState::Rejected);
    }

    #[test]
    fn test_move_marks_modified_and_persists_position() {
        let mut c = item();
        c.reject();
        c.move_to(Position::new(42.0, 7.0, 0.0));
        assert_eq!(c.state, ConsignmentState::Modified);
        let pos = c.position.unwrap();
        assert_eq!(pos.x, 42.0);
        assert_eq!(pos.y, 7.0);
    }
}
