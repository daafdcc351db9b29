//! Capacity tracker
//!
//! Aggregates a cargo collection against a trailer's declared capacity
//! ceilings. `recompute` is a pure function: totals are always derived from
//! the current item collection and never mutated independently.
//!
//! Overflow is a planning signal, not a fault: operators must be allowed
//! to deliberately overload and proceed, so exceeding a ceiling raises a
//! flag on the summary rather than an error.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::cargo::CargoItem;
use serde::{Deserialize, Serialize};

/// Derived load totals for one trailer layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySummary {
    /// Sum of item weights, kilograms
    pub total_weight: f64,
    /// Sum of derived item volumes, cubic metres
    pub total_volume: f64,
    /// `total_volume / max_volume * 100`. Retains its true value above
    /// 100; overload is flagged, never clamped.
    pub utilization_percentage: f64,
    pub over_weight: bool,
    pub over_volume: bool,
}

impl CapacitySummary {
    /// Recompute totals and utilization for `items` against the given
    /// capacity ceilings.
    ///
    /// Utilization is 0 when `max_volume` is zero or the item list is
    /// empty. Rejected items still count: they occupy the trailer until an
    /// operator removes them.
    pub fn recompute(items: &[CargoItem], max_weight: f64, max_volume: f64) -> Self {
        let total_weight: f64 = items.iter().map(CargoItem::weight_kg).sum();
        let total_volume: f64 = items.iter().map(CargoItem::volume_m3).sum();

        let utilization_percentage = if max_volume > 0.0 && !items.is_empty() {
            total_volume / max_volume * 100.0
        } else {
            0.0
        };

        Self {
            total_weight,
            total_volume,
            utilization_percentage,
            over_weight: total_weight > max_weight,
            over_volume: total_volume > max_volume,
        }
    }

    /// True if either capacity ceiling is exceeded
    #[inline]
    pub fn is_overloaded(&self) -> bool {
        self.over_weight || self.over_volume
    }
}
