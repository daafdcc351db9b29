//! Allocation engine
//!
//! Places cargo items into a 2-D load footprint using a left-to-right
//! shelf-packing heuristic.
//!
//! # Placement model
//!
//! The footprint is the trailer seen from above: `x` runs along the trailer
//! length, `y` across its width. Each item is given a rectangular footprint
//! scaled from its physical properties (width from volume, height from
//! weight) and footprints are laid out with a moving cursor:
//!
//! - items go left to right until one would overrun the envelope width,
//!   then the cursor wraps to a new row below the tallest footprint of the
//!   current row;
//! - if the new row would overrun the envelope height, a new column starts
//!   past the widest footprint of the current column.
//!
//! # Design
//!
//! - **Heuristic, not optimal**: this is bin placement for planning and
//!   display, not collision-accurate 3-D packing
//! - **Deterministic**: input order is preserved, never reordered, so the
//!   same item list always produces the same positions (idempotence)
//! - **Pure logic**: no I/O, no side effects, returns a new collection
//! - **Single-item cap**: no footprint may span more than a configured
//!   fraction of the envelope, which keeps the layout stable when one
//!   consignment dwarfs the rest

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::cargo::{CargoItem, Position};
use crate::types::ConsignmentState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The 2-D load footprint available for placement, in centimetres.
///
/// `width` is the trailer length (the x axis of the plan view), `height`
/// is the trailer width (the y axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub width: f64,
    pub height: f64,
}

impl Envelope {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Tuning knobs for the shelf-packing heuristic.
///
/// The defaults reproduce the reference behavior: footprint width grows
/// with volume, footprint height with weight, and a single item is capped
/// at one third of the envelope width and half its height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Footprint centimetres of width per cubic metre of cargo volume
    pub width_per_m3: f64,
    /// Footprint centimetres of height per kilogram of cargo weight
    pub height_per_kg: f64,
    /// Spacing between footprints, centimetres
    pub gap: f64,
    /// Smallest footprint edge, so light items stay visible on the plan
    pub min_edge: f64,
    /// A single footprint may use at most this fraction of envelope width
    pub max_width_fraction: f64,
    /// A single footprint may use at most this fraction of envelope height
    pub max_height_fraction: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            width_per_m3: 12.0,
            height_per_kg: 0.05,
            gap: 10.0,
            min_edge: 20.0,
            max_width_fraction: 1.0 / 3.0,
            max_height_fraction: 1.0 / 2.0,
        }
    }
}

impl AllocationConfig {
    /// Footprint width for an item, scaled from volume and capped
    fn footprint_width(&self, item: &CargoItem, envelope: &Envelope) -> f64 {
        let scaled = item.volume_m3() * self.width_per_m3;
        scaled
            .max(self.min_edge)
            .min(envelope.width * self.max_width_fraction)
    }

    /// Footprint height for an item, scaled from weight and capped
    fn footprint_height(&self, item: &CargoItem, envelope: &Envelope) -> f64 {
        let scaled = item.weight_kg() * self.height_per_kg;
        scaled
            .max(self.min_edge)
            .min(envelope.height * self.max_height_fraction)
    }
}

/// Place each item of `items` into `envelope`, in input order.
///
/// Returns a new collection in which every placeable item carries a
/// `position` and a `plot_id` ("P1", "P2", ... in placement order) and is
/// in the `allocated` state. Items with a zero dimension are passed
/// through unplaced, with any stale position cleared.
///
/// Re-running on an unchanged item list yields identical positions.
pub fn allocate(
    items: &[CargoItem],
    envelope: &Envelope,
    config: &AllocationConfig,
) -> Vec<CargoItem> {
    let mut placed = items.to_vec();

    // Cursor state: current row within the current column
    let mut cursor_x = 0.0_f64;
    let mut cursor_y = 0.0_f64;
    let mut row_peak = 0.0_f64; // tallest footprint in the current row
    let mut column_start = 0.0_f64; // x where the current column begins
    let mut column_peak = 0.0_f64; // widest extent of the current column
    let mut plot_counter = 0_u32;

    for item in placed.iter_mut() {
        if !item.is_placeable() {
            debug!(id = %item.id, "skipping item with zero dimension");
            item.position = None;
            item.plot_id = None;
            continue;
        }

        let w = config.footprint_width(item, envelope);
        let h = config.footprint_height(item, envelope);

        // Wrap to a new row when this footprint would overrun the envelope
        // width. Only wrap if the row already holds something; a capped
        // footprint always fits an empty row.
        if cursor_x + w > envelope.width && cursor_x > column_start {
            cursor_y += row_peak + config.gap;
            cursor_x = column_start;
            row_peak = 0.0;

            // The new row would overrun the envelope height: start a new
            // column past the widest footprint placed so far in this one.
            if cursor_y + h > envelope.height {
                column_start += column_peak + config.gap;
                cursor_x = column_start;
                cursor_y = 0.0;
                column_peak = 0.0;
            }
        }

        plot_counter += 1;
        item.position = Some(Position::new(cursor_x, cursor_y, 0.0));
        item.plot_id = Some(format!("P{plot_counter}"));
        item.state = ConsignmentState::Allocated;

        row_peak = row_peak.max(h);
        column_peak = column_peak.max(cursor_x + w - column_start);
        cursor_x += w + config.gap;
    }

    debug!(
        placed = plot_counter,
        total = placed.len(),
        "allocation pass complete"
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::Dimensions;

    fn item(id: &str, volume_m3: f64, weight: f64) -> CargoItem {
        // A cube with the requested volume: edge = cbrt(volume) metres
        let edge_cm = (volume_m3.cbrt()) * 100.0;
        CargoItem::new(
            id,
            format!("job-{id}"),
            "cargo",
            "customer",
            Dimensions::new(edge_cm, edge_cm, edge_cm, weight),
        )
        .unwrap()
    }

    fn envelope() -> Envelope {
        Envelope::new(1350.0, 255.0)
    }

    #[test]
    fn test_first_item_at_origin() {
        let placed = allocate(&[item("a", 9.0, 2500.0)], &envelope(), &Default::default());
        let pos = placed[0].position.unwrap();
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.z, 0.0);
        assert_eq!(placed[0].plot_id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_items_advance_left_to_right() {
        let items = vec![item("a", 9.0, 2500.0), item("b", 5.4, 1800.0)];
        let placed = allocate(&items, &envelope(), &Default::default());
        let a = placed[0].position.unwrap();
        let b = placed[1].position.unwrap();
        assert!(b.x > a.x);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn test_allocation_is_idempotent() {
        let items: Vec<CargoItem> = (0..12)
            .map(|i| item(&format!("c{i}"), 2.0 + i as f64, 400.0 * (i + 1) as f64))
            .collect();
        let config = AllocationConfig::default();
        let once = allocate(&items, &envelope(), &config);
        let twice = allocate(&once, &envelope(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_row_wrap_on_width_overflow() {
        // Each footprint is capped at a third of the envelope width, so
        // four heavy-volume items cannot share one row.
        let items: Vec<CargoItem> = (0..4).map(|i| item(&format!("c{i}"), 80.0, 500.0)).collect();
        let placed = allocate(&items, &envelope(), &Default::default());
        let ys: Vec<f64> = placed.iter().map(|i| i.position.unwrap().y).collect();
        assert_eq!(ys[0], 0.0);
        // At least one item wrapped to a lower row
        assert!(ys.iter().any(|&y| y > 0.0), "expected a row wrap: {ys:?}");
    }

    #[test]
    fn test_footprints_stay_inside_envelope_width() {
        // As long as the rows fit the envelope height, every footprint is
        // contained in the envelope width. (Only the overflow-column
        // mechanism may extend past it, tested separately below.)
        let env = envelope();
        let config = AllocationConfig::default();
        let items: Vec<CargoItem> = (0..20)
            .map(|i| item(&format!("c{i}"), 20.0, 300.0))
            .collect();
        for placed in allocate(&items, &env, &config) {
            let pos = placed.position.unwrap();
            let w = config.footprint_width(&placed, &env);
            assert!(
                pos.x + w <= env.width + 1e-9,
                "item {} overruns the envelope: x={} w={w}",
                placed.id,
                pos.x
            );
        }
    }

    #[test]
    fn test_no_two_items_share_a_position() {
        let items: Vec<CargoItem> = (0..15)
            .map(|i| item(&format!("c{i}"), 3.0 + i as f64, 200.0 * (i + 1) as f64))
            .collect();
        let placed = allocate(&items, &envelope(), &Default::default());
        let positions: Vec<(i64, i64)> = placed
            .iter()
            .filter_map(|i| i.position)
            .map(|p| ((p.x * 10.0) as i64, (p.y * 10.0) as i64))
            .collect();
        let mut deduped = positions.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(positions.len(), deduped.len());
    }

    #[test]
    fn test_zero_dimension_item_excluded() {
        let mut flat = item("flat", 1.0, 100.0);
        flat.dimensions.height = 0.0;
        // Stale position from an earlier pass must be cleared
        flat.position = Some(Position::new(99.0, 99.0, 0.0));
        flat.plot_id = Some("P9".into());

        let items = vec![item("a", 5.0, 800.0), flat, item("b", 5.0, 800.0)];
        let placed = allocate(&items, &envelope(), &Default::default());

        assert!(placed[1].position.is_none());
        assert!(placed[1].plot_id.is_none());
        // Plot ids count placed items only, skipping the excluded one
        assert_eq!(placed[0].plot_id.as_deref(), Some("P1"));
        assert_eq!(placed[2].plot_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_input_order_preserved() {
        let items = vec![item("z", 20.0, 100.0), item("a", 1.0, 3000.0)];
        let placed = allocate(&items, &envelope(), &Default::default());
        assert_eq!(placed[0].id, "z");
        assert_eq!(placed[1].id, "a");
    }

    #[test]
    fn test_single_item_caps() {
        let env = envelope();
        let config = AllocationConfig::default();
        // Absurdly large and heavy item still fits the caps
        let big = item("big", 900.0, 50_000.0);
        assert!(config.footprint_width(&big, &env) <= env.width / 3.0 + 1e-9);
        assert!(config.footprint_height(&big, &env) <= env.height / 2.0 + 1e-9);
    }

    #[test]
    fn test_placement_sets_allocated_state() {
        let mut rejected = item("r", 4.0, 500.0);
        rejected.state = ConsignmentState::Rejected;
        let placed = allocate(&[rejected], &envelope(), &Default::default());
        // A fresh allocation pass re-seats every placed item
        assert_eq!(placed[0].state, ConsignmentState::Allocated);
    }

    #[test]
    fn test_column_overflow_starts_new_column() {
        // Small envelope forces rows to stack until the height runs out,
        // then a new column must begin at y = 0 with a larger x.
        let env = Envelope::new(300.0, 100.0);
        let config = AllocationConfig {
            gap: 5.0,
            ..Default::default()
        };
        let items: Vec<CargoItem> = (0..9).map(|i| item(&format!("c{i}"), 30.0, 900.0)).collect();
        let placed = allocate(&items, &env, &config);

        let max_first_column_x = env.width * config.max_width_fraction + config.gap;
        let new_column = placed
            .iter()
            .filter_map(|i| i.position)
            .find(|p| p.x > max_first_column_x && p.y == 0.0);
        assert!(
            new_column.is_some(),
            "expected a new column at y = 0 past the first column"
        );
    }
}
