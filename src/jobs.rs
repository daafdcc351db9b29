//! Collaborator record shapes
//!
//! The engine consumes job and vehicle records from external sources and
//! never mutates them; this module defines those wire shapes and the
//! validated conversion into engine-owned cargo items.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use crate::cargo::{CargoItem, Dimensions};
use crate::error::Result;
use crate::types::{Fragility, Priority, TimeOfDay};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// The dimensions block a job source supplies.
///
/// `volume` is whatever the source recorded; the engine recomputes volume
/// from the linear dimensions and only warns when the recorded value
/// disagrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// A job record from the external job source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub customer_name: String,
    pub load_dimensions: LoadDimensions,
    #[serde(default)]
    pub cargo_type: Fragility,
    #[serde(default)]
    pub priority: Priority,
    /// Planned delivery time, when the source schedules one
    #[serde(default)]
    pub estimated_time: Option<TimeOfDay>,
}

impl JobRecord {
    /// Convert this job into an engine-owned cargo item.
    ///
    /// The cargo item id is derived from the job id; dimensions are
    /// validated (non-negative, finite) and volume is recomputed, never
    /// copied from the record.
    pub fn to_cargo_item(&self) -> Result<CargoItem> {
        let dims = Dimensions::new(
            self.load_dimensions.length,
            self.load_dimensions.width,
            self.load_dimensions.height,
            self.load_dimensions.weight,
        );
        let item = CargoItem::new(
            format!("cargo-{}", self.id),
            self.id.clone(),
            self.title.clone(),
            self.customer_name.clone(),
            dims,
        )?
        .with_priority(self.priority)
        .with_fragility(self.cargo_type);

        if let Some(recorded) = self.load_dimensions.volume {
            let derived = item.volume_m3();
            if (recorded - derived).abs() > 0.01 {
                warn!(
                    job = %self.id,
                    recorded,
                    derived,
                    "job source volume disagrees with dimensions; using derived value"
                );
            }
        }
        Ok(item)
    }
}

/// A vehicle record from the external vehicle source. Used only to label
/// layouts and load maps; the engine does not validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub registration: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub current_driver: Option<String>,
}

/// Load job records from a JSON file (an array of [`JobRecord`]).
pub fn load_jobs_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<JobRecord>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read jobs file {:?}", path.as_ref()))?;
    let jobs: Vec<JobRecord> =
        serde_json::from_str(&content).context("Failed to parse jobs JSON")?;
    Ok(jobs)
}
