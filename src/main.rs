//! loadplan - Main entry point
//!
//! A headless front end for the load planning engine: reads job and
//! trailer records from JSON files, runs allocation and sequencing, and
//! prints the resulting plan.

mod capacity;
mod cargo;
mod cli;
mod consignment;
mod engine;
mod error;
mod jobs;
mod layout;
mod plan_store;
mod sequencing;
mod session;
mod types;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::cli::{Cli, Commands};
use crate::engine::allocation::AllocationConfig;
use crate::jobs::load_jobs_from_file;
use crate::layout::TrailerLayout;
use crate::sequencing::{DeliveryItem, VehicleLoadMap};
use crate::session::PlanningSession;
use crate::types::Role;

/// Initialize the tracing subscriber with appropriate settings
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            // RUST_LOG overrides; default to info
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    init_tracing();
    info!("loadplan starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Plan {
            jobs,
            trailer,
            config,
            save_plan,
            name,
        } => run_plan(&jobs, &trailer, config.as_deref(), save_plan.as_deref(), &name),
        Commands::Validate { jobs } => run_validate(&jobs),
    }
}

/// Build, print, and optionally save a load plan
fn run_plan(
    jobs_path: &Path,
    trailer_path: &Path,
    config_path: Option<&Path>,
    save_path: Option<&Path>,
    plan_name: &str,
) -> Result<()> {
    let trailer_json = std::fs::read_to_string(trailer_path)
        .with_context(|| format!("Failed to read trailer file {trailer_path:?}"))?;
    let layout: TrailerLayout =
        serde_json::from_str(&trailer_json).context("Failed to parse trailer JSON")?;

    let allocation = match config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {path:?}"))?;
            serde_json::from_str(&json).context("Failed to parse allocation config JSON")?
        }
        None => AllocationConfig::default(),
    };

    let records = load_jobs_from_file(jobs_path)?;
    info!(jobs = records.len(), "loaded job records");

    let mut layout = layout;
    let mut deliveries = Vec::new();
    for record in &records {
        let item = record
            .to_cargo_item()
            .with_context(|| format!("Invalid job record '{}'", record.id))?;
        layout
            .add_item(item)
            .with_context(|| format!("Could not add job '{}' to the layout", record.id))?;
        deliveries.push(DeliveryItem::new(
            format!("drop-{}", record.id),
            record.id.clone(),
            record.estimated_time.unwrap_or_default(),
        ));
    }

    let load_map = VehicleLoadMap::new(
        format!("map-{}", layout.id),
        layout.vehicle_id.clone(),
        "unassigned",
        "",
        deliveries,
    );

    let mut session = PlanningSession::new(Role::Admin, layout, load_map)
        .with_allocation_config(allocation);
    session.allocate().context("Allocation failed")?;
    session
        .optimize_by_time()
        .context("Sequence optimization failed")?;

    println!("{}", render_summary(&session));

    if let Some(path) = save_path {
        let plan_id = session.save_plan(plan_name, "generated by loadplan CLI")?;
        session.store().export_to_file(plan_id, path)?;
        println!("Saved plan '{plan_name}' to {path:?}");
    }

    Ok(())
}

/// Validate each job record and report failures
fn run_validate(jobs_path: &Path) -> Result<()> {
    let records = load_jobs_from_file(jobs_path)?;
    let mut invalid = 0;

    for record in &records {
        match record.to_cargo_item() {
            Ok(_) => {}
            Err(e) => {
                invalid += 1;
                eprintln!("✗ job '{}': {e}", record.id);
            }
        }
    }

    if invalid > 0 {
        eprintln!("✗ {invalid} of {} job records invalid", records.len());
        std::process::exit(1);
    }

    println!("✓ All {} job records are valid", records.len());
    Ok(())
}

/// Render the finished plan for stdout
fn render_summary(session: &PlanningSession) -> String {
    let layout = session.layout();
    let map = session.load_map();
    let summary = layout.summary();

    let mut lines = vec![
        format!("Load plan for trailer {} ({})", layout.id, layout.vehicle_id),
        format!(
            "  Envelope: {:.0} x {:.0} cm, ceilings {:.0} kg / {:.1} m³",
            layout.length, layout.width, layout.max_weight, layout.max_volume
        ),
        format!(
            "  Load: {:.0} kg, {:.1} m³ ({:.1}% utilization){}",
            summary.total_weight,
            summary.total_volume,
            summary.utilization_percentage,
            if summary.is_overloaded() {
                "  ** OVERLOADED **"
            } else {
                ""
            }
        ),
        format!("  Placements ({}):", layout.items().len()),
    ];

    for item in layout.items() {
        match (&item.plot_id, &item.position) {
            (Some(plot), Some(pos)) => lines.push(format!(
                "    {plot:>4}  {:<30} at ({:.0}, {:.0})  {:.1} m³ / {:.0} kg",
                item.title,
                pos.x,
                pos.y,
                item.volume_m3(),
                item.weight_kg()
            )),
            _ => lines.push(format!("    ----  {:<30} (not placeable)", item.title)),
        }
    }

    lines.push(format!("  Delivery order ({} drops):", map.total_deliveries()));
    for item in map.items_in_sequence() {
        lines.push(format!(
            "    {:>2}. job {:<12} est {}  [{}]",
            item.delivery_sequence, item.job_id, item.estimated_time, item.position
        ));
    }

    lines.join("\n")
}
