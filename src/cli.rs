use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// loadplan - trailer load planning and delivery sequencing
#[derive(Parser)]
#[command(name = "loadplan")]
#[command(about = "Pack consignments into a trailer and sequence the delivery run")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a load plan from a jobs file and a trailer file
    Plan {
        /// Path to the jobs JSON file (array of job records)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Path to the trailer JSON file (envelope and capacity ceilings)
        #[arg(short, long)]
        trailer: PathBuf,

        /// Allocation tuning file; built-in defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the finished plan snapshot to this file
        #[arg(long)]
        save_plan: Option<PathBuf>,

        /// Name recorded on the saved snapshot
        #[arg(long, default_value = "Unnamed plan")]
        name: String,
    },
    /// Validate a jobs file and report each invalid record
    Validate {
        /// Path to the jobs JSON file to validate
        jobs: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
