//! CLI definition using clap

use clap::{Parser, Subcommand};
use plastiscan_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plastiscan")]
#[command(version)]
#[command(about = "Identify a plastic item's resin code and estimate its environmental impact")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan one item: capture, analyze and report
    Scan {
        /// Path to image file
        image: Option<PathBuf>,

        /// Take the photo with the configured camera instead of a file
        #[arg(long, conflicts_with = "image")]
        camera: bool,

        /// Item weight in kg (0.1-2.0)
        #[arg(long, short = 'w')]
        weight: Option<f64>,

        /// Fixed classifier seed. Uses config value if not specified.
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the impact count-up
        #[arg(long)]
        no_animation: bool,
    },

    /// List the plastic grades the scanner knows
    Grades,

    /// Compute the impact of an item without scanning
    Impact {
        /// Resin code (1-5) or short name (e.g. "PET")
        #[arg(long, short = 'g')]
        grade: String,

        /// Item weight in kg (0.1-2.0)
        #[arg(long, short = 'w', default_value_t = 0.5)]
        weight: f64,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set simulated analysis time in milliseconds
        #[arg(long)]
        set_delay: Option<u64>,

        /// Set analysis timeout in milliseconds (0 disables)
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set number of count-up frames
        #[arg(long)]
        set_steps: Option<u32>,

        /// Set count-up length in milliseconds
        #[arg(long)]
        set_duration: Option<u64>,

        /// Set directory replayed by the virtual camera
        #[arg(long)]
        set_frames_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set log filter (e.g. "info", "plastiscan_app=debug")
        #[arg(long)]
        set_log_level: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
