//! GazeTrace CLI — Command-line interface for gaze capture and analysis.
//!
//! Usage:
//!   gazetrace capture [OPTIONS]    Run a capture session and export gaze data
//!   gazetrace analyze <PATH>       Detect fixations/saccades and write reports
//!   gazetrace export <PATH>        Re-export a gaze data snapshot
//!   gazetrace info <PATH>          Show gaze data information

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gazetrace",
    about = "Gaze capture sessions with heatmap, overlay, and fixation analysis",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a capture session and export the gaze buffer
    Capture {
        /// Replay a recorded trace file as the gaze source
        #[arg(long, conflicts_with = "synthetic")]
        trace: Option<PathBuf>,

        /// Use the deterministic synthetic scanpath source
        #[arg(long)]
        synthetic: bool,

        /// Synthetic source duration in seconds
        #[arg(long, default_value = "10.0")]
        duration_secs: f64,

        /// Output directory for gazeData.json
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Also record the raw frame stream to this trace file
        #[arg(long)]
        record_trace: Option<PathBuf>,

        /// Viewport width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Nominal sample rate for the synthetic source (Hz)
        #[arg(long, default_value = "30")]
        sample_rate: u32,
    },

    /// Detect fixations and saccades, write CSV tables and a summary
    Analyze {
        /// Path to a gazeData.json file
        path: PathBuf,

        /// Directory to write fixations.csv, saccades.csv, and the report
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Maximum per-axis fixation dispersion (pixels)
        #[arg(long, default_value = "50.0")]
        fixation_radius: f64,

        /// Minimum fixation duration (milliseconds)
        #[arg(long, default_value = "100.0")]
        fixation_duration_ms: f64,
    },

    /// Re-export a gaze data snapshot to another directory
    Export {
        /// Path to a gazeData.json file
        path: PathBuf,

        /// Destination directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show gaze data information
    Info {
        /// Path to a gazeData.json file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = gazetrace_common::config::AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gazetrace_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Capture {
            trace,
            synthetic,
            duration_secs,
            output,
            record_trace,
            width,
            height,
            sample_rate,
        } => {
            commands::capture::run(
                &config,
                trace,
                synthetic,
                duration_secs,
                output,
                record_trace,
                width,
                height,
                sample_rate,
            )
            .await
        }
        Commands::Analyze {
            path,
            out_dir,
            fixation_radius,
            fixation_duration_ms,
        } => commands::analyze::run(path, out_dir, fixation_radius, fixation_duration_ms),
        Commands::Export { path, output } => commands::export::run(path, output),
        Commands::Info { path } => commands::info::run(path),
    }
}
