//! Detect fixations and saccades in exported gaze data.

use std::path::PathBuf;

use gazetrace_analysis::fixation::FixationConfig;
use gazetrace_analysis::report::AnalysisReport;
use gazetrace_tracker::export::load_gaze_data;

pub fn run(
    path: PathBuf,
    out_dir: PathBuf,
    fixation_radius: f64,
    fixation_duration_ms: f64,
) -> anyhow::Result<()> {
    println!("Analyzing gaze data at: {}", path.display());

    let samples =
        load_gaze_data(&path).map_err(|e| anyhow::anyhow!("Failed to load gaze data: {e}"))?;
    println!("  Loaded {} samples", samples.len());

    let config = FixationConfig {
        dispersion_radius_px: fixation_radius,
        min_duration_ms: fixation_duration_ms,
    };

    let report = AnalysisReport::from_samples(&samples, config);
    println!("  Recording span: {:.1}s", report.recording_span_secs);
    println!("  Fixations: {}", report.fixations.len());
    println!("  Saccades: {}", report.saccades.len());

    if let Some(summary) = &report.summary {
        println!(
            "  Average saccadic distance: {:.2} pixels",
            summary.avg_distance_px
        );
        println!(
            "  Average saccadic velocity: {:.2} pixels/sec",
            summary.avg_velocity_px_per_sec
        );
        println!(
            "  Average saccadic density: {:.2} saccades/sec",
            summary.saccades_per_sec
        );
    } else {
        println!("  Not enough fixations to compute saccade metrics.");
    }

    let paths = report
        .write_to(&out_dir)
        .map_err(|e| anyhow::anyhow!("Failed to write reports: {e}"))?;

    println!();
    for written in paths {
        println!("  Wrote: {}", written.display());
    }
    println!("\nAnalysis complete.");

    Ok(())
}
