//! Show gaze data information.

use std::path::PathBuf;

use gazetrace_tracker::export::load_gaze_data;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let samples =
        load_gaze_data(&path).map_err(|e| anyhow::anyhow!("Failed to load gaze data: {e}"))?;

    println!("Gaze data: {}", path.display());
    println!("  Samples: {}", samples.len());

    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        println!("  (empty)");
        return Ok(());
    };

    let span_secs = (last.timestamp - first.timestamp).max(0.0) / 1_000.0;
    println!(
        "  Time span: {:.1}s ({:.1}ms .. {:.1}ms)",
        span_secs, first.timestamp, last.timestamp
    );

    let min_x = samples.iter().map(|s| s.x).fold(f64::INFINITY, f64::min);
    let max_x = samples.iter().map(|s| s.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = samples.iter().map(|s| s.y).fold(f64::INFINITY, f64::min);
    let max_y = samples.iter().map(|s| s.y).fold(f64::NEG_INFINITY, f64::max);

    println!("  X range: {min_x:.0} .. {max_x:.0}");
    println!("  Y range: {min_y:.0} .. {max_y:.0}");

    if span_secs > 0.0 {
        println!(
            "  Effective sample rate: {:.1} Hz",
            (samples.len() as f64 - 1.0) / span_secs
        );
    }

    Ok(())
}
