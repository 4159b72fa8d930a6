//! Re-export a gaze data snapshot to another directory.

use std::path::PathBuf;

use gazetrace_tracker::export::{load_gaze_data, write_gaze_data};

pub fn run(path: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let samples =
        load_gaze_data(&path).map_err(|e| anyhow::anyhow!("Failed to load gaze data: {e}"))?;

    let written = write_gaze_data(&samples, &output)
        .map_err(|e| anyhow::anyhow!("Failed to export gaze data: {e}"))?;

    println!(
        "Exported {} samples to: {}",
        samples.len(),
        written.display()
    );
    Ok(())
}
