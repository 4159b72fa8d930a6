//! Analysis report writers: fixation/saccade CSV tables and the text
//! summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gazetrace_common::error::{GazetraceError, GazeResult};
use gazetrace_model::sample::GazeSample;

use crate::fixation::{detect_fixations, Fixation, FixationConfig};
use crate::saccade::{derive_saccades, summarize_saccades, Saccade, SaccadeSummary};

/// Fixed output filenames.
pub const FIXATIONS_CSV_FILENAME: &str = "fixations.csv";
pub const SACCADES_CSV_FILENAME: &str = "saccades.csv";
pub const SUMMARY_REPORT_FILENAME: &str = "gaze_summary_report.txt";

/// The full analysis result for a session.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub sample_count: usize,
    pub recording_span_secs: f64,
    pub fixations: Vec<Fixation>,
    pub saccades: Vec<Saccade>,
    pub summary: Option<SaccadeSummary>,
}

impl AnalysisReport {
    /// Run the full analysis over recorded samples.
    pub fn from_samples(samples: &[GazeSample], config: FixationConfig) -> Self {
        let fixations = detect_fixations(samples, config);
        let saccades = derive_saccades(&fixations);

        let recording_span_secs = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).max(0.0) / 1_000.0,
            _ => 0.0,
        };

        let summary = summarize_saccades(&saccades, recording_span_secs);

        tracing::debug!(
            samples = samples.len(),
            fixations = fixations.len(),
            saccades = saccades.len(),
            "Analysis complete"
        );

        Self {
            sample_count: samples.len(),
            recording_span_secs,
            fixations,
            saccades,
            summary,
        }
    }

    /// Write the CSV tables and summary report into `out_dir`.
    /// Returns the paths written.
    pub fn write_to(&self, out_dir: &Path) -> GazeResult<Vec<PathBuf>> {
        std::fs::create_dir_all(out_dir)?;

        let fixations_path = out_dir.join(FIXATIONS_CSV_FILENAME);
        write_fixations_csv(&fixations_path, &self.fixations)?;

        let saccades_path = out_dir.join(SACCADES_CSV_FILENAME);
        write_saccades_csv(&saccades_path, &self.saccades)?;

        let report_path = out_dir.join(SUMMARY_REPORT_FILENAME);
        write_summary_report(&report_path, self)?;

        Ok(vec![fixations_path, saccades_path, report_path])
    }
}

/// Write fixations as CSV with an `x,y,start,end` header.
pub fn write_fixations_csv(path: &Path, fixations: &[Fixation]) -> GazeResult<()> {
    let mut writer = buffered_writer(path)?;
    writeln!(writer, "x,y,start,end").map_err(write_err)?;
    for f in fixations {
        writeln!(writer, "{},{},{},{}", f.x, f.y, f.start, f.end).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Write saccades as CSV with a
/// `from_x,from_y,to_x,to_y,distance,duration_sec` header.
pub fn write_saccades_csv(path: &Path, saccades: &[Saccade]) -> GazeResult<()> {
    let mut writer = buffered_writer(path)?;
    writeln!(writer, "from_x,from_y,to_x,to_y,distance,duration_sec").map_err(write_err)?;
    for s in saccades {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            s.from_x, s.from_y, s.to_x, s.to_y, s.distance, s.duration_sec
        )
        .map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Write the human-readable summary report.
pub fn write_summary_report(path: &Path, report: &AnalysisReport) -> GazeResult<()> {
    let mut writer = buffered_writer(path)?;

    writeln!(writer, "Eye Tracking Summary Report").map_err(write_err)?;
    writeln!(writer, "===============================").map_err(write_err)?;
    writeln!(writer).map_err(write_err)?;
    writeln!(writer, "Generated: {}", chrono::Utc::now().to_rfc3339()).map_err(write_err)?;
    writeln!(writer, "Total Gaze Points: {}", report.sample_count).map_err(write_err)?;
    writeln!(writer, "Total Fixations: {}", report.fixations.len()).map_err(write_err)?;

    match &report.summary {
        Some(summary) => {
            writeln!(
                writer,
                "Average Saccadic Distance: {:.2} pixels",
                summary.avg_distance_px
            )
            .map_err(write_err)?;
            writeln!(
                writer,
                "Average Saccadic Velocity: {:.2} pixels/sec",
                summary.avg_velocity_px_per_sec
            )
            .map_err(write_err)?;
            writeln!(
                writer,
                "Average Saccadic Density: {:.2} saccades/sec",
                summary.saccades_per_sec
            )
            .map_err(write_err)?;
        }
        None => {
            writeln!(writer, "Not enough saccades for analysis.").map_err(write_err)?;
        }
    }

    writeln!(writer).map_err(write_err)?;
    writeln!(writer, "Fixations exported to: {FIXATIONS_CSV_FILENAME}").map_err(write_err)?;
    writeln!(writer, "Saccades exported to: {SACCADES_CSV_FILENAME}").map_err(write_err)?;

    writer.flush().map_err(write_err)?;
    Ok(())
}

fn buffered_writer(path: &Path) -> GazeResult<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

fn write_err(e: std::io::Error) -> GazetraceError {
    GazetraceError::processing(format!("Failed to write report: {e}"))
}
