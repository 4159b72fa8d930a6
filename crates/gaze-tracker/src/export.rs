//! Gaze data export.
//!
//! Serializes a buffer snapshot to the fixed-name JSON export file. Each
//! call works off its own snapshot, so repeated exports of a growing
//! buffer produce independent, internally consistent files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gazetrace_common::error::{GazetraceError, GazeResult};
use gazetrace_model::sample::{serialize_samples, GazeSample};

/// Fixed export filename.
pub const GAZE_DATA_FILENAME: &str = "gazeData.json";

/// Write samples as a JSON array to `<dir>/gazeData.json`.
///
/// An empty snapshot yields `[]`. Returns the path written.
pub fn write_gaze_data(samples: &[GazeSample], dir: &Path) -> GazeResult<PathBuf> {
    let path = dir.join(GAZE_DATA_FILENAME);
    write_gaze_data_to(samples, &path)?;
    Ok(path)
}

/// Write samples as a JSON array to an explicit path.
pub fn write_gaze_data_to(samples: &[GazeSample], path: &Path) -> GazeResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serialize_samples(samples)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .map_err(|e| GazetraceError::export(format!("Failed to write gaze data: {e}")))?;
    writer
        .flush()
        .map_err(|e| GazetraceError::export(format!("Failed to flush gaze data: {e}")))?;

    tracing::info!(path = %path.display(), samples = samples.len(), "Gaze data exported");
    Ok(())
}

/// Load a previously exported gaze data file.
pub fn load_gaze_data(path: &Path) -> GazeResult<Vec<GazeSample>> {
    if !path.exists() {
        return Err(GazetraceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let samples = gazetrace_model::sample::parse_samples(&content)?;
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_roundtrip() {
        let dir = std::env::temp_dir().join("gazetrace_test_export");
        let _ = std::fs::remove_dir_all(&dir);

        let samples = vec![
            GazeSample::new(100.0, 200.0, 0.0),
            GazeSample::new(150.0, 210.0, 16.0),
        ];

        let path = write_gaze_data(&samples, &dir).unwrap();
        assert!(path.ends_with(GAZE_DATA_FILENAME));

        let loaded = load_gaze_data(&path).unwrap();
        assert_eq!(loaded, samples);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_export_yields_empty_array() {
        let dir = std::env::temp_dir().join("gazetrace_test_export_empty");
        let _ = std::fs::remove_dir_all(&dir);

        let path = write_gaze_data(&[], &dir).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[]");

        let loaded = load_gaze_data(&path).unwrap();
        assert!(loaded.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_repeated_exports_are_independent_snapshots() {
        let dir = std::env::temp_dir().join("gazetrace_test_export_snapshots");
        let _ = std::fs::remove_dir_all(&dir);

        let mut samples = vec![GazeSample::new(1.0, 2.0, 0.0)];
        let first = dir.join("first.json");
        write_gaze_data_to(&samples, &first).unwrap();

        samples.push(GazeSample::new(3.0, 4.0, 10.0));
        let second = dir.join("second.json");
        write_gaze_data_to(&samples, &second).unwrap();

        assert_eq!(load_gaze_data(&first).unwrap().len(), 1);
        assert_eq!(load_gaze_data(&second).unwrap().len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let result = load_gaze_data(Path::new("/nonexistent/gazeData.json"));
        assert!(matches!(result, Err(GazetraceError::FileNotFound { .. })));
    }
}
