//! Run a capture session and export the gaze buffer.

use std::path::PathBuf;

use gazetrace_common::clock::SessionClock;
use gazetrace_common::config::{AppConfig, HeatmapDefaults, OverlayDefaults};
use gazetrace_model::trace::TraceHeader;
use gazetrace_render::heatmap::{DensityConfig, DensityMap};
use gazetrace_render::overlay::OverlayCanvas;
use gazetrace_tracker::backends::{ReplayBackend, ScanpathBackend};
use gazetrace_tracker::export::write_gaze_data;
use gazetrace_tracker::recorder::TraceWriter;
use gazetrace_tracker::{GazeBackend, GazeSession, SessionViewport};

/// Map configured heatmap settings onto the density sink parameters.
fn density_config(defaults: &HeatmapDefaults) -> DensityConfig {
    DensityConfig {
        radius: defaults.radius,
        max_opacity: defaults.max_opacity,
        min_opacity: defaults.min_opacity,
        blur: defaults.blur,
    }
}

/// Build the overlay canvas with the configured marker style.
fn overlay_canvas(defaults: &OverlayDefaults) -> OverlayCanvas {
    OverlayCanvas::with_style(defaults.dot_radius, defaults.dot_color)
}

pub async fn run(
    config: &AppConfig,
    trace: Option<PathBuf>,
    synthetic: bool,
    duration_secs: f64,
    output: PathBuf,
    record_trace: Option<PathBuf>,
    width: u32,
    height: u32,
    sample_rate: u32,
) -> anyhow::Result<()> {
    let backend: Box<dyn GazeBackend> = match (&trace, synthetic) {
        (Some(path), _) => Box::new(
            ReplayBackend::from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to start gaze source: {e}"))?,
        ),
        (None, true) => Box::new(ScanpathBackend::new(width, height, sample_rate, duration_secs)),
        (None, false) => {
            anyhow::bail!("No gaze source selected: pass --trace <FILE> or --synthetic");
        }
    };

    println!("Capturing from source: {}", backend.name());

    let clock = SessionClock::start();
    let viewport = SessionViewport { width, height };
    let mut session = GazeSession::new(
        backend,
        Box::new(DensityMap::new(
            width,
            height,
            density_config(&config.heatmap),
        )),
        overlay_canvas(&config.overlay),
        viewport,
    );

    if let Some(trace_path) = record_trace {
        let header = TraceHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: clock.epoch_wall().to_string(),
            viewport_width: width,
            viewport_height: height,
            sample_rate_hz: sample_rate,
        };
        let writer = TraceWriter::new(trace_path.clone(), header)
            .map_err(|e| anyhow::anyhow!("Failed to open trace recorder: {e}"))?;
        session.record_to(writer);
        println!("Recording raw frames to: {}", trace_path.display());
    }

    let frames = session
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Capture failed: {e}"))?;

    println!("  Frames delivered: {frames}");
    println!("  Samples recorded: {}", session.samples_recorded());
    println!("  Heatmap points: {}", session.density().points_added());
    if let Some((x, y)) = session.overlay().last_dot() {
        println!("  Last gaze point: ({x:.0}, {y:.0})");
    }

    let snapshot = session.snapshot();
    let path = write_gaze_data(&snapshot, &output)
        .map_err(|e| anyhow::anyhow!("Failed to export gaze data: {e}"))?;
    println!("\nGaze data written to: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_config_comes_from_app_config() {
        let defaults = HeatmapDefaults {
            radius: 25.0,
            max_opacity: 0.9,
            min_opacity: 0.1,
            blur: 0.5,
        };
        let config = density_config(&defaults);
        assert!((config.radius - 25.0).abs() < f64::EPSILON);
        assert!((config.max_opacity - 0.9).abs() < f64::EPSILON);
        assert!((config.min_opacity - 0.1).abs() < f64::EPSILON);
        assert!((config.blur - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlay_marker_uses_configured_color() {
        let defaults = OverlayDefaults {
            dot_radius: 4.0,
            dot_color: [0, 128, 255, 255],
        };
        let mut canvas = overlay_canvas(&defaults);
        canvas.draw_dot(64, 64, 32.0, 32.0);
        assert_eq!(canvas.pixel(32, 32), Some([0, 128, 255, 255]));
    }
}
