//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where capture output is written.
    pub output_dir: PathBuf,

    /// Default capture settings.
    pub capture: CaptureDefaults,

    /// Density map (heatmap) settings.
    pub heatmap: HeatmapDefaults,

    /// Overlay marker settings.
    pub overlay: OverlayDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDefaults {
    /// Nominal gaze sampling rate (Hz).
    pub sample_rate_hz: u32,

    /// Default viewport width in pixels.
    pub viewport_width: u32,

    /// Default viewport height in pixels.
    pub viewport_height: u32,
}

/// Density map parameters forwarded to the heatmap sink at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatmapDefaults {
    /// Stamp radius in pixels.
    pub radius: f64,

    /// Opacity at peak density.
    pub max_opacity: f64,

    /// Opacity at zero density.
    pub min_opacity: f64,

    /// Blur factor: fraction of the radius used for falloff.
    pub blur: f64,
}

/// Overlay marker parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverlayDefaults {
    /// Marker radius in pixels.
    pub dot_radius: f64,

    /// Marker color as RGBA.
    pub dot_color: [u8; 4],
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gazetrace=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs_default_output(),
            capture: CaptureDefaults::default(),
            heatmap: HeatmapDefaults::default(),
            overlay: OverlayDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            sample_rate_hz: 30,
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self {
            radius: 40.0,
            max_opacity: 0.6,
            min_opacity: 0.0,
            blur: 0.75,
        }
    }
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            dot_radius: 10.0,
            dot_color: [255, 0, 0, 255],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gazetrace").join("config.json")
}

/// Default capture output directory.
fn dirs_default_output() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("gazetrace").join("sessions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_defaults_match_sink_contract() {
        let h = HeatmapDefaults::default();
        assert!((h.radius - 40.0).abs() < f64::EPSILON);
        assert!((h.max_opacity - 0.6).abs() < f64::EPSILON);
        assert!((h.min_opacity - 0.0).abs() < f64::EPSILON);
        assert!((h.blur - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overlay.dot_color, [255, 0, 0, 255]);
        assert_eq!(parsed.capture.sample_rate_hz, 30);
    }
}
