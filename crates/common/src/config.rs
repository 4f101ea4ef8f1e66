//! Editor configuration.
//!
//! Holds the tunable constants of the editing core (snap tolerances,
//! magnetic pull strength, pixel scale, segment-end threshold) plus logging
//! settings. Callers may still override any of these per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default snap tolerance in seconds.
pub const SNAP_THRESHOLD_SECS: f64 = 0.5;

/// Default snap tolerance in pixels, used by the magnetic pull.
pub const SNAP_PIXEL_THRESHOLD: f64 = 10.0;

/// Default magnetic pull strength.
pub const MAGNETIC_PULL_STRENGTH: f64 = 0.7;

/// Default horizontal pixels per timeline second at zoom scale 1.0.
pub const PIXELS_PER_SECOND: f64 = 50.0;

/// Default distance before a segment end at which the player preloads the next source.
pub const SEGMENT_END_THRESHOLD_SECS: f64 = 0.1;

/// Global editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snapping behaviour while dragging clips.
    pub snapping: SnapDefaults,

    /// Horizontal pixels per second at zoom scale 1.0.
    pub pixels_per_second: f64,

    /// Playback tick settings.
    pub playback: PlaybackDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default snapping parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapDefaults {
    /// Nearest-point snap tolerance (seconds).
    pub threshold_secs: f64,

    /// Magnetic pull tolerance (pixels).
    pub pixel_threshold: f64,

    /// Fraction of the remaining distance covered by the magnetic pull [0.0, 1.0].
    pub pull_strength: f64,
}

/// Default playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackDefaults {
    /// Lead time before a segment end that triggers a source switch (seconds).
    pub segment_end_threshold_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipline_editing_core=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snapping: SnapDefaults::default(),
            pixels_per_second: PIXELS_PER_SECOND,
            playback: PlaybackDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SnapDefaults {
    fn default() -> Self {
        Self {
            threshold_secs: SNAP_THRESHOLD_SECS,
            pixel_threshold: SNAP_PIXEL_THRESHOLD,
            pull_strength: MAGNETIC_PULL_STRENGTH,
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            segment_end_threshold_secs: SEGMENT_END_THRESHOLD_SECS,
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

impl EditorConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    ///
    /// Read and parse failures are logged, so call this only once a
    /// subscriber is installed. Startup code that has to configure logging
    /// from the file itself should use [`EditorConfig::read_from`].
    pub fn load_from(config_path: &Path) -> Self {
        match Self::read_from(config_path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Read config from an explicit path. `Ok(None)` when the file does not exist.
    pub fn read_from(config_path: &Path) -> crate::error::CliplineResult<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(config_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Reject values the editing core cannot work with.
    pub fn validate(&self) -> crate::error::CliplineResult<()> {
        use crate::error::CliplineError;

        let snapping = &self.snapping;
        if !(snapping.threshold_secs.is_finite() && snapping.threshold_secs >= 0.0) {
            return Err(CliplineError::config(format!(
                "snapping.threshold_secs must be >= 0, got {}",
                snapping.threshold_secs
            )));
        }
        if !(snapping.pixel_threshold.is_finite() && snapping.pixel_threshold >= 0.0) {
            return Err(CliplineError::config(format!(
                "snapping.pixel_threshold must be >= 0, got {}",
                snapping.pixel_threshold
            )));
        }
        if !(0.0..=1.0).contains(&snapping.pull_strength) {
            return Err(CliplineError::config(format!(
                "snapping.pull_strength must be within [0, 1], got {}",
                snapping.pull_strength
            )));
        }
        if !(self.pixels_per_second.is_finite() && self.pixels_per_second > 0.0) {
            return Err(CliplineError::config(format!(
                "pixels_per_second must be > 0, got {}",
                self.pixels_per_second
            )));
        }
        let threshold = self.playback.segment_end_threshold_secs;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(CliplineError::config(format!(
                "playback.segment_end_threshold_secs must be >= 0, got {threshold}"
            )));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipline").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.snapping.threshold_secs, 0.5);
        assert_eq!(config.snapping.pixel_threshold, 10.0);
        assert_eq!(config.snapping.pull_strength, 0.7);
        assert_eq!(config.pixels_per_second, 50.0);
        assert_eq!(config.playback.segment_end_threshold_secs, 0.1);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"snapping":{"threshold_secs":0.25}}"#).unwrap();
        assert_eq!(config.snapping.threshold_secs, 0.25);
        assert_eq!(config.snapping.pixel_threshold, 10.0);
        assert_eq!(config.pixels_per_second, 50.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("clipline_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = EditorConfig::default();
        config.pixels_per_second = 80.0;
        config.save_to(&path).unwrap();

        let loaded = EditorConfig::load_from(&path);
        assert_eq!(loaded.pixels_per_second, 80.0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unparseable_config_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("clipline_test_bad_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let loaded = EditorConfig::load_from(&path);
        assert_eq!(loaded.snapping.threshold_secs, SNAP_THRESHOLD_SECS);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_from_reports_errors_instead_of_defaulting() {
        let dir = std::env::temp_dir().join("clipline_test_read_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        assert!(EditorConfig::read_from(&path).unwrap().is_none());

        std::fs::write(&path, "{ this is not json").unwrap();
        let err = EditorConfig::read_from(&path).unwrap_err();
        assert!(matches!(err, crate::error::CliplineError::Json(_)));

        std::fs::write(&path, r#"{"logging":{"level":"debug"}}"#).unwrap();
        let config = EditorConfig::read_from(&path).unwrap().unwrap();
        assert_eq!(config.logging.level, "debug");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        assert!(EditorConfig::default().validate().is_ok());

        let mut config = EditorConfig::default();
        config.snapping.pull_strength = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pull_strength"));

        let mut config = EditorConfig::default();
        config.pixels_per_second = 0.0;
        assert!(config.validate().is_err());
    }
}
