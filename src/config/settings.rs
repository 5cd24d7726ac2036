//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// CaptureConfig
// ---------------------------------------------------------------------------

/// Settings for the frame producer feeding the pipeline.
///
/// The camera binding itself lives outside this crate; these values describe
/// the frames it is expected to deliver (and parameterize the synthetic
/// source used by the demo binary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Clockwise rotation in degrees applied by the producer (0/90/180/270).
    pub rotation: u32,
    /// Milliseconds between frames from the synthetic demo source.
    pub frame_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            rotation: 0,
            frame_interval_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// ClassifierConfig
// ---------------------------------------------------------------------------

/// Settings for the gesture classifier boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// The classifier's own minimum confidence; detections below this are
    /// reported as absent before they ever reach the smoother.  Looser than
    /// `smoothing.commit_threshold` by design.
    pub min_confidence: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.40,
        }
    }
}

// ---------------------------------------------------------------------------
// SmoothingConfig
// ---------------------------------------------------------------------------

/// Settings for the temporal smoother (debounce).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Identical consecutive letters required to commit.
    pub window_size: usize,
    /// Minimum confidence (inclusive) for a letter to count toward a commit.
    /// Stricter than `classifier.min_confidence`.
    pub commit_threshold: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            commit_threshold: 0.62,
        }
    }
}

// ---------------------------------------------------------------------------
// WordConfig
// ---------------------------------------------------------------------------

/// Settings for word assembly and the auto-boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordConfig {
    /// Consecutive absent frames after which a non-blank word auto-confirms
    /// ("signer lowered hand → word boundary").
    pub absence_frames: u32,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self { absence_frames: 4 }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Settings for the orchestrator loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fixed delay after every classification round-trip, bounding the call
    /// rate to the classifier.  Runs regardless of outcome.
    pub frame_delay_ms: u64,
    /// Frame channel capacity.  Keep small: excess frames are dropped by the
    /// producer, and for a live feed staleness is worse than loss.
    pub frame_buffer: usize,
    /// Command channel capacity.
    pub command_buffer: usize,
    /// Event channel capacity.
    pub event_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 500,
            frame_buffer: 1,
            command_buffer: 16,
            event_buffer: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use sign_to_text::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame producer settings.
    pub capture: CaptureConfig,
    /// Classifier boundary settings.
    pub classifier: ClassifierConfig,
    /// Temporal smoothing settings.
    pub smoothing: SmoothingConfig,
    /// Word assembly / auto-boundary settings.
    pub word: WordConfig,
    /// Orchestrator loop settings.
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.capture.width, loaded.capture.width);
        assert_eq!(original.capture.height, loaded.capture.height);
        assert_eq!(original.capture.rotation, loaded.capture.rotation);
        assert_eq!(
            original.classifier.min_confidence,
            loaded.classifier.min_confidence
        );
        assert_eq!(original.smoothing.window_size, loaded.smoothing.window_size);
        assert_eq!(
            original.smoothing.commit_threshold,
            loaded.smoothing.commit_threshold
        );
        assert_eq!(original.word.absence_frames, loaded.word.absence_frames);
        assert_eq!(original.pipeline.frame_delay_ms, loaded.pipeline.frame_delay_ms);
        assert_eq!(original.pipeline.frame_buffer, loaded.pipeline.frame_buffer);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.smoothing.window_size, default.smoothing.window_size);
        assert_eq!(config.word.absence_frames, default.word.absence_frames);
        assert_eq!(
            config.pipeline.frame_delay_ms,
            default.pipeline.frame_delay_ms
        );
    }

    /// Verify the documented default constants.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.capture.width, 640);
        assert_eq!(cfg.capture.height, 480);
        assert_eq!(cfg.capture.rotation, 0);
        assert_eq!(cfg.classifier.min_confidence, 0.40);
        assert_eq!(cfg.smoothing.window_size, 3);
        assert_eq!(cfg.smoothing.commit_threshold, 0.62);
        assert_eq!(cfg.word.absence_frames, 4);
        assert_eq!(cfg.pipeline.frame_delay_ms, 500);
        assert_eq!(cfg.pipeline.frame_buffer, 1);
    }

    /// The commit threshold must be stricter than the classifier's own
    /// cutoff, or the full-clear-on-weak-frame rule would never fire.
    #[test]
    fn commit_threshold_stricter_than_classifier_cutoff() {
        let cfg = AppConfig::default();
        assert!(cfg.smoothing.commit_threshold > cfg.classifier.min_confidence);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.capture.width = 1280;
        cfg.capture.height = 720;
        cfg.smoothing.window_size = 5;
        cfg.smoothing.commit_threshold = 0.8;
        cfg.word.absence_frames = 10;
        cfg.pipeline.frame_delay_ms = 250;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.capture.width, 1280);
        assert_eq!(loaded.capture.height, 720);
        assert_eq!(loaded.smoothing.window_size, 5);
        assert_eq!(loaded.smoothing.commit_threshold, 0.8);
        assert_eq!(loaded.word.absence_frames, 10);
        assert_eq!(loaded.pipeline.frame_delay_ms, 250);
    }
}
