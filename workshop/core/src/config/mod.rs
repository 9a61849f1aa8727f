//! TOML Configuration File Support
//!
//! Configuration for the workshop surface and its mascot, loaded from
//! `~/.config/opencode-workshop/workshop.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments (applied by the binary after loading)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [guide]
//! path = "README.md"
//!
//! [mascot]
//! mood = "love"
//! speech = true
//! click_threshold = 5
//! caption_interval_ms = 4000
//! decay_ms = 5000
//!
//! [display]
//! fps = 30
//! confetti = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mascot::{MascotTimings, MoodState, ParseMoodError};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Mood name not recognised
    #[error(transparent)]
    Mood(#[from] ParseMoodError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Guide section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideToml {
    /// Markdown file shown on the guide tab
    pub path: Option<PathBuf>,
}

/// Mascot section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MascotToml {
    /// Host mood override
    pub mood: Option<MoodState>,
    /// Whether the speech bubble starts visible
    pub speech: Option<bool>,
    /// Clicks needed for a trick
    pub click_threshold: Option<u32>,
    /// Caption rotation cadence in milliseconds
    pub caption_interval_ms: Option<u64>,
    /// Idle decay timeout in milliseconds
    pub decay_ms: Option<u64>,
    /// Hop length after an ordinary click
    pub pet_pulse_ms: Option<u64>,
    /// Hop length after a trick
    pub trick_pulse_ms: Option<u64>,
    /// Secret code celebration window
    pub celebration_ms: Option<u64>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Target frames per second
    pub fps: Option<u32>,
    /// Whether confetti is drawn
    pub confetti: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopToml {
    pub guide: GuideToml,
    pub mascot: MascotToml,
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved workshop configuration
#[derive(Clone, Debug)]
pub struct WorkshopConfig {
    /// Markdown guide path
    pub guide_path: PathBuf,
    /// Host mood override for the mascot
    pub mood: Option<MoodState>,
    /// Whether the speech bubble starts visible
    pub speech: bool,
    /// Mascot timing knobs
    pub timings: MascotTimings,
    /// Target frames per second
    pub fps: u32,
    /// Whether confetti is drawn
    pub confetti: bool,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Source of configuration values
    source: ConfigSource,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            guide_path: PathBuf::from("README.md"),
            mood: None,
            speech: true,
            timings: MascotTimings::default(),
            fps: 30,
            confetti: true,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl WorkshopConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Frame duration derived from `fps`
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timings.click_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "mascot.click_threshold must be at least 1".to_string(),
            ));
        }

        let durations = [
            ("mascot.caption_interval_ms", self.timings.caption_interval),
            ("mascot.decay_ms", self.timings.decay),
            ("mascot.pet_pulse_ms", self.timings.pet_pulse),
            ("mascot.trick_pulse_ms", self.timings.trick_pulse),
            ("mascot.celebration_ms", self.timings.celebration),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be greater than zero"
            )));
        }

        if !(1..=120).contains(&self.fps) {
            return Err(ConfigError::ValidationError(format!(
                "display.fps must be between 1 and 120 (got {})",
                self.fps
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/opencode-workshop/workshop.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("opencode-workshop").join("workshop.toml"))
}

/// Load configuration from a specific path plus the process environment
///
/// A missing file is not an error (defaults are used). Values are not
/// range-checked here: CLI overrides still apply on top, so callers run
/// [`WorkshopConfig::validate`] once everything is resolved.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if an
/// environment mood is not recognised.
pub fn load_config_from_path(path: Option<&Path>) -> Result<WorkshopConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration using `env` to look up environment overrides
///
/// # Errors
///
/// See [`load_config_from_path`].
pub fn load_config_with_env(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<WorkshopConfig, ConfigError> {
    let mut config = WorkshopConfig::default();

    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: WorkshopToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut WorkshopConfig, toml: &WorkshopToml) {
    if let Some(path) = &toml.guide.path {
        config.guide_path = path.clone();
    }

    let mascot = &toml.mascot;
    if mascot.mood.is_some() {
        config.mood = mascot.mood;
    }
    if let Some(speech) = mascot.speech {
        config.speech = speech;
    }
    if let Some(threshold) = mascot.click_threshold {
        config.timings.click_threshold = threshold;
    }
    if let Some(ms) = mascot.caption_interval_ms {
        config.timings.caption_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = mascot.decay_ms {
        config.timings.decay = Duration::from_millis(ms);
    }
    if let Some(ms) = mascot.pet_pulse_ms {
        config.timings.pet_pulse = Duration::from_millis(ms);
    }
    if let Some(ms) = mascot.trick_pulse_ms {
        config.timings.trick_pulse = Duration::from_millis(ms);
    }
    if let Some(ms) = mascot.celebration_ms {
        config.timings.celebration = Duration::from_millis(ms);
    }

    if let Some(fps) = toml.display.fps {
        config.fps = fps;
    }
    if let Some(confetti) = toml.display.confetti {
        config.confetti = confetti;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(
    config: &mut WorkshopConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(path) = env("WORKSHOP_GUIDE") {
        config.guide_path = PathBuf::from(path);
        config.source = ConfigSource::Env;
    }
    if let Some(mood) = env("WORKSHOP_MOOD") {
        config.mood = Some(mood.parse()?);
        config.source = ConfigSource::Env;
    }
    if let Some(fps) = env("WORKSHOP_FPS") {
        match fps.parse::<u32>() {
            Ok(fps) => {
                config.fps = fps;
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %fps, "ignoring non-numeric WORKSHOP_FPS"),
        }
    }
    Ok(())
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Command line values, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub guide_path: Option<PathBuf>,
    pub mood: Option<MoodState>,
    pub fps: Option<u32>,
    pub speech: Option<bool>,
    pub confetti: Option<bool>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_guide_path(mut self, path: PathBuf) -> Self {
        self.guide_path = Some(path);
        self
    }

    #[must_use]
    pub fn with_mood(mut self, mood: MoodState) -> Self {
        self.mood = Some(mood);
        self
    }

    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    #[must_use]
    pub fn with_speech(mut self, speech: bool) -> Self {
        self.speech = Some(speech);
        self
    }

    #[must_use]
    pub fn with_confetti(mut self, confetti: bool) -> Self {
        self.confetti = Some(confetti);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut WorkshopConfig) {
        if self.guide_path.is_some()
            || self.mood.is_some()
            || self.fps.is_some()
            || self.speech.is_some()
            || self.confetti.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(path) = &self.guide_path {
            config.guide_path = path.clone();
        }
        if self.mood.is_some() {
            config.mood = self.mood;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(speech) = self.speech {
            config.speech = speech;
        }
        if let Some(confetti) = self.confetti {
            config.confetti = confetti;
        }
    }
}
