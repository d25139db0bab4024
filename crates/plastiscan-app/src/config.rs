//! Configuration management for plastiscan
//!
//! Config stored at: ~/.config/plastiscan/config.toml

use plastiscan_domain::service::impact_animation::{DEFAULT_DURATION, DEFAULT_STEPS};
use plastiscan_types::{ConfigError, OutputFormat, Result};
use plastiscan_vision::RandomClassifier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated analysis time in milliseconds
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// Give up on the classifier after this many milliseconds
    #[serde(default)]
    pub analysis_timeout_ms: Option<u64>,

    /// Number of count-up frames for impact figures
    #[serde(default = "default_animation_steps")]
    pub animation_steps: u32,

    /// Count-up length in milliseconds
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,

    /// Directory replayed by the virtual camera (camera disabled when unset)
    #[serde(default)]
    pub camera_frames_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// tracing filter directive (e.g. "info", "plastiscan_app=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fixed classifier seed for reproducible demos
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_analysis_delay_ms() -> u64 {
    RandomClassifier::DEFAULT_DELAY.as_millis() as u64
}

fn default_animation_steps() -> u32 {
    DEFAULT_STEPS
}

fn default_animation_duration_ms() -> u64 {
    DEFAULT_DURATION.as_millis() as u64
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
            analysis_timeout_ms: None,
            animation_steps: default_animation_steps(),
            animation_duration_ms: default_animation_duration_ms(),
            camera_frames_dir: None,
            output_format: default_output_format(),
            log_level: default_log_level(),
            seed: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("plastiscan");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_ms.map(Duration::from_millis)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Plastiscan Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Analysis delay:   {} ms", self.analysis_delay_ms)?;
        writeln!(
            f,
            "Analysis timeout: {}",
            self.analysis_timeout_ms
                .map(|ms| format!("{} ms", ms))
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(
            f,
            "Animation:        {} steps over {} ms",
            self.animation_steps, self.animation_duration_ms
        )?;
        writeln!(
            f,
            "Camera frames:    {}",
            self.camera_frames_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(camera disabled)".to_string())
        )?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f, "Log level:        {}", self.log_level)?;
        writeln!(
            f,
            "Seed:             {}",
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(random)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}
