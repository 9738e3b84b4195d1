//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/regretlog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/regretlog/` (~/.config/regretlog/)
//! - State/Logs: `$XDG_STATE_HOME/regretlog/` (~/.local/state/regretlog/)

use crate::analytics::WinMetric;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analysis parameters
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which clock decides the calendar day a conversation belongs to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Local time zone of the machine running the analysis
    #[default]
    Local,
    /// UTC midnight
    Utc,
}

/// Parameters shared by every analysis run
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Win metrics to analyze, by name
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    /// Minimum trial count for a day to appear in a ratio series
    #[serde(default)]
    pub ratio_threshold: f64,

    /// Trailing window used to smooth regret and per-user series
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,

    /// Calendar day boundary for daily aggregation
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            ratio_threshold: 0.0,
            smoothing_window: default_smoothing_window(),
            day_boundary: DayBoundary::default(),
        }
    }
}

impl AnalysisConfig {
    /// Resolve configured metric names.
    pub fn win_metrics(&self) -> Result<Vec<WinMetric>> {
        self.metrics.iter().map(|name| name.parse()).collect()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(Error::Config(
                "analysis.metrics must name at least one metric".to_string(),
            ));
        }
        self.win_metrics()?;
        if self.smoothing_window == 0 {
            return Err(Error::Config(
                "analysis.smoothing_window must be at least 1".to_string(),
            ));
        }
        if !self.ratio_threshold.is_finite() || self.ratio_threshold < 0.0 {
            return Err(Error::Config(
                "analysis.ratio_threshold must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_metrics() -> Vec<String> {
    vec![
        WinMetric::FbMatch.name().to_string(),
        WinMetric::NoImmediateDisconnect.name().to_string(),
    ]
}

fn default_smoothing_window() -> usize {
    7
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analysis.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/regretlog/config.toml` (~/.config/regretlog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("regretlog").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/regretlog/` (~/.local/state/regretlog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("regretlog")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/regretlog/regretlog.log` (~/.local/state/regretlog/regretlog.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(crate::logging::LOG_FILE_NAME)
    }
}
