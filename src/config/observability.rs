//! `[logging]` section: filter level and the optional JSON log file
//!
//! Captured logs normally live only in the TUI buffer (or go to stderr for
//! subcommands). The file output is for post-mortems of upload and login
//! problems, so it is off unless asked for.

use serde::Deserialize;
use std::path::PathBuf;

/// Levels accepted for the `regdesk=` filter directive
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One ever-growing file
    Never,
}

impl LogRotation {
    /// Unknown values fall back to daily
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Effective logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the `regdesk` target; `RUST_LOG` still wins at startup
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name prefix, e.g. "regdesk" -> "regdesk.2026-10-19"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "regdesk".to_string(),
        }
    }
}

/// `[logging]` as written in the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

/// Lowercased level if it is one the filter understands
fn normalize_level(level: &str) -> Option<String> {
    let level = level.trim().to_lowercase();
    LEVELS.contains(&level.as_str()).then_some(level)
}

impl LoggingConfig {
    /// Resolve the section; `env_dir` (`REGDESK_LOG_DIR`) overrides `file_dir`
    ///
    /// A misspelled level keeps the default instead of producing a filter
    /// directive that silences everything.
    pub fn from_file(file: Option<FileLogging>, env_dir: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let file_dir = env_dir
            .filter(|dir| !dir.trim().is_empty())
            .or(file.file_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.file_dir);

        Self {
            level: file
                .level
                .as_deref()
                .and_then(normalize_level)
                .unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir,
            file_rotation: file
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.file_rotation),
            file_prefix: file
                .file_prefix
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.file_prefix),
        }
    }
}
