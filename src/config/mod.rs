//! Configuration for the registration desk
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/regdesk/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod admin;
mod observability;
mod serialization;
mod storage;
mod tooltip;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use admin::{AdminCredentials, FileAdmin};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use storage::{FileStorage, StorageConfig};
pub use tooltip::{FileTooltip, TooltipConfig};

use crate::tooltip::InteractionMode;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_REFERRAL_CODE: &str = "NV0000";
const DEFAULT_REGISTER_URL: &str = "https://example.com/register";
const DEFAULT_THEME: &str = "Dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Staff referral code shown in the tooltip and copied to the clipboard
    pub referral_code: String,

    /// Where the registration form lives (shown on the register screen)
    pub register_url: String,

    /// Theme name: "Dark", "Light"
    pub theme: String,

    /// Pointer (hover + click) or touch (tap twice) interaction
    pub interaction: InteractionMode,

    /// Tooltip timing and sizing
    pub tooltip: TooltipConfig,

    /// Admin login credentials (never written to the config template)
    pub admin: AdminCredentials,

    /// Object storage project and defaults
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            referral_code: DEFAULT_REFERRAL_CODE.to_string(),
            register_url: DEFAULT_REGISTER_URL.to_string(),
            theme: DEFAULT_THEME.to_string(),
            interaction: InteractionMode::default(),
            tooltip: TooltipConfig::default(),
            admin: AdminCredentials::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub referral_code: Option<String>,
    pub register_url: Option<String>,
    pub theme: Option<String>,
    pub interaction: Option<String>,

    /// Optional [tooltip] section
    pub tooltip: Option<FileTooltip>,

    /// Optional [admin] section
    pub admin: Option<FileAdmin>,

    /// Optional [storage] section
    pub storage: Option<FileStorage>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/regdesk/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("regdesk").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the config file exists but cannot be parsed. A
    /// broken config should fail fast with a clear error, not silently fall
    /// back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `regdesk config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Referral code: env > file > default
        let referral_code = env("REGDESK_REFERRAL_CODE")
            .or(file.referral_code)
            .unwrap_or_else(|| DEFAULT_REFERRAL_CODE.to_string());

        let register_url = env("REGDESK_REGISTER_URL")
            .or(file.register_url)
            .unwrap_or_else(|| DEFAULT_REGISTER_URL.to_string());

        let theme = env("REGDESK_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Interaction mode: env > file > pointer; unknown values fall back
        let interaction = env("REGDESK_INTERACTION")
            .or(file.interaction)
            .and_then(|v| InteractionMode::parse(&v))
            .unwrap_or_default();

        let tooltip = TooltipConfig::from_file(file.tooltip);

        // Credentials: env takes precedence over the [admin] section
        let admin = AdminCredentials::from_file(
            file.admin,
            env("ADMIN_USERNAME"),
            env("ADMIN_PASSWORD"),
        );

        let storage = StorageConfig::from_file(
            file.storage,
            env("SUPABASE_URL"),
            env("SUPABASE_ANON_KEY"),
        );

        let logging = LoggingConfig::from_file(file.logging, env("REGDESK_LOG_DIR"));

        Self {
            referral_code,
            register_url,
            theme,
            interaction,
            tooltip,
            admin,
            storage,
            logging,
        }
    }
}
