//! Configuration tests
//!
//! Round-trip guards for the TOML template plus the env > file > default
//! precedence rules.

use super::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Every field written to the template comes back with the same value.
#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.referral_code = "NV \"quoted\" 42".to_string();
    config.interaction = InteractionMode::Touch;
    config.tooltip.auto_dismiss_ms = 8_000;
    config.tooltip.hover_auto_hide_ms = 2_500;
    config.storage.url = Some("https://demo.supabase.co".to_string());
    config.storage.bucket = "banners".to_string();
    config.admin.username = Some("root".to_string());
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let back = Config::resolve(file, no_env);

    assert_eq!(back.referral_code, config.referral_code);
    assert_eq!(back.interaction, InteractionMode::Touch);
    assert_eq!(back.tooltip, config.tooltip);
    assert_eq!(back.storage.url, config.storage.url);
    assert_eq!(back.storage.bucket, "banners");
    assert_eq!(back.admin.username.as_deref(), Some("root"));
    assert_eq!(back.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_secrets_are_never_serialized() {
    let mut config = Config::default();
    config.admin.password = Some("hunter2".to_string());
    config.storage.api_key = Some("anon-secret".to_string());

    let toml_str = config.to_toml();
    assert!(!toml_str.contains("hunter2"));
    assert!(!toml_str.contains("anon-secret"));
}

#[test]
fn test_debug_output_redacts_secrets() {
    let mut config = Config::default();
    config.admin.password = Some("hunter2".to_string());
    config.storage.api_key = Some("anon-secret".to_string());

    let debug = format!("{:?}", config);
    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("anon-secret"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
referral_code = "FROM-FILE"
interaction = "pointer"

[admin]
username = "file-user"
password = "file-pass"
"#,
    )
    .unwrap();

    let config = Config::resolve(
        file,
        env_from(&[
            ("REGDESK_REFERRAL_CODE", "FROM-ENV"),
            ("REGDESK_INTERACTION", "touch"),
            ("ADMIN_PASSWORD", "env-pass"),
        ]),
    );

    assert_eq!(config.referral_code, "FROM-ENV");
    assert_eq!(config.interaction, InteractionMode::Touch);
    assert_eq!(config.admin.username.as_deref(), Some("file-user"));
    assert_eq!(config.admin.password.as_deref(), Some("env-pass"));
}

#[test]
fn test_missing_values_fall_back_to_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env);
    let defaults = Config::default();

    assert_eq!(config.referral_code, defaults.referral_code);
    assert_eq!(config.tooltip, TooltipConfig::default());
    assert_eq!(config.storage.bucket, "card-images");
    assert_eq!(config.storage.folder, "uploads");
    assert!(!config.admin.is_configured());
    assert!(!config.storage.is_configured());
}

#[test]
fn test_storage_credentials_from_env() {
    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "key"),
        ]),
    );
    assert!(config.storage.is_configured());
}

#[test]
fn test_unknown_interaction_falls_back_to_pointer() {
    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("REGDESK_INTERACTION", "stylus")]),
    );
    assert_eq!(config.interaction, InteractionMode::Pointer);
}

#[test]
fn test_tooltip_settings_conversion() {
    let settings = TooltipConfig::default().settings();
    assert_eq!(settings.auto_dismiss, Duration::from_secs(6));
    assert_eq!(settings.leave_debounce, Duration::from_millis(150));
    assert_eq!(settings.hover_auto_hide, None);

    let tooltip = TooltipConfig {
        hover_auto_hide_ms: 1_000,
        ..TooltipConfig::default()
    };
    assert_eq!(tooltip.settings().hover_auto_hide, Some(Duration::from_secs(1)));
}

#[test]
fn test_zero_provisional_size_is_ignored() {
    let tooltip = TooltipConfig::from_file(Some(FileTooltip {
        provisional_width: Some(0),
        ..FileTooltip::default()
    }));
    assert_eq!(tooltip.provisional_width, 44);
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging section
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_log_dir_env_overrides_file() {
    let file = FileLogging {
        file_dir: Some("/var/log/from-file".to_string()),
        ..FileLogging::default()
    };
    let logging = LoggingConfig::from_file(Some(file), Some("/tmp/regdesk-logs".to_string()));
    assert_eq!(logging.file_dir, PathBuf::from("/tmp/regdesk-logs"));

    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("REGDESK_LOG_DIR", "/srv/logs")]),
    );
    assert_eq!(config.logging.file_dir, PathBuf::from("/srv/logs"));
}

#[test]
fn test_blank_log_dir_env_keeps_file_value() {
    let file = FileLogging {
        file_dir: Some("custom".to_string()),
        ..FileLogging::default()
    };
    let logging = LoggingConfig::from_file(Some(file), Some("  ".to_string()));
    assert_eq!(logging.file_dir, PathBuf::from("custom"));
}

#[test]
fn test_unknown_log_level_keeps_default() {
    let logging = LoggingConfig::from_file(
        Some(FileLogging {
            level: Some("verbose".to_string()),
            file_rotation: Some("weekly".to_string()),
            ..FileLogging::default()
        }),
        None,
    );
    assert_eq!(logging.level, "info");
    assert_eq!(logging.file_rotation, LogRotation::Daily);

    let logging = LoggingConfig::from_file(
        Some(FileLogging {
            level: Some(" DEBUG ".to_string()),
            ..FileLogging::default()
        }),
        None,
    );
    assert_eq!(logging.level, "debug");
}
