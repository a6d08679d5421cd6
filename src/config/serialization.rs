//! Config serialization to TOML
//!
//! Single source of truth for config file format. Secrets (admin password,
//! storage key) are never written; the template only points at their env vars.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize the optional storage URL (commented out when unset)
    pub(super) fn storage_url_to_toml(&self) -> String {
        match self.storage.url.as_deref() {
            Some(url) if !url.is_empty() => format!("url = {}\n", quoted(url)),
            _ => "# url = \"https://<project>.supabase.co\"   # or SUPABASE_URL\n".to_string(),
        }
    }

    /// Serialize the admin username (commented out when unset)
    pub(super) fn admin_to_toml(&self) -> String {
        match self.admin.username.as_deref() {
            Some(user) if !user.is_empty() => format!("username = {}\n", quoted(user)),
            _ => "# username = \"admin\"   # or ADMIN_USERNAME\n".to_string(),
        }
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# regdesk configuration

# Staff referral code shown in the registration tooltip
referral_code = {referral_code}

# Registration form address (shown after the user proceeds)
register_url = {register_url}

# Theme: Dark, Light
theme = {theme}

# Interaction mode: "pointer" (hover to preview, click to register)
# or "touch" (tap to preview, tap again to register)
interaction = "{interaction}"

[tooltip]
enabled = {tooltip_enabled}
auto_dismiss_ms = {auto_dismiss_ms}
leave_debounce_ms = {leave_debounce_ms}
hover_auto_hide_ms = {hover_auto_hide_ms}  # 0 = never
gap = {gap}
provisional_width = {provisional_width}
provisional_height = {provisional_height}

# Admin login. Prefer ADMIN_USERNAME / ADMIN_PASSWORD env vars.
[admin]
{admin}# password is read from ADMIN_PASSWORD

# Object storage (Supabase). The key is read from SUPABASE_ANON_KEY.
[storage]
{storage_url}bucket = {bucket}
folder = {folder}
timeout_secs = {timeout_secs}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            referral_code = quoted(&self.referral_code),
            register_url = quoted(&self.register_url),
            theme = quoted(&self.theme),
            interaction = self.interaction.as_str(),
            tooltip_enabled = self.tooltip.enabled,
            auto_dismiss_ms = self.tooltip.auto_dismiss_ms,
            leave_debounce_ms = self.tooltip.leave_debounce_ms,
            hover_auto_hide_ms = self.tooltip.hover_auto_hide_ms,
            gap = self.tooltip.gap,
            provisional_width = self.tooltip.provisional_width,
            provisional_height = self.tooltip.provisional_height,
            admin = self.admin_to_toml(),
            storage_url = self.storage_url_to_toml(),
            bucket = quoted(&self.storage.bucket),
            folder = quoted(&self.storage.folder),
            timeout_secs = self.storage.timeout_secs,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
