//! Object storage configuration
//!
//! The project URL and key usually come from SUPABASE_URL / SUPABASE_ANON_KEY.
//! The key is never written back to the config template.

use serde::Deserialize;

/// Storage configuration
#[derive(Clone, PartialEq)]
pub struct StorageConfig {
    /// Project base URL, e.g. https://<project>.supabase.co
    pub url: Option<String>,
    /// Project API key (anon key)
    pub api_key: Option<String>,
    /// Default bucket for card images
    pub bucket: String,
    /// Default folder inside the bucket
    pub folder: String,
    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            bucket: "card-images".to_string(),
            folder: "uploads".to_string(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("bucket", &self.bucket)
            .field("folder", &self.folder)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Storage section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileStorage {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub bucket: Option<String>,
    pub folder: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl StorageConfig {
    /// Create from file config, letting env values take precedence
    pub fn from_file(
        file: Option<FileStorage>,
        env_url: Option<String>,
        env_key: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            url: env_url.or(file.url),
            api_key: env_key.or(file.api_key),
            bucket: file.bucket.unwrap_or(defaults.bucket),
            folder: file.folder.unwrap_or(defaults.folder),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }

    /// URL and key both set
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|s| !s.is_empty())
            && self.api_key.as_deref().is_some_and(|s| !s.is_empty())
    }
}
