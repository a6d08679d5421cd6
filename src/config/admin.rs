//! Admin login credentials
//!
//! Read once at startup. Environment values win over the [admin] section.

use serde::Deserialize;

/// Configured admin username/password pair
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Admin section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAdmin {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AdminCredentials {
    /// Create from file config, letting env values take precedence
    pub fn from_file(
        file: Option<FileAdmin>,
        env_username: Option<String>,
        env_password: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        Self {
            username: env_username.or(file.username),
            password: env_password.or(file.password),
        }
    }

    /// Both values present and non-empty
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.username) && present(&self.password)
    }
}
