// Admin login check
//
// A plain comparison against credentials read from configuration at startup.
// There is no hashing, rate limiting, or expiry: this gates a screen, it is
// not a security boundary.

use crate::config::AdminCredentials;
use crate::notify::{Notification, Notifier};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    /// ADMIN_USERNAME / ADMIN_PASSWORD (or the [admin] section) are unset
    #[error("admin credentials are not configured")]
    NotConfigured,

    #[error("username or password is incorrect")]
    InvalidCredentials,
}

impl LoginError {
    /// Notification shown to the user for this failure
    pub fn notification(&self) -> Notification {
        match self {
            LoginError::NotConfigured => Notification::failure(
                "Configuration error",
                "Admin login credentials are not configured",
            ),
            LoginError::InvalidCredentials => Notification::failure(
                "Login failed",
                "Username or password is incorrect",
            ),
        }
    }
}

/// Compare entered values against the configured pair
pub fn verify(credentials: &AdminCredentials, username: &str, password: &str) -> Result<(), LoginError> {
    let (Some(expected_user), Some(expected_pass)) = (
        credentials.username.as_deref().filter(|s| !s.is_empty()),
        credentials.password.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(LoginError::NotConfigured);
    };

    if username == expected_user && password == expected_pass {
        Ok(())
    } else {
        Err(LoginError::InvalidCredentials)
    }
}

/// Per-run session flags (lost on exit)
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub admin_authenticated: bool,
}

impl Session {
    /// Run a login attempt, report the outcome, and update the session
    ///
    /// The session is only touched on success.
    pub fn login<N: Notifier>(
        &mut self,
        credentials: &AdminCredentials,
        username: &str,
        password: &str,
        notifier: &mut N,
    ) -> Result<(), LoginError> {
        match verify(credentials, username, password) {
            Ok(()) => {
                self.admin_authenticated = true;
                tracing::info!(user = username, "admin login succeeded");
                notifier.notify(Notification::success(
                    "Login successful",
                    "Redirecting to the admin screen...",
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("admin login rejected: {}", e);
                notifier.notify(e.notification());
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.admin_authenticated = false;
    }
}
