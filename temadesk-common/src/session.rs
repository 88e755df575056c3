//! Auth Session
//!
//! The signed-in user as an explicit value instead of ambient global state.
//! A session is populated on successful sign-in, persisted under the user's
//! config directory so the greeting survives across invocations, and cleared
//! on sign-out.

use crate::error::InputError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up precondition checks, run before anything is sent to the
/// authentication collaborator.
pub fn validate_signup_password(password: &str, confirmation: &str) -> Result<(), InputError> {
    if password != confirmation {
        return Err(InputError::PasswordMismatch);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(InputError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Established session with the authentication collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub access_token: String,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, full_name: Option<String>, access_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name,
            access_token: access_token.into(),
            signed_in_at: Utc::now(),
        }
    }

    /// Name used to greet the user; falls back to the email address.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    /// Persist the session, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;
        tracing::info!("session saved for {}", self.email);
        Ok(())
    }

    /// Load the persisted session, if any. An unreadable file is treated as
    /// signed-out rather than an error.
    pub fn load(path: &Path) -> Option<Session> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("ignoring corrupt session file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Sign out: remove the persisted session. A no-op when already absent.
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
        }
        Ok(())
    }
}

/// Default session location (~/.config/temadesk/session.json)
pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("temadesk").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        assert_eq!(Session::load(&path), None);

        let session = Session::new("student@example.com", Some("A. Student".into()), "token-123");
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.display_name(), "A. Student");

        Session::clear(&path).unwrap();
        assert_eq!(Session::load(&path), None);
        // clearing twice is fine
        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_corrupt_session_treated_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Session::load(&path), None);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let session = Session::new("student@example.com", None, "t");
        assert_eq!(session.display_name(), "student@example.com");
    }

    #[test]
    fn test_signup_password_preconditions() {
        assert_eq!(validate_signup_password("secret1", "secret1"), Ok(()));
        assert_eq!(
            validate_signup_password("secret1", "secret2"),
            Err(InputError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup_password("short", "short"),
            Err(InputError::PasswordTooShort {
                min: MIN_PASSWORD_LEN
            })
        );
        // exactly the minimum is accepted
        assert_eq!(validate_signup_password("123456", "123456"), Ok(()));
    }
}
