//! Client Configuration
//!
//! Parses temadesk.toml for the external collaborator endpoints. Every section
//! is optional: without an auth endpoint the auth commands explain how to
//! configure one, and without an intake endpoint orders are acknowledged
//! locally by the stub.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The main configuration structure matching temadesk.toml
#[derive(Debug, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Authentication collaborator (hosted identity provider)
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the provider, e.g. "https://xyz.supabase.co"
    #[serde(default)]
    pub url: Option<String>,

    /// Publishable API key sent with every auth request
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Order-intake collaborator
#[derive(Debug, Default, Deserialize)]
pub struct IntakeConfig {
    /// Endpoint orders are POSTed to; unset means local stub acknowledgement
    #[serde(default)]
    pub url: Option<String>,
}

impl ClientConfig {
    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn parse(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse temadesk.toml")
    }

    /// Load the user's configuration, falling back to defaults when the file
    /// does not exist, then apply environment overrides (TEMADESK_AUTH_URL,
    /// TEMADESK_AUTH_KEY, TEMADESK_INTAKE_URL).
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("TEMADESK_AUTH_URL") {
            config.auth.url = Some(url);
        }
        if let Ok(key) = std::env::var("TEMADESK_AUTH_KEY") {
            config.auth.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("TEMADESK_INTAKE_URL") {
            config.intake.url = Some(url);
        }

        Ok(config)
    }
}

/// Default configuration location (~/.config/temadesk/temadesk.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("temadesk").join("temadesk.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = ClientConfig::parse("").unwrap();
        assert!(config.auth.url.is_none());
        assert!(config.intake.url.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [auth]
            url = "https://xyz.supabase.co"
            api_key = "public-anon-key"

            [intake]
            url = "https://orders.example.com/api/orders"
        "#;

        let config = ClientConfig::parse(toml).unwrap();
        assert_eq!(config.auth.url.as_deref(), Some("https://xyz.supabase.co"));
        assert_eq!(config.auth.api_key.as_deref(), Some("public-anon-key"));
        assert_eq!(
            config.intake.url.as_deref(),
            Some("https://orders.example.com/api/orders")
        );
    }

    #[test]
    fn test_partial_config_keeps_other_sections_default() {
        let config = ClientConfig::parse("[intake]\nurl = \"http://localhost:9000\"\n").unwrap();
        assert!(config.auth.url.is_none());
        assert_eq!(config.intake.url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_from_file_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("temadesk.toml");
        assert!(ClientConfig::from_file(&missing).is_err());
    }
}
