//! Configuration types for Practicum.
//!
//! [`Config`] stores the remote store endpoint, its API key, the shared
//! admin password and an optional cache directory override. Configuration is
//! persisted as TOML (typically at `~/.config/practicum/config.toml` on Unix
//! systems); environment variables override the file so deployments can
//! inject credentials without editing it:
//!
//! - `PRACTICUM_REMOTE_URL`
//! - `PRACTICUM_API_KEY`
//! - `PRACTICUM_ADMIN_PASSWORD`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PracticumError, Result};

/// User-configurable settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote store project root (e.g. `https://xyz.supabase.co`).
    #[serde(default)]
    pub remote_url: String,

    /// Project API key sent with every remote request.
    #[serde(default)]
    pub api_key: String,

    /// Shared admin password. `None` disables the admin surface entirely.
    ///
    /// Note this gate is client-side convenience only; the remote store's
    /// own access rules are the actual security boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,

    /// Override for the local cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Create a config for the given remote endpoint.
    pub fn new(remote_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
            api_key: api_key.into(),
            admin_password: None,
            cache_dir: None,
        }
    }

    /// Overlay environment variables onto the loaded values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("PRACTICUM_REMOTE_URL") {
            self.remote_url = url;
        }
        if let Ok(key) = std::env::var("PRACTICUM_API_KEY") {
            self.api_key = key;
        }
        if let Ok(password) = std::env::var("PRACTICUM_ADMIN_PASSWORD") {
            self.admin_password = Some(password);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Get the config file path (`~/.config/practicum/config.toml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("practicum").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults when
    /// the file doesn't exist. Environment overrides apply either way.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                toml::from_str(&contents)?
            }
            _ => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(PracticumError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            remote_url: "https://xyz.supabase.co".into(),
            api_key: "anon".into(),
            admin_password: Some("secret".into()),
            cache_dir: None,
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();

        assert_eq!(back.remote_url, config.remote_url);
        assert_eq!(back.admin_password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_fields_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.remote_url.is_empty());
        assert!(config.admin_password.is_none());
    }
}
