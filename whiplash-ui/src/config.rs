//! Configuration resolution for whiplash-ui
//!
//! Spotify credentials resolve with ENV → TOML priority; the TOML file
//! defaults to the platform config directory
//! (e.g. `~/.config/whiplash/whiplash.toml` on Linux).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// TOML config file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Load the config file, treating a missing file as empty defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("Parse TOML failed: {}", e)))
    }
}

/// Default configuration file path for the platform
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("whiplash").join("whiplash.toml"))
        .unwrap_or_else(|| PathBuf::from("whiplash.toml"))
}

/// Spotify client-credentials pair
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Resolve Spotify credentials from 2-tier configuration
///
/// **Priority:** ENV → TOML
pub fn resolve_spotify_credentials(
    toml_config: &TomlConfig,
) -> Result<SpotifyCredentials, ConfigError> {
    let client_id = resolve_value(
        "WHIPLASH_SPOTIFY_CLIENT_ID",
        toml_config.spotify_client_id.as_deref(),
        "spotify_client_id",
    )?;
    let client_secret = resolve_value(
        "WHIPLASH_SPOTIFY_CLIENT_SECRET",
        toml_config.spotify_client_secret.as_deref(),
        "spotify_client_secret",
    )?;
    Ok(SpotifyCredentials {
        client_id,
        client_secret,
    })
}

fn resolve_value(
    env_var: &str,
    toml_value: Option<&str>,
    key: &str,
) -> Result<String, ConfigError> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_value(v));
    let toml_value = toml_value.filter(|v| is_valid_value(v)).map(str::to_string);

    // Warn if multiple sources (potential misconfiguration)
    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} found in both environment and TOML config. Using environment (highest priority).",
            key
        );
    }

    if let Some(value) = env_value {
        info!("{} loaded from environment variable", key);
        return Ok(value);
    }

    if let Some(value) = toml_value {
        info!("{} loaded from TOML config", key);
        return Ok(value);
    }

    Err(ConfigError::Invalid(format!(
        "{} not configured. Please configure using one of:\n\
         1. Environment: {}=your-value\n\
         2. TOML config: {} ({} = \"your-value\")\n\
         \n\
         Obtain credentials at: https://developer.spotify.com/dashboard",
        key,
        env_var,
        default_config_path().display(),
        key
    )))
}

/// Validate a credential value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}
