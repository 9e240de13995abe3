//! Configuration loading and Genius token resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and
//! starts with compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default Genius REST API root
pub const DEFAULT_GENIUS_BASE_URL: &str = "https://api.genius.com";

/// Default Instagram private web API root
pub const DEFAULT_INSTAGRAM_BASE_URL: &str = "https://i.instagram.com";

/// Placeholder shipped in sample configs; treated as "not configured"
pub const TOKEN_PLACEHOLDER: &str = "YOUR_GENIUS_TOKEN_HERE";

/// Environment variable holding the Genius bearer token
pub const TOKEN_ENV_VAR: &str = "CREDITS_GENIUS_TOKEN";

/// Environment variable overriding the TOML config path
pub const CONFIG_ENV_VAR: &str = "CREDITS_CONFIG";

/// TOML configuration file schema
///
/// Every field has a default so partial files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Static bearer token for the Genius API
    pub genius_access_token: Option<String>,
    /// Genius API root URL
    pub genius_base_url: String,
    /// Uniform timeout applied to every outbound request
    pub request_timeout_secs: u64,
    pub server: ServerConfig,
    pub instagram: InstagramConfig,
    pub pacing: PacingConfig,
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            genius_access_token: None,
            genius_base_url: DEFAULT_GENIUS_BASE_URL.to_string(),
            request_timeout_secs: 10,
            server: ServerConfig::default(),
            instagram: InstagramConfig::default(),
            pacing: PacingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Outbound request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidInput(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.genius_base_url.trim().is_empty() {
            return Err(Error::InvalidInput(
                "genius_base_url cannot be empty".to_string(),
            ));
        }
        if self.instagram.enabled && self.instagram.base_url.trim().is_empty() {
            return Err(Error::InvalidInput(
                "instagram.base_url cannot be empty when instagram is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Instagram profile lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramConfig {
    /// When false the social client is never constructed
    pub enabled: bool,
    pub base_url: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_INSTAGRAM_BASE_URL.to_string(),
        }
    }
}

/// Minimum spacing between outbound calls of each kind
///
/// An interval of 0 disables pacing for that call kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Song lookups made while resolving search hits to albums
    pub search_song_interval_ms: u64,
    /// Per-track credit lookups during album aggregation
    pub track_credits_interval_ms: u64,
    /// Per-person artist handle lookups during album aggregation
    pub handle_lookup_interval_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            search_song_interval_ms: 300,
            track_credits_interval_ms: 500,
            handle_lookup_interval_ms: 300,
        }
    }
}

impl PacingConfig {
    /// No pacing at all (used by tests and local mocks)
    pub fn disabled() -> Self {
        Self {
            search_song_interval_ms: 0,
            track_credits_interval_ms: 0,
            handle_lookup_interval_ms: 0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Platform default config file location
///
/// e.g. `~/.config/album-credits/credits-server.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-credits").join("credits-server.toml"))
}

/// Pick the config file path: CLI argument, then `CREDITS_CONFIG`, then the
/// platform default
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Read a TOML config file without logging
///
/// Returns `Ok(None)` when the file does not exist. Used to pick the log
/// level before the tracing subscriber is installed.
pub fn read_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Load a TOML config file
///
/// Missing file → warning + defaults. Unreadable or malformed file → error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    match read_toml_config(path)? {
        Some(config) => {
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            warn!(
                "Config file not found at {}, using compiled defaults",
                path.display()
            );
            Ok(TomlConfig::default())
        }
    }
}

/// Validate a Genius token (non-empty, not the sample placeholder)
pub fn is_valid_token(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && token != TOKEN_PLACEHOLDER
}

/// Resolve the Genius bearer token
///
/// **Priority:** CLI → ENV (`CREDITS_GENIUS_TOKEN`) → TOML
///
/// Returns `None` when no source holds a usable token. The service still
/// starts in that case; health reports `token_configured: false`.
pub fn resolve_genius_token(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Option<String> {
    let env_token = std::env::var(TOKEN_ENV_VAR).ok();

    let candidates = [
        ("command line", cli_arg.map(str::to_string)),
        ("environment", env_token),
        ("TOML", toml_config.genius_access_token.clone()),
    ];

    let valid: Vec<(&str, String)> = candidates
        .into_iter()
        .filter_map(|(source, token)| token.filter(|t| is_valid_token(t)).map(|t| (source, t)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Genius token found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.into_iter().next() {
        Some((source, token)) => {
            info!("Genius token loaded from {}", source);
            Some(token.trim().to_string())
        }
        None => {
            warn!(
                "Genius token not configured. Set {} or genius_access_token in the TOML config",
                TOKEN_ENV_VAR
            );
            None
        }
    }
}
