//! Configuration resolution for credits-server
//!
//! Applies command-line overrides on top of the TOML file (which already
//! carries compiled defaults for absent keys) and resolves the Genius token.

use credits_common::config::{load_toml_config, read_toml_config, resolve_genius_token, TomlConfig};
use credits_common::Result;
use std::path::Path;
use tracing::warn;

/// Log filter directive to start tracing with
///
/// Chosen before the subscriber exists, so the config file is read without
/// logging. Priority: CLI → TOML `logging.level` → `"info"`. An unreadable
/// file falls back here and is reported by [`ServiceConfig::load`].
pub fn initial_log_level(cli_level: Option<&str>, config_path: Option<&Path>) -> String {
    if let Some(level) = cli_level {
        return level.to_string();
    }

    config_path
        .and_then(|path| read_toml_config(path).ok().flatten())
        .map(|config| config.logging.level)
        .unwrap_or_else(|| TomlConfig::default().logging.level)
}

/// Values given on the command line (or their `CREDITS_*` env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub genius_token: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub settings: TomlConfig,
    /// `None` when no source held a usable token
    pub genius_token: Option<String>,
}

impl ServiceConfig {
    /// Load the TOML file (if any) and resolve it against the overrides
    ///
    /// Call after tracing is initialized: config and token resolution
    /// report their sources through log events.
    pub fn load(config_path: Option<&Path>, overrides: CliOverrides) -> Result<Self> {
        let settings = match config_path {
            Some(path) => load_toml_config(path)?,
            None => {
                warn!("No config directory available, using compiled defaults");
                TomlConfig::default()
            }
        };

        Self::resolve(settings, overrides)
    }

    /// Merge overrides into the TOML settings, validate, resolve the token
    pub fn resolve(mut settings: TomlConfig, overrides: CliOverrides) -> Result<Self> {
        if let Some(host) = overrides.host {
            settings.server.host = host;
        }
        if let Some(port) = overrides.port {
            settings.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            settings.logging.level = level;
        }

        settings.validate()?;

        let genius_token = resolve_genius_token(overrides.genius_token.as_deref(), &settings);

        Ok(Self {
            settings,
            genius_token,
        })
    }

    pub fn token_configured(&self) -> bool {
        self.genius_token.is_some()
    }

    /// `host:port` for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.settings.server.host, self.settings.server.port)
    }
}
