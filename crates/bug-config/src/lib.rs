//! # bug-config
//!
//! Layered configuration loading for the bug tracker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BUGTRACKER_*` prefix, `__` as separator)
//! 2. The bare `PORT` variable (mapped to `server.port`)
//! 3. Project-level `bugtracker.toml`
//! 4. User-level `~/.config/bugtracker/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BUGTRACKER_SERVER__PORT` -> `server.port`,
//! `BUGTRACKER_DATABASE__URL` -> `database.url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use bug_config::BugConfig;
//!
//! let config = BugConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod client;
mod database;
mod error;
mod log;
mod server;

pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use log::LogConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "bugtracker.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BugConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl BugConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed and
    /// `ConfigError::InvalidValue` if a required value is blank.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(Env::prefixed("BUGTRACKER_").split("__"))
    }

    /// Reject values that would only fail later at bind or open time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a blank host or database URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bugtracker").join("config.toml"))
    }
}
