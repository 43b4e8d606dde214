//! Logging configuration.

use serde::{Deserialize, Serialize};

fn default_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive when `BUGTRACKER_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
