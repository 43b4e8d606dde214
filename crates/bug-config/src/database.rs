//! Database connection configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "bugtracker.db".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database path, `:memory:`, or a remote libSQL URL
    /// (`libsql://`, `http://`, `https://`).
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases. Ignored for local paths.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether `url` points at a remote libSQL server.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        ["libsql://", "http://", "https://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}
