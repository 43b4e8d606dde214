//! Front-end client configuration.

use serde::{Deserialize, Serialize};

fn default_server_url() -> String {
    "http://localhost:5000".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api` suffix.
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}
