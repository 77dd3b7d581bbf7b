//! weir.toml configuration parser.
//!
//! The only knob is the traffic-shaping backend endpoint. It is
//! injected into the client at construction rather than read from a
//! process-wide constant, so tests can point it at a local listener.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Backend endpoint the router ships weight updates to when no
/// configuration file overrides it.
pub const DEFAULT_BACKEND_ENDPOINT: &str = "host.minikube.internal:8222";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub backend: BackendConfig,
}

/// Connection settings for the traffic-shaping backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// `host:port` of the backend's weight endpoint.
    pub endpoint: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                endpoint: DEFAULT_BACKEND_ENDPOINT.to_string(),
            },
        }
    }
}

impl RouterConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RouterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
