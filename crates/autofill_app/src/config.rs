use std::path::Path;
use std::time::Duration;

use autofill_engine::ServiceSettings;
use autofill_logging::{autofill_info, autofill_warn};
use serde::{Deserialize, Serialize};

/// Name of the optional config file next to the binary.
pub const CONFIG_FILENAME: &str = "autofill.ron";

/// Host configuration: only the service address and its transport bounds.
/// The retry/delay constants are protocol-visible and stay fixed in
/// `autofill_core`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080/".to_string(),
            connect_timeout_ms: 2_000,
            request_timeout_ms: 5_000,
        }
    }
}

impl AppConfig {
    /// Loads `autofill.ron` from `dir`, falling back to defaults when the
    /// file is missing or unparseable.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                autofill_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                autofill_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                autofill_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.service_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}
