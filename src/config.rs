//! Configuration handling for the intake client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default submission endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/submit";

/// Default transport timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "CERTIFICATE_INTAKE_ENDPOINT";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Submission endpoint URL
    pub endpoint: Option<String>,
    /// Transport timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "certificate-intake", "certificate-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.apply_endpoint_override(endpoint);
        }

        Ok(config)
    }

    fn apply_endpoint_override(&mut self, endpoint: String) {
        if !endpoint.trim().is_empty() {
            self.endpoint = Some(endpoint.trim().to_string());
        }
    }

    /// Endpoint to submit to
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}
