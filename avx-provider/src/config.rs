//! Provider configuration
//!
//! Settings are read from a JSON file and then overlaid by environment
//! variables, so credentials never have to be written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONTROLLER_IP: &str = "AVIATRIX_CONTROLLER_IP";
pub const ENV_USERNAME: &str = "AVIATRIX_USERNAME";
pub const ENV_PASSWORD: &str = "AVIATRIX_PASSWORD";

/// Errors raised while loading or checking provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required setting is absent from both the file and the environment
    #[error("{field} must be set (or provided via {env})")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("path_to_ca_certificate must be set when verify_ssl_certificate is enabled")]
    MissingCaCertificate,
}

/// Connection settings for a controller
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub controller_ip: String,
    pub username: String,
    pub password: String,
    pub skip_version_validation: bool,
    pub verify_ssl_certificate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_to_ca_certificate: Option<PathBuf>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("controller_ip", &self.controller_ip)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("skip_version_validation", &self.skip_version_validation)
            .field("verify_ssl_certificate", &self.verify_ssl_certificate)
            .field("path_to_ca_certificate", &self.path_to_ca_certificate)
            .finish()
    }
}

impl ProviderConfig {
    /// Load settings from a JSON file and overlay the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load settings from a JSON file without consulting the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `AVIATRIX_*` variables from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values returned by `lookup`; empty values are ignored
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overlay = |key: &str, field: &mut String| {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *field = value;
            }
        };
        overlay(ENV_CONTROLLER_IP, &mut self.controller_ip);
        overlay(ENV_USERNAME, &mut self.username);
        overlay(ENV_PASSWORD, &mut self.password);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("controller_ip", ENV_CONTROLLER_IP, &self.controller_ip),
            ("username", ENV_USERNAME, &self.username),
            ("password", ENV_PASSWORD, &self.password),
        ];
        for (field, env, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Missing { field, env });
            }
        }
        if self.verify_ssl_certificate && self.path_to_ca_certificate.is_none() {
            return Err(ConfigError::MissingCaCertificate);
        }
        Ok(())
    }
}
