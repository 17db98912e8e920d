//! TOML configuration for opening libiio contexts.
//!
//! # Example Configuration
//!
//! ```toml
//! uri = "ip:192.168.2.1"
//! timeout_ms = 2000
//! log_level = "warning"
//!
//! # Only used by `IioConfig::scan`
//! backends = "usb,ip"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Context, ContextParams, LogLevel};
use crate::error::{IioError, Result};
use crate::scan::Scan;

/// Connection settings for a libiio context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IioConfig {
    /// Context URI (e.g. "local:", "ip:192.168.2.1"); unset lets libiio decide
    #[serde(default)]
    pub uri: Option<String>,

    /// Backend filter for scans (e.g. "usb,ip"); unset scans everything
    #[serde(default)]
    pub backends: Option<String>,

    /// I/O timeout in milliseconds (0 = backend default)
    #[serde(default)]
    pub timeout_ms: u32,

    /// libiio log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl IioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IioError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), uri = ?config.uri, "Loaded libiio configuration");
        Ok(config)
    }

    /// Context parameters described by this configuration.
    pub fn context_params(&self) -> ContextParams {
        ContextParams::new()
            .with_log_level(self.log_level)
            .with_timeout_ms(self.timeout_ms)
    }

    /// Open the configured context.
    pub fn open_context(&self) -> Result<Context> {
        Context::new(&self.context_params(), self.uri.as_deref())
    }

    /// Scan the configured backends.
    pub fn scan(&self) -> Result<Scan> {
        Scan::new(&self.context_params(), self.backends.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = IioConfig::from_toml_str("").unwrap();
        assert_eq!(config, IioConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.context_params().timeout_ms, 0);
    }

    #[test]
    fn test_full_config() {
        let config = IioConfig::from_toml_str(
            r#"
            uri = "ip:192.168.2.1"
            backends = "usb,ip"
            timeout_ms = 2000
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.uri.as_deref(), Some("ip:192.168.2.1"));
        assert_eq!(config.backends.as_deref(), Some("usb,ip"));

        let params = config.context_params();
        assert_eq!(params.timeout_ms, 2000);
        assert_eq!(params.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = IioConfig::from_toml_str("url = \"local:\"").unwrap_err();
        assert!(matches!(err, IioError::InvalidConfig { .. }));
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        assert!(IioConfig::from_toml_str("log_level = \"verbose\"").is_err());
    }
}
