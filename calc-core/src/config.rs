//! Configuration for the calculator service

use serde::{Deserialize, Serialize};

/// Calculator service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Metrics listen address
    pub metrics_listen_addr: String,

    /// Actor mailbox capacity (pending calls)
    pub mailbox_capacity: usize,

    /// Notification channel capacity (undrained notifications)
    pub notification_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "calc-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            metrics_listen_addr: "0.0.0.0:9090".to_string(),
            mailbox_capacity: 1000,
            notification_buffer: 4096,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(addr) = std::env::var("CALC_METRICS_ADDR") {
            config.metrics_listen_addr = addr;
        }

        if let Ok(capacity) = std::env::var("CALC_MAILBOX_CAPACITY") {
            config.mailbox_capacity = capacity
                .parse()
                .map_err(|_| crate::Error::Config("Invalid CALC_MAILBOX_CAPACITY".to_string()))?;
        }

        if let Ok(buffer) = std::env::var("CALC_NOTIFICATION_BUFFER") {
            config.notification_buffer = buffer
                .parse()
                .map_err(|_| crate::Error::Config("Invalid CALC_NOTIFICATION_BUFFER".to_string()))?;
        }

        Ok(config)
    }
}
