use config::Environment;
use serde::Deserialize;
use service_core::config::{load_layered, DEFAULT_CONFIG_FILE};
use service_core::error::AppError;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthzConfig {
    pub mongodb_uri: String,
    pub app_port: u16,
    /// Bound on establishing the connection at startup.
    #[serde(default = "default_connect_timeout_secs")]
    pub mongodb_connect_timeout_secs: u64,
    /// Bound on each `/healthz` ping.
    #[serde(default = "default_probe_timeout_ms")]
    pub health_probe_timeout_ms: u64,
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl HealthzConfig {
    /// Load from `.env` in the working directory, falling back to the process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_FILE, Environment::default())
    }

    pub fn load_from(path: impl AsRef<Path>, environment: Environment) -> Result<Self, AppError> {
        let config: Self = load_layered(path, environment)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.mongodb_uri.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONGODB_URI is required but empty"
            )));
        }
        if self.mongodb_connect_timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONGODB_CONNECT_TIMEOUT_SECS must be greater than zero"
            )));
        }
        if self.health_probe_timeout_ms == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "HEALTH_PROBE_TIMEOUT_MS must be greater than zero"
            )));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.mongodb_connect_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.health_probe_timeout_ms)
    }
}
