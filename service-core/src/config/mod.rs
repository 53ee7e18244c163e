//! Layered configuration: a local dotenv-style file first, process environment second.

use crate::error::AppError;
use config::{Config as Cfg, ConfigError, Environment, Map, Source, Value};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Default configuration file, looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// A `KEY=value` file parsed with dotenvy and exposed as a `config` source.
///
/// Keys are lowercased to line up with [`Environment`], which lowercases
/// everything it collects.
#[derive(Debug, Clone)]
pub struct DotenvFile {
    origin: String,
    values: Map<String, String>,
}

impl DotenvFile {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("failed to open {}: {}", origin, e))
        })?;

        let mut values = Map::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("failed to parse {}: {}", origin, e))
            })?;
            values.insert(key.to_lowercase(), value);
        }

        Ok(Self { origin, values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Source for DotenvFile {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::new(Some(&self.origin), v.clone())))
            .collect())
    }
}

/// Merge the environment and the file at `path` into `T`.
///
/// Sources are ordered; a later source overrides an earlier one per key, so the
/// file is added last and wins. An unreadable file is logged and skipped.
pub fn load_layered<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    environment: Environment,
) -> Result<T, AppError> {
    let mut builder = Cfg::builder().add_source(environment);

    match DotenvFile::read(path.as_ref()) {
        Ok(file) => {
            tracing::debug!(
                path = %path.as_ref().display(),
                keys = file.len(),
                "Loaded configuration file"
            );
            builder = builder.add_source(file);
        }
        Err(e) => {
            tracing::warn!(
                path = %path.as_ref().display(),
                error = %e,
                "Reading configuration file failed, using process environment variables"
            );
        }
    }

    Ok(builder.build()?.try_deserialize()?)
}
