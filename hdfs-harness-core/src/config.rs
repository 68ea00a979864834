use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Environment variable holding the path to the extension binary under test.
pub const EXTENSION_BINARY_ENV: &str = "QUACK_EXTENSION_BINARY_PATH";

const ENV_PREFIX: &str = "QUACK";

/// Output format for the runner's tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Raw settings as they come out of the layered config sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RawConfig {
    extension_binary_path: Option<String>,
    log_format: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            extension_binary_path: None,
            log_format: "compact".to_string(),
        }
    }
}

/// Validated harness configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub extension_binary: PathBuf,
    pub log_format: LogFormat,
}

impl HarnessConfig {
    /// Load from the process environment (`QUACK_*`).
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::build(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn load_from<I, K, V>(vars: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::build(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    /// Build a configuration for an already-known binary path.
    pub fn for_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            extension_binary: path.into(),
            log_format: LogFormat::Compact,
        }
    }

    pub fn extension_binary(&self) -> &Path {
        &self.extension_binary
    }

    fn build(environment: config::Environment) -> Result<Self, ConfigurationError> {
        let defaults_json = serde_json::to_string(&RawConfig::default())
            .map_err(|err| config::ConfigError::Foreign(Box::new(err)))?;
        let settings = config::Config::builder()
            .add_source(
                config::File::from_str(&defaults_json, config::FileFormat::Json).required(false),
            )
            .add_source(environment)
            .build()?;
        let raw: RawConfig = settings.try_deserialize()?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigurationError> {
        let path = raw
            .extension_binary_path
            .ok_or(ConfigurationError::Missing)?;
        if path.trim().is_empty() {
            return Err(ConfigurationError::Empty);
        }

        let log_format = match raw.log_format.trim().to_ascii_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            "json" => LogFormat::Json,
            _ => return Err(ConfigurationError::LogFormat(raw.log_format)),
        };

        Ok(Self {
            extension_binary: PathBuf::from(path),
            log_format,
        })
    }
}
