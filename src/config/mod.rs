//! Configuration
//!
//! A JSON file, every field optional:
//!
//! ```json
//! { "connection_string": "memory://edutask", "schema_dir": null, "log_level": "INFO" }
//! ```
//!
//! `EDUTASK_CONNECTION_STRING` overrides `connection_string` when set.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::ValidatorRegistry;
use crate::store::{StoreClient, StoreUri};

/// Environment variable overriding the connection string
pub const CONNECTION_STRING_ENV: &str = "EDUTASK_CONNECTION_STRING";

/// Data layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store connection string (default: "memory://edutask")
    #[serde(default = "default_connection_string")]
    pub connection_string: String,

    /// Directory of `<collection>.json` schema files added to the built-ins
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Minimum log severity (default: "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_connection_string() -> String {
    "memory://edutask".to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection_string: default_connection_string(),
            schema_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Reads, overrides from the environment and validates a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::parse_unvalidated(&text)?.with_env_overrides();
        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("connection_string", &config.connection_string),
                ("path", &path.display().to_string()),
            ],
        );
        Ok(config)
    }

    /// Parses and validates config text. The environment is not consulted.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let config = Self::parse_unvalidated(text)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_unvalidated(text: &str) -> ConfigResult<Self> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies `EDUTASK_CONNECTION_STRING` if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` (environment variable name to value).
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(connection_string) = lookup(CONNECTION_STRING_ENV) {
            self.connection_string = connection_string;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.store_uri()?;
        self.severity()?;
        Ok(())
    }

    pub fn store_uri(&self) -> ConfigResult<StoreUri> {
        self.connection_string
            .parse()
            .map_err(ConfigError::InvalidConnectionString)
    }

    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::InvalidLogLevel)
    }

    /// Sets the process-wide minimum log severity.
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }

    /// Built-in schemas plus every schema file in `schema_dir`.
    pub fn build_registry(&self) -> ConfigResult<ValidatorRegistry> {
        let mut registry = ValidatorRegistry::with_builtins();
        if let Some(dir) = &self.schema_dir {
            let loaded = registry.load_dir(dir)?;
            log_event_with_fields(
                Event::SchemasLoaded,
                &[
                    ("dir", &dir.display().to_string()),
                    ("loaded", &loaded.to_string()),
                ],
            );
        }
        Ok(registry)
    }

    pub fn connect(&self) -> ConfigResult<StoreClient> {
        StoreClient::connect(&self.connection_string).map_err(ConfigError::InvalidConnectionString)
    }
}
