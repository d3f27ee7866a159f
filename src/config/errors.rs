//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::StoreError;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(#[source] StoreError),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("schema loading failed: {0}")]
    Schema(#[from] SchemaError),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "EDU_CONFIG_IO",
            ConfigError::Parse(_) => "EDU_CONFIG_MALFORMED",
            ConfigError::InvalidConnectionString(_) => "EDU_CONFIG_CONNECTION_STRING",
            ConfigError::InvalidLogLevel(_) => "EDU_CONFIG_LOG_LEVEL",
            ConfigError::Schema(err) => err.code().code(),
        }
    }
}
