//! Connection string parsing
//!
//! Format: `memory://<database>`. The database name is made of ASCII
//! letters, digits, `_` and `-`.

use std::fmt;
use std::str::FromStr;

use super::errors::StoreError;

/// Scheme of the embedded in-process store
pub const MEMORY_SCHEME: &str = "memory";

/// Parsed connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUri {
    scheme: String,
    database: String,
}

impl StoreUri {
    /// Builds a `memory://` URI for `database`
    pub fn memory(database: impl Into<String>) -> Result<Self, StoreError> {
        format!("{}://{}", MEMORY_SCHEME, database.into()).parse()
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Database selected by the connection string
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl FromStr for StoreUri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StoreError::InvalidUri {
            uri: s.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = s.split_once("://").ok_or_else(|| invalid("missing '://'"))?;

        if scheme != MEMORY_SCHEME {
            return Err(invalid(&format!(
                "unsupported scheme '{}', expected '{}'",
                scheme, MEMORY_SCHEME
            )));
        }

        let database = rest.trim_end_matches('/');
        if database.is_empty() {
            return Err(invalid("database name is empty"));
        }
        if !database
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid("database name may only contain letters, digits, '_' and '-'"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            database: database.to_string(),
        })
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.database)
    }
}
