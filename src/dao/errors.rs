//! DAO error types
//!
//! Store rejections are translated into typed failures:
//! - validator rejection -> `SchemaValidation` (reject permanently)
//! - duplicate unique key -> `UniquenessViolation` (caller may pick another value)
//! - anything else -> `Store`, unchanged

use thiserror::Error;

use crate::schema::{SchemaError, ValidationDetails};
use crate::store::StoreError;

/// Result type for DAO operations
pub type DaoResult<T> = Result<T, DaoError>;

/// DAO errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaoError {
    /// Caller passed something the DAO refuses before touching the store
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Document violates the collection validator
    #[error("schema validation failed: {0}")]
    SchemaValidation(#[source] SchemaError),

    /// Document repeats a value of a unique field
    #[error("uniqueness violated in '{collection}': {field} = {value} already exists")]
    UniquenessViolation {
        collection: String,
        field: String,
        value: String,
    },

    /// Collection could not be provisioned from the registry
    #[error("provisioning failed: {0}")]
    Provisioning(#[source] SchemaError),

    /// Any other store failure, connectivity included
    #[error(transparent)]
    Store(StoreError),
}

impl DaoError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DaoError::InvalidArgument(_) => "EDU_INVALID_ARGUMENT",
            DaoError::SchemaValidation(_) => "EDU_SCHEMA_VALIDATION_FAILED",
            DaoError::UniquenessViolation { .. } => "EDU_DUPLICATE_KEY",
            DaoError::Provisioning(_) => "EDU_PROVISIONING_FAILED",
            DaoError::Store(err) => err.code(),
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, DaoError::SchemaValidation(_))
    }

    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, DaoError::UniquenessViolation { .. })
    }

    /// Which field broke the validator, and how
    pub fn validation_details(&self) -> Option<&ValidationDetails> {
        match self {
            DaoError::SchemaValidation(err) => err.details(),
            _ => None,
        }
    }
}

impl From<StoreError> for DaoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WriteRejected(schema_err) => DaoError::SchemaValidation(schema_err),
            StoreError::DuplicateKey {
                collection,
                field,
                value,
            } => DaoError::UniquenessViolation {
                collection,
                field,
                value,
            },
            other => DaoError::Store(other),
        }
    }
}
