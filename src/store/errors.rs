//! Store error types
//!
//! Error codes:
//! - EDU_STORE_WRITE_REJECTED: document violates the collection validator
//! - EDU_STORE_DUPLICATE_KEY: unique key already present
//! - EDU_STORE_INVALID_VALIDATOR: validator offered at creation is malformed
//! - EDU_STORE_INVALID_DOCUMENT: document carries store-owned fields
//! - EDU_STORE_COLLECTION_EXISTS: collection already provisioned
//! - EDU_STORE_INVALID_URI: connection string cannot be parsed
//! - EDU_STORE_CONNECTION: client closed or unreachable
//! - EDU_STORE_POISONED: store state poisoned by a panicked writer

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors.
///
/// Write rejection and duplicate key are distinct variants and must never be
/// folded into one another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Document failed the collection validator
    #[error("document failed validation: {0}")]
    WriteRejected(#[source] SchemaError),

    /// A unique key value is already present in the collection
    #[error("duplicate key error: collection '{collection}' already has {field} = {value}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    /// Validator offered at collection creation is malformed
    #[error("invalid validator: {0}")]
    InvalidValidator(#[source] SchemaError),

    /// Document is not acceptable to the store at all
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Collection already exists
    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    /// Connection string cannot be parsed
    #[error("invalid connection string '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Client closed or store unreachable
    #[error("store connection unavailable: {0}")]
    Connection(String),

    /// Shared state poisoned
    #[error("store state poisoned by a panicked writer")]
    Poisoned,
}

impl StoreError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::WriteRejected(_) => "EDU_STORE_WRITE_REJECTED",
            StoreError::DuplicateKey { .. } => "EDU_STORE_DUPLICATE_KEY",
            StoreError::InvalidValidator(_) => "EDU_STORE_INVALID_VALIDATOR",
            StoreError::InvalidDocument(_) => "EDU_STORE_INVALID_DOCUMENT",
            StoreError::CollectionExists(_) => "EDU_STORE_COLLECTION_EXISTS",
            StoreError::InvalidUri { .. } => "EDU_STORE_INVALID_URI",
            StoreError::Connection(_) => "EDU_STORE_CONNECTION",
            StoreError::Poisoned => "EDU_STORE_POISONED",
        }
    }

    /// Returns true if the store refused a write because of the validator
    pub fn is_write_rejection(&self) -> bool {
        matches!(self, StoreError::WriteRejected(_))
    }

    /// Returns true if the store refused a write because of a unique key
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}
