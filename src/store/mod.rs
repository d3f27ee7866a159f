//! Embedded document store
//!
//! Named collections of JSON documents grouped in databases. The store is the
//! single source of truth for constraint enforcement:
//!
//! - Validators attached at collection creation are checked on every insert
//! - Unique keys are checked on every insert
//! - A rejected insert stores nothing
//! - `_id` is assigned by the store and never supplied by callers
//!
//! Validation failures and duplicate keys surface as distinct errors.

mod client;
mod collection;
mod errors;
mod filter;
mod id;
mod uri;

pub use client::{Collection, Database, StoreClient};
pub use errors::{StoreError, StoreResult};
pub use filter::DocumentFilter;
pub use id::DocumentId;
pub use uri::{StoreUri, MEMORY_SCHEME};

/// A stored or to-be-stored document
pub type Document = serde_json::Map<String, serde_json::Value>;
