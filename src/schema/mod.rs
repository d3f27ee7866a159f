//! Schema validators for edutask collections
//!
//! A collection schema is a structural rule set (required fields, field
//! types, string patterns, uniqueness constraints) attached to a collection
//! when it is provisioned. The store enforces it on every insert.
//!
//! # Design Principles
//!
//! - Schemas are data, loaded once into a [`ValidatorRegistry`]
//! - Violations abort writes, nothing is partially stored
//! - No nulls, defaults, or coercion
//! - Deterministic validation

mod builtin;
mod errors;
mod registry;
mod types;
mod validator;

pub use builtin::{builtin_schema, EMAIL_PATTERN, BUILTIN_COLLECTIONS};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use registry::ValidatorRegistry;
pub use types::{CollectionSchema, FieldDef, FieldType, ID_FIELD};
pub use validator::SchemaValidator;
