//! Validator registry: collection name -> validation rule set
//!
//! Schemas are data. They are registered once (built-ins, files on disk or
//! programmatically) and looked up by whoever provisions a collection.
//!
//! On disk a schema lives at `<dir>/<collection>.json`, one file per
//! collection. A registered collection cannot be redefined.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::builtin::{builtin_schema, BUILTIN_COLLECTIONS};
use super::errors::{SchemaError, SchemaResult};
use super::types::CollectionSchema;

/// In-memory registry of collection validators.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    schemas: BTreeMap<String, CollectionSchema>,
}

impl ValidatorRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in user, task, todo and video validators
    pub fn with_builtins() -> Self {
        let mut schemas = BTreeMap::new();
        for name in BUILTIN_COLLECTIONS {
            if let Some(schema) = builtin_schema(name) {
                schemas.insert(schema.collection.clone(), schema);
            }
        }
        Self { schemas }
    }

    /// Registers a schema directly.
    pub fn register(&mut self, schema: CollectionSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.collection) {
            return Err(SchemaError::schema_immutable(&schema.collection));
        }

        self.schemas.insert(schema.collection.clone(), schema);
        Ok(())
    }

    /// Returns the validator for a collection.
    ///
    /// Fails with EDU_UNKNOWN_SCHEMA if none is registered.
    pub fn get_validator(&self, collection: &str) -> SchemaResult<&CollectionSchema> {
        self.schemas
            .get(collection)
            .ok_or_else(|| SchemaError::unknown_schema(collection))
    }

    /// Checks if a collection has a validator.
    pub fn contains(&self, collection: &str) -> bool {
        self.schemas.contains_key(collection)
    }

    /// Registered collection names in sorted order.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Loads every `*.json` schema file in `dir`, in file name order.
    ///
    /// Returns the number of schemas loaded. A missing directory loads nothing.
    /// Any unreadable, malformed or duplicate schema aborts the load.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        Ok(paths.len())
    }

    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let schema: CollectionSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        // File name must agree with the collection it describes
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != schema.collection {
            return Err(SchemaError::malformed_schema(
                path.display().to_string(),
                format!("file describes collection '{}'", schema.collection),
            ));
        }

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        if self.schemas.contains_key(&schema.collection) {
            return Err(SchemaError::schema_immutable(&schema.collection));
        }

        self.schemas.insert(schema.collection.clone(), schema);
        Ok(())
    }

    /// Writes a registered schema to `<dir>/<collection>.json`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn save_schema(&self, dir: &Path, collection: &str) -> SchemaResult<PathBuf> {
        let schema = self.get_validator(collection)?;
        let path = dir.join(format!("{}.json", schema.collection));

        if path.exists() {
            return Err(SchemaError::schema_immutable(&schema.collection));
        }

        fs::create_dir_all(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Failed to serialize schema: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}
