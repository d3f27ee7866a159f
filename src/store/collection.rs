//! Collection storage and write-time constraint enforcement
//!
//! Insert order of checks, all before anything is stored:
//! 1. Reject documents that carry `_id`
//! 2. Validate against the attached validator
//! 3. Check every unique key
//! 4. Assign `_id` and append
//!
//! A rejected insert leaves the collection untouched.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::filter::DocumentFilter;
use super::id::DocumentId;
use crate::schema::{SchemaValidator, ID_FIELD};

/// Documents of one collection plus the constraints attached to it
#[derive(Debug, Clone)]
pub(crate) struct CollectionData {
    name: String,
    validator: Option<SchemaValidator>,
    unique_keys: BTreeSet<String>,
    /// Documents in insertion order
    documents: Vec<Map<String, Value>>,
}

impl CollectionData {
    /// Creates an empty collection. Unique keys declared by the validator
    /// are enforced from the start.
    pub(crate) fn new(name: impl Into<String>, validator: Option<SchemaValidator>) -> Self {
        let unique_keys = validator
            .as_ref()
            .map(|v| v.schema().unique.iter().cloned().collect())
            .unwrap_or_default();

        Self {
            name: name.into(),
            validator,
            unique_keys,
            documents: Vec::new(),
        }
    }

    pub(crate) fn validator(&self) -> Option<&SchemaValidator> {
        self.validator.as_ref()
    }

    pub(crate) fn unique_keys(&self) -> impl Iterator<Item = &str> {
        self.unique_keys.iter().map(String::as_str)
    }

    /// Inserts a document, returning the stored copy with its `_id`.
    pub(crate) fn insert(&mut self, mut document: Map<String, Value>) -> StoreResult<Map<String, Value>> {
        if document.contains_key(ID_FIELD) {
            return Err(StoreError::InvalidDocument(format!(
                "'{}' is assigned by the store",
                ID_FIELD
            )));
        }

        if let Some(validator) = &self.validator {
            validator
                .validate_map(&document)
                .map_err(StoreError::WriteRejected)?;
        }

        for key in &self.unique_keys {
            if let Some(value) = document.get(key) {
                if self.documents.iter().any(|doc| doc.get(key) == Some(value)) {
                    return Err(StoreError::DuplicateKey {
                        collection: self.name.clone(),
                        field: key.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        document.insert(
            ID_FIELD.to_string(),
            Value::String(DocumentId::generate().to_hex()),
        );
        self.documents.push(document.clone());
        Ok(document)
    }

    /// Returns copies of every matching document in insertion order
    pub(crate) fn find(&self, filter: &Map<String, Value>) -> Vec<Map<String, Value>> {
        self.documents
            .iter()
            .filter(|doc| DocumentFilter::matches(doc, filter))
            .cloned()
            .collect()
    }

    pub(crate) fn find_by_id(&self, id: &str) -> Option<Map<String, Value>> {
        self.documents
            .iter()
            .find(|doc| doc.get(ID_FIELD).and_then(Value::as_str) == Some(id))
            .cloned()
    }

    /// Removes every matching document, returning how many were removed
    pub(crate) fn delete_many(&mut self, filter: &Map<String, Value>) -> usize {
        let before = self.documents.len();
        self.documents
            .retain(|doc| !DocumentFilter::matches(doc, filter));
        before - self.documents.len()
    }

    pub(crate) fn delete_by_id(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents
            .retain(|doc| doc.get(ID_FIELD).and_then(Value::as_str) != Some(id));
        before != self.documents.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    /// Adds a unique key. Fails if stored documents already repeat a value.
    pub(crate) fn add_unique_key(&mut self, field: &str) -> StoreResult<()> {
        let mut seen: Vec<&Value> = Vec::new();
        for doc in &self.documents {
            if let Some(value) = doc.get(field) {
                if seen.contains(&value) {
                    return Err(StoreError::DuplicateKey {
                        collection: self.name.clone(),
                        field: field.to_string(),
                        value: value.to_string(),
                    });
                }
                seen.push(value);
            }
        }

        self.unique_keys.insert(field.to_string());
        Ok(())
    }
}
