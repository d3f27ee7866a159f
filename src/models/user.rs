//! User entity
//!
//! Field names on the wire are camelCase (`firstName`, `lastName`) to match
//! the `user` collection schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ModelError, ModelResult};
use crate::store::Document;

/// A user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
}

impl NewUser {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<String>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Document ready for `DocumentDao::create`
    pub fn to_document(&self) -> ModelResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ModelError::new("NewUser", format!("serialized to {}", other))),
            Err(e) => Err(ModelError::new("NewUser", e.to_string())),
        }
    }
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
}

impl User {
    /// Reads a stored user document. Fields outside the model are ignored.
    pub fn from_document(document: Document) -> ModelResult<Self> {
        serde_json::from_value(Value::Object(document)).map_err(|e| ModelError::new("User", e.to_string()))
    }

    pub fn to_document(&self) -> ModelResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ModelError::new("User", format!("serialized to {}", other))),
            Err(e) => Err(ModelError::new("User", e.to_string())),
        }
    }
}

impl TryFrom<Document> for User {
    type Error = ModelError;

    fn try_from(document: Document) -> ModelResult<Self> {
        Self::from_document(document)
    }
}
