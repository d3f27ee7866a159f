//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, optionally constrained by a regex pattern
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - float: 64-bit floating point
//! - object: Nested object with field schema
//! - array: Homogeneous array with element type

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Field name reserved for the store-assigned document identifier
pub const ID_FIELD: &str = "_id";

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Nested object with its own field schema
    Object {
        /// Nested field definitions
        fields: BTreeMap<String, FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    #[serde(default)]
    pub required: bool,
    /// Regex a string value must fully match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldDef {
    fn of(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            required,
            pattern: None,
        }
    }

    pub fn required_string() -> Self {
        Self::of(FieldType::String, true)
    }

    pub fn optional_string() -> Self {
        Self::of(FieldType::String, false)
    }

    pub fn required_int() -> Self {
        Self::of(FieldType::Int, true)
    }

    pub fn optional_int() -> Self {
        Self::of(FieldType::Int, false)
    }

    pub fn required_bool() -> Self {
        Self::of(FieldType::Bool, true)
    }

    pub fn optional_bool() -> Self {
        Self::of(FieldType::Bool, false)
    }

    pub fn required_float() -> Self {
        Self::of(FieldType::Float, true)
    }

    pub fn required_object(fields: BTreeMap<String, FieldDef>) -> Self {
        Self::of(FieldType::Object { fields }, true)
    }

    pub fn optional_object(fields: BTreeMap<String, FieldDef>) -> Self {
        Self::of(FieldType::Object { fields }, false)
    }

    pub fn required_array(element_type: FieldType) -> Self {
        Self::of(
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            true,
        )
    }

    pub fn optional_array(element_type: FieldType) -> Self {
        Self::of(
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            false,
        )
    }

    /// Constrains a string field to values fully matching `pattern`
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Validation rule set attached to one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Collection the rule set belongs to
    pub collection: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions
    pub fields: BTreeMap<String, FieldDef>,
    /// Top-level fields whose values must not repeat across the collection
    #[serde(default)]
    pub unique: Vec<String>,
    /// Whether fields not declared in `fields` are accepted
    #[serde(default)]
    pub additional_properties: bool,
}

impl CollectionSchema {
    /// Create a new schema that rejects undeclared fields
    pub fn new(collection: impl Into<String>, fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            collection: collection.into(),
            description: None,
            fields,
            unique: Vec::new(),
            additional_properties: false,
        }
    }

    /// Adds a uniqueness constraint on a top-level field
    pub fn with_unique(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.unique.contains(&field) {
            self.unique.push(field);
        }
        self
    }

    /// Accepts fields the schema does not declare
    pub fn allow_additional_properties(mut self) -> Self {
        self.additional_properties = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names of the required top-level fields
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name.as_str())
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.collection.trim().is_empty() {
            return Err("collection name must not be empty".into());
        }

        // _id is owned by the store
        if self.fields.contains_key(ID_FIELD) {
            return Err(format!("'{}' is assigned by the store and must not be declared", ID_FIELD));
        }

        for field in &self.unique {
            match self.fields.get(field) {
                None => return Err(format!("unique field '{}' is not declared", field)),
                Some(def) if matches!(def.field_type, FieldType::Object { .. } | FieldType::Array { .. }) => {
                    return Err(format!("unique field '{}' must be a scalar", field));
                }
                Some(_) => {}
            }
        }

        validate_fields(&self.fields, "")
    }
}

fn validate_fields(fields: &BTreeMap<String, FieldDef>, prefix: &str) -> Result<(), String> {
    for (name, def) in fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        if name.is_empty() {
            return Err(format!("empty field name under '{}'", prefix));
        }

        if let Some(pattern) = &def.pattern {
            if def.field_type != FieldType::String {
                return Err(format!("pattern on non-string field '{}'", path));
            }
            Regex::new(pattern).map_err(|e| format!("invalid pattern on '{}': {}", path, e))?;
        }

        if let FieldType::Object { fields } = &def.field_type {
            validate_fields(fields, &path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> CollectionSchema {
        let mut fields = BTreeMap::new();
        fields.insert("name".into(), FieldDef::required_string());
        fields.insert("age".into(), FieldDef::optional_int());
        CollectionSchema::new("people", fields)
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_declared_id_rejected() {
        let mut schema = sample_schema();
        schema.fields.insert("_id".into(), FieldDef::required_string());
        assert!(schema.validate_structure().unwrap_err().contains("_id"));
    }

    #[test]
    fn test_unique_field_must_be_declared() {
        let schema = sample_schema().with_unique("email");
        assert!(schema.validate_structure().unwrap_err().contains("email"));
    }

    #[test]
    fn test_unique_field_must_be_scalar() {
        let mut fields = BTreeMap::new();
        fields.insert("tags".into(), FieldDef::required_array(FieldType::String));
        let schema = CollectionSchema::new("posts", fields).with_unique("tags");
        assert!(schema.validate_structure().unwrap_err().contains("scalar"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut fields = BTreeMap::new();
        fields.insert("code".into(), FieldDef::required_string().with_pattern("(unclosed"));
        let schema = CollectionSchema::new("codes", fields);
        assert!(schema.validate_structure().unwrap_err().contains("invalid pattern"));
    }

    #[test]
    fn test_pattern_on_int_rejected() {
        let mut fields = BTreeMap::new();
        fields.insert("n".into(), FieldDef::required_int().with_pattern("[0-9]+"));
        let schema = CollectionSchema::new("numbers", fields);
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_with_unique_is_idempotent() {
        let schema = sample_schema().with_unique("name").with_unique("name");
        assert_eq!(schema.unique, vec!["name".to_string()]);
    }

    #[test]
    fn test_required_fields() {
        let schema = sample_schema();
        let required: Vec<_> = schema.required_fields().collect();
        assert_eq!(required, vec!["name"]);
    }

    #[test]
    fn test_schema_json_shape() {
        let json = r#"{
            "collection": "user",
            "fields": {
                "email": { "type": "string", "required": true, "pattern": ".+@.+" },
                "tasks": { "type": "array", "element_type": { "type": "string" } }
            },
            "unique": ["email"]
        }"#;

        let schema: CollectionSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.collection, "user");
        assert!(!schema.additional_properties);
        assert_eq!(schema.unique, vec!["email".to_string()]);
        assert_eq!(schema.fields["email"].pattern.as_deref(), Some(".+@.+"));
        assert!(!schema.fields["tasks"].required);
        assert_eq!(schema.fields["tasks"].field_type.type_name(), "array");
        assert!(schema.validate_structure().is_ok());
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Bool.type_name(), "bool");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(
            FieldType::Object {
                fields: BTreeMap::new()
            }
            .type_name(),
            "object"
        );
    }
}
