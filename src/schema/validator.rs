//! Document validation against a collection schema
//!
//! A document is accepted only if:
//! - All required fields are present
//! - No undeclared fields exist (unless the schema allows them)
//! - Field types exactly match schema types, no coercion
//! - No value is null
//! - Every patterned string fully matches its pattern
//!
//! `_id` is always permitted at the top level. Validation never mutates the
//! document and is deterministic: fields are checked in name order and the
//! first violation is reported.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{CollectionSchema, FieldDef, FieldType, ID_FIELD};

/// Validator bound to one collection schema, with its patterns compiled.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: CollectionSchema,
    patterns: HashMap<String, Regex>,
}

impl SchemaValidator {
    /// Compiles a validator for `schema`.
    ///
    /// Fails with EDU_MALFORMED_SCHEMA if the schema structure is invalid.
    pub fn new(schema: CollectionSchema) -> SchemaResult<Self> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(&schema.collection, e))?;

        let mut patterns = HashMap::new();
        collect_patterns(&schema.fields, &mut patterns)
            .map_err(|e| SchemaError::malformed_schema(&schema.collection, e))?;

        Ok(Self { schema, patterns })
    }

    /// Returns the schema this validator enforces
    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Validates a document against the schema.
    ///
    /// # Errors
    ///
    /// Returns EDU_SCHEMA_VALIDATION_FAILED with the first violation found.
    pub fn validate_document(&self, document: &Value) -> SchemaResult<()> {
        let doc_obj = document.as_object().ok_or_else(|| {
            SchemaError::validation_failed(
                &self.schema.collection,
                ValidationDetails::type_mismatch("$root", "object", json_type_name(document)),
            )
        })?;

        self.validate_map(doc_obj)
    }

    /// Validates a top-level field map against the schema.
    pub fn validate_map(&self, document: &Map<String, Value>) -> SchemaResult<()> {
        self.validate_object(document, &self.schema.fields, "", self.schema.additional_properties)
    }

    fn fail(&self, details: ValidationDetails) -> SchemaError {
        SchemaError::validation_failed(&self.schema.collection, details)
    }

    fn validate_object(
        &self,
        obj: &Map<String, Value>,
        fields: &BTreeMap<String, FieldDef>,
        path_prefix: &str,
        allow_extra: bool,
    ) -> SchemaResult<()> {
        if !allow_extra {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if path_prefix.is_empty() && key == ID_FIELD {
                    continue;
                }
                if !fields.contains_key(key) {
                    return Err(self.fail(ValidationDetails::extra_field(make_path(path_prefix, key))));
                }
            }
        }

        for (field_name, field_def) in fields {
            let field_path = make_path(path_prefix, field_name);

            match obj.get(field_name) {
                Some(Value::Null) => {
                    return Err(self.fail(ValidationDetails::null_value(field_path)));
                }
                Some(value) => {
                    self.validate_value(
                        value,
                        &field_def.field_type,
                        field_def.pattern.as_deref(),
                        &field_path,
                    )?;
                }
                None if field_def.required => {
                    return Err(self.fail(ValidationDetails::missing_field(field_path)));
                }
                None => {}
            }
        }

        Ok(())
    }

    fn validate_value(
        &self,
        value: &Value,
        expected_type: &FieldType,
        pattern: Option<&str>,
        field_path: &str,
    ) -> SchemaResult<()> {
        match expected_type {
            FieldType::String => {
                let s = value
                    .as_str()
                    .ok_or_else(|| self.type_error(field_path, "string", value))?;
                if let Some(pattern) = pattern {
                    let matched = self
                        .patterns
                        .get(pattern)
                        .map_or(false, |re| re.is_match(s));
                    if !matched {
                        return Err(self.fail(ValidationDetails::pattern_mismatch(field_path, pattern, s)));
                    }
                }
            }
            FieldType::Int => {
                if !value.is_i64() && !value.is_u64() {
                    return Err(self.type_error(field_path, "int", value));
                }
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    return Err(self.type_error(field_path, "bool", value));
                }
            }
            FieldType::Float => {
                // Integers are acceptable floats
                if !value.is_number() {
                    return Err(self.type_error(field_path, "float", value));
                }
            }
            FieldType::Object { fields } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| self.type_error(field_path, "object", value))?;
                self.validate_object(obj, fields, field_path, false)?;
            }
            FieldType::Array { element_type } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| self.type_error(field_path, "array", value))?;

                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}[{}]", field_path, i);

                    if elem.is_null() {
                        return Err(self.fail(ValidationDetails::null_value(elem_path)));
                    }

                    // Array elements carry a type only, never a pattern
                    self.validate_value(elem, element_type, None, &elem_path)?;
                }
            }
        }

        Ok(())
    }

    fn type_error(&self, field_path: &str, expected: &str, actual: &Value) -> SchemaError {
        self.fail(ValidationDetails::type_mismatch(
            field_path,
            expected,
            json_type_name(actual),
        ))
    }
}

fn collect_patterns(
    fields: &BTreeMap<String, FieldDef>,
    out: &mut HashMap<String, Regex>,
) -> Result<(), String> {
    for def in fields.values() {
        if let Some(pattern) = &def.pattern {
            if !out.contains_key(pattern) {
                let anchored = format!("^(?:{})$", pattern);
                let re = Regex::new(&anchored).map_err(|e| e.to_string())?;
                out.insert(pattern.clone(), re);
            }
        }
        if let FieldType::Object { fields } = &def.field_type {
            collect_patterns(fields, out)?;
        }
    }
    Ok(())
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
