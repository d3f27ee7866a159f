//! Schema error types
//!
//! Error codes:
//! - EDU_UNKNOWN_SCHEMA (REJECT)
//! - EDU_SCHEMA_VALIDATION_FAILED (REJECT)
//! - EDU_SCHEMA_IMMUTABLE (REJECT)
//! - EDU_MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
    /// Schema definitions are unusable, provisioning must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// No validator registered for the collection
    EduUnknownSchema,
    /// Document violates the collection schema
    EduSchemaValidationFailed,
    /// Attempt to redefine a registered collection schema
    EduSchemaImmutable,
    /// Schema definition cannot be read or is structurally invalid
    EduMalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::EduUnknownSchema => "EDU_UNKNOWN_SCHEMA",
            SchemaErrorCode::EduSchemaValidationFailed => "EDU_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::EduSchemaImmutable => "EDU_SCHEMA_IMMUTABLE",
            SchemaErrorCode::EduMalformedSchema => "EDU_MALFORMED_SCHEMA",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::EduMalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "address.city", "tasks[1]")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn pattern_mismatch(field: impl Into<String>, pattern: &str, actual: &str) -> Self {
        Self::new(field, format!("string matching /{}/", pattern), format!("'{}'", actual))
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    collection: Option<String>,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create an unknown schema error
    pub fn unknown_schema(collection: impl Into<String>) -> Self {
        let name = collection.into();
        Self {
            code: SchemaErrorCode::EduUnknownSchema,
            message: format!("No validator registered for collection '{}'", name),
            collection: Some(name),
            details: None,
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(collection: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::EduSchemaValidationFailed,
            message: format!("Document failed validation: {}", details),
            collection: Some(collection.into()),
            details: Some(details),
        }
    }

    /// Create a schema immutable error
    pub fn schema_immutable(collection: impl Into<String>) -> Self {
        let name = collection.into();
        Self {
            code: SchemaErrorCode::EduSchemaImmutable,
            message: format!("Validator for collection '{}' is already registered", name),
            collection: Some(name),
            details: None,
        }
    }

    /// Create an error for a malformed schema definition
    pub fn malformed_schema(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::EduMalformedSchema,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
            collection: None,
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the collection name if applicable
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::EduUnknownSchema.code(), "EDU_UNKNOWN_SCHEMA");
        assert_eq!(
            SchemaErrorCode::EduSchemaValidationFailed.code(),
            "EDU_SCHEMA_VALIDATION_FAILED"
        );
        assert_eq!(SchemaErrorCode::EduSchemaImmutable.code(), "EDU_SCHEMA_IMMUTABLE");
        assert_eq!(SchemaErrorCode::EduMalformedSchema.code(), "EDU_MALFORMED_SCHEMA");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::EduUnknownSchema.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::EduSchemaValidationFailed.severity(), Severity::Reject);
        assert!(SchemaError::malformed_schema("user.json", "bad").is_fatal());
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("firstName", "string", "int");
        let display = format!("{}", details);
        assert!(display.contains("firstName"));
        assert!(display.contains("string"));
        assert!(display.contains("int"));
    }

    #[test]
    fn test_validation_error_carries_collection() {
        let err = SchemaError::validation_failed("user", ValidationDetails::missing_field("email"));
        assert_eq!(err.collection(), Some("user"));
        assert!(format!("{}", err).contains("EDU_SCHEMA_VALIDATION_FAILED"));
        assert!(err.message().contains("email"));
    }
}
