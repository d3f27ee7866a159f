//! Equality filtering for `find`
//!
//! A filter is a document: every `field: value` pair must match.
//! No type coercion, no operators, exact JSON equality only.
//! Dotted keys (`address.city`) reach into nested objects.

use serde_json::{Map, Value};

/// Evaluates equality filters against documents
pub struct DocumentFilter;

impl DocumentFilter {
    /// Checks if a document matches every pair of the filter (AND semantics).
    ///
    /// An empty filter matches every document.
    pub fn matches(document: &Map<String, Value>, filter: &Map<String, Value>) -> bool {
        filter
            .iter()
            .all(|(field, expected)| Self::matches_field(document, field, expected))
    }

    fn matches_field(document: &Map<String, Value>, field: &str, expected: &Value) -> bool {
        match Self::lookup(document, field) {
            // Missing field = no match
            None => false,
            Some(actual) => actual == expected,
        }
    }

    /// Resolves a possibly dotted field path.
    fn lookup<'a>(document: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
        if let Some(value) = document.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = document.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_equality_match() {
        let doc = obj(json!({"email": "test@test.com", "firstName": "abdi"}));

        assert!(DocumentFilter::matches(&doc, &obj(json!({"email": "test@test.com"}))));
        assert!(!DocumentFilter::matches(&doc, &obj(json!({"email": "other@test.com"}))));
    }

    #[test]
    fn test_all_pairs_must_match() {
        let doc = obj(json!({"firstName": "abdi", "lastName": "majid"}));

        assert!(DocumentFilter::matches(
            &doc,
            &obj(json!({"firstName": "abdi", "lastName": "majid"}))
        ));
        assert!(!DocumentFilter::matches(
            &doc,
            &obj(json!({"firstName": "abdi", "lastName": "svensson"}))
        ));
    }

    #[test]
    fn test_no_type_coercion() {
        let doc = obj(json!({"value": 123}));

        assert!(!DocumentFilter::matches(&doc, &obj(json!({"value": "123"}))));
        assert!(DocumentFilter::matches(&doc, &obj(json!({"value": 123}))));
    }

    #[test]
    fn test_exact_string_match_is_case_sensitive() {
        let doc = obj(json!({"email": "Test@Test.com"}));
        assert!(!DocumentFilter::matches(&doc, &obj(json!({"email": "test@test.com"}))));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let doc = obj(json!({"name": "Alice"}));
        assert!(!DocumentFilter::matches(&doc, &obj(json!({"age": 30}))));
        assert!(!DocumentFilter::matches(&doc, &obj(json!({"age": null}))));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let doc = obj(json!({"name": "Alice"}));
        assert!(DocumentFilter::matches(&doc, &Map::new()));
    }

    #[test]
    fn test_dotted_path() {
        let doc = obj(json!({"address": {"city": "Karlskrona"}}));
        assert!(DocumentFilter::matches(&doc, &obj(json!({"address.city": "Karlskrona"}))));
        assert!(!DocumentFilter::matches(&doc, &obj(json!({"address.zip": "1"}))));
    }
}
