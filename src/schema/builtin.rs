//! Built-in validators for the edutask collections

use std::collections::BTreeMap;

use super::types::{CollectionSchema, FieldDef, FieldType};

/// Shape `local@domain.tld`: one `@`, no whitespace, a dot inside the domain
pub const EMAIL_PATTERN: &str = r"[^@\s]+@[^@\s.]+(\.[^@\s.]+)+";

/// Names of the collections with a built-in validator
pub const BUILTIN_COLLECTIONS: [&str; 4] = ["task", "todo", "user", "video"];

/// Returns the built-in validator for `collection`, if there is one
pub fn builtin_schema(collection: &str) -> Option<CollectionSchema> {
    match collection {
        "user" => Some(user_schema()),
        "task" => Some(task_schema()),
        "todo" => Some(todo_schema()),
        "video" => Some(video_schema()),
        _ => None,
    }
}

/// Users: names, a unique email and the ids of their tasks
pub fn user_schema() -> CollectionSchema {
    let mut fields = BTreeMap::new();
    fields.insert("firstName".into(), FieldDef::required_string());
    fields.insert("lastName".into(), FieldDef::required_string());
    fields.insert(
        "email".into(),
        FieldDef::required_string().with_pattern(EMAIL_PATTERN),
    );
    fields.insert("tasks".into(), FieldDef::optional_array(FieldType::String));

    CollectionSchema::new("user", fields)
        .with_unique("email")
        .with_description("registered users")
}

pub fn task_schema() -> CollectionSchema {
    let mut fields = BTreeMap::new();
    fields.insert("title".into(), FieldDef::required_string());
    fields.insert("description".into(), FieldDef::required_string());
    fields.insert("startdate".into(), FieldDef::optional_string());
    fields.insert("duedate".into(), FieldDef::optional_string());
    fields.insert("requires".into(), FieldDef::optional_array(FieldType::String));
    fields.insert("categories".into(), FieldDef::optional_array(FieldType::String));
    fields.insert("todos".into(), FieldDef::optional_array(FieldType::String));
    fields.insert("video".into(), FieldDef::optional_string());

    CollectionSchema::new("task", fields)
}

pub fn todo_schema() -> CollectionSchema {
    let mut fields = BTreeMap::new();
    fields.insert("description".into(), FieldDef::required_string());
    fields.insert("done".into(), FieldDef::optional_bool());

    CollectionSchema::new("todo", fields)
}

pub fn video_schema() -> CollectionSchema {
    let mut fields = BTreeMap::new();
    fields.insert("url".into(), FieldDef::required_string());

    CollectionSchema::new("video", fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_builtins_are_well_formed() {
        for name in BUILTIN_COLLECTIONS {
            let schema = builtin_schema(name).unwrap();
            assert_eq!(schema.collection, name);
            assert!(schema.validate_structure().is_ok(), "{} is malformed", name);
        }
        assert!(builtin_schema("course").is_none());
    }

    #[test]
    fn test_email_pattern() {
        let re = Regex::new(&format!("^(?:{})$", EMAIL_PATTERN)).unwrap();
        assert!(re.is_match("test@test.com"));
        assert!(re.is_match("first.last@student.bth.se"));
        assert!(!re.is_match("test()test,se"));
        assert!(!re.is_match("invalid"));
        assert!(!re.is_match("@test.com"));
        assert!(!re.is_match("test@com"));
        assert!(!re.is_match("test@test."));
        assert!(!re.is_match("a b@test.com"));
        assert!(!re.is_match("a@b@test.com"));
    }

    #[test]
    fn test_user_email_is_unique() {
        assert_eq!(user_schema().unique, vec!["email".to_string()]);
    }
}
