//! Collection provisioning from the validator registry
//!
//! Provisioning is the only place a validator is attached. The DAO itself
//! stays schema-agnostic.

use super::errors::{DaoError, DaoResult};
use crate::schema::ValidatorRegistry;
use crate::store::Database;

/// Creates `collection` with the registry's validator if it does not exist.
///
/// Returns true if the collection was created, false if it was already there.
/// A missing collection the registry does not know is an error: it is never
/// created without a validator.
pub fn provision(database: &Database, registry: &ValidatorRegistry, collection: &str) -> DaoResult<bool> {
    if database.has_collection(collection)? {
        return Ok(false);
    }

    let schema = registry
        .get_validator(collection)
        .map_err(DaoError::Provisioning)?;
    database.create_collection(collection, Some(schema.clone()))?;
    Ok(true)
}

/// Provisions every collection the registry knows about.
///
/// Returns the names of the collections that were created.
pub fn provision_all(database: &Database, registry: &ValidatorRegistry) -> DaoResult<Vec<String>> {
    let mut created = Vec::new();
    for name in registry.collection_names() {
        if provision(database, registry, name)? {
            created.push(name.to_string());
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreClient;

    #[test]
    fn test_provision_attaches_validator() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        let registry = ValidatorRegistry::with_builtins();

        assert!(provision(&db, &registry, "user").unwrap());
        assert!(!provision(&db, &registry, "user").unwrap());

        let users = db.collection("user");
        assert_eq!(users.validator().unwrap().unwrap().collection, "user");
        assert_eq!(users.unique_keys().unwrap(), vec!["email"]);
    }

    #[test]
    fn test_provision_unknown_collection() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let err = provision(&client.default_database(), &ValidatorRegistry::new(), "user").unwrap_err();
        assert_eq!(err.code(), "EDU_PROVISIONING_FAILED");
        assert!(!client.default_database().has_collection("user").unwrap());
    }

    #[test]
    fn test_existing_collection_needs_no_schema() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        db.create_collection("legacy_users", None).unwrap();

        assert!(!provision(&db, &ValidatorRegistry::new(), "legacy_users").unwrap());
    }

    #[test]
    fn test_provision_all() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        let registry = ValidatorRegistry::with_builtins();

        let created = provision_all(&db, &registry).unwrap();
        assert_eq!(created, vec!["task", "todo", "user", "video"]);
        assert!(provision_all(&db, &registry).unwrap().is_empty());
    }
}
