//! Data access object bound to one collection
//!
//! The DAO holds no state besides its collection handle: every call is a
//! round trip to the store. It never validates documents itself, the
//! collection's validator does, and it never retries.

use serde_json::Value;

use super::errors::{DaoError, DaoResult};
use super::provision::provision;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ValidatorRegistry, ID_FIELD};
use crate::store::{Collection, Database, Document, DocumentId, StoreClient};

/// Operations a controller needs from a collection.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentDao {
    /// Stores `data`, returning it with the store-assigned `_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `data` already carries `_id`
    /// - `SchemaValidation` if the collection validator rejects `data`
    /// - `UniquenessViolation` if a unique field repeats an existing value
    /// - `Store` for anything else the store reports
    fn create(&self, data: Document) -> DaoResult<Document>;

    /// Every document whose fields equal those of `filter`, in insertion order.
    ///
    /// No match is an empty `Vec`, never an error.
    fn find(&self, filter: &Document) -> DaoResult<Vec<Document>>;

    /// The document with the given `_id`, if any
    fn find_one(&self, id: &str) -> DaoResult<Option<Document>>;

    /// Removes the document with the given `_id`; false if there was none
    fn delete(&self, id: &str) -> DaoResult<bool>;
}

/// DAO over one named collection
#[derive(Debug, Clone)]
pub struct Dao {
    collection: Collection,
}

impl Dao {
    /// Binds a DAO to `collection_name` in the client's default database,
    /// provisioning the collection from `registry` if it does not exist yet.
    pub fn new(client: &StoreClient, registry: &ValidatorRegistry, collection_name: &str) -> DaoResult<Self> {
        Self::in_database(&client.default_database(), registry, collection_name)
    }

    /// Binds a DAO to `collection_name` in a specific database.
    ///
    /// # Errors
    ///
    /// `Provisioning` if the collection is missing and `registry` has no
    /// validator for it.
    pub fn in_database(
        database: &Database,
        registry: &ValidatorRegistry,
        collection_name: &str,
    ) -> DaoResult<Self> {
        provision(database, registry, collection_name)?;
        Ok(Self {
            collection: database.collection(collection_name),
        })
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Removes every document, keeping the collection, its validator and its
    /// unique keys. Idempotent.
    pub fn drop(&self) -> DaoResult<()> {
        let removed = self.collection.delete_many(&Document::new())?;
        log_event_with_fields(
            Event::DaoDrop,
            &[
                ("collection", self.collection.name()),
                ("removed", &removed.to_string()),
            ],
        );
        Ok(())
    }

    /// Number of documents in the collection
    pub fn count(&self) -> DaoResult<usize> {
        Ok(self.collection.count_documents()?)
    }

    fn check_id(id: &str) -> DaoResult<()> {
        id.parse::<DocumentId>()
            .map(|_| ())
            .map_err(DaoError::InvalidArgument)
    }
}

impl DocumentDao for Dao {
    fn create(&self, data: Document) -> DaoResult<Document> {
        if data.contains_key(ID_FIELD) {
            return Err(DaoError::InvalidArgument(format!(
                "'{}' is assigned by the store and must not be supplied",
                ID_FIELD
            )));
        }

        match self.collection.insert_one(data) {
            Ok(stored) => {
                let id = stored.get(ID_FIELD).and_then(Value::as_str).unwrap_or_default();
                log_event_with_fields(
                    Event::DaoCreate,
                    &[("collection", self.collection.name()), ("id", id)],
                );
                Ok(stored)
            }
            Err(store_err) => {
                let err = DaoError::from(store_err);
                log_event_with_fields(
                    Event::DaoCreateRejected,
                    &[
                        ("code", err.code()),
                        ("collection", self.collection.name()),
                        ("reason", &err.to_string()),
                    ],
                );
                Err(err)
            }
        }
    }

    fn find(&self, filter: &Document) -> DaoResult<Vec<Document>> {
        Ok(self.collection.find(filter)?)
    }

    fn find_one(&self, id: &str) -> DaoResult<Option<Document>> {
        Self::check_id(id)?;
        Ok(self.collection.find_by_id(id)?)
    }

    fn delete(&self, id: &str) -> DaoResult<bool> {
        Self::check_id(id)?;
        Ok(self.collection.delete_by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn user_dao() -> Dao {
        let client = StoreClient::connect("memory://edutask").unwrap();
        Dao::new(&client, &ValidatorRegistry::with_builtins(), "user").unwrap()
    }

    #[test]
    fn test_create_returns_input_plus_id() {
        let dao = user_dao();
        let input = doc(json!({"firstName": "abdi", "lastName": "majid", "email": "test@test.com"}));

        let mut result = dao.create(input.clone()).unwrap();
        let id = result.remove("_id").unwrap();
        assert!(id.as_str().is_some());
        assert_eq!(result, input);
    }

    #[test]
    fn test_create_with_id_is_invalid_argument() {
        let dao = user_dao();
        let err = dao
            .create(doc(json!({"_id": "x", "firstName": "a", "lastName": "b", "email": "a@b.se"})))
            .unwrap_err();

        assert_eq!(err.code(), "EDU_INVALID_ARGUMENT");
        assert_eq!(dao.count().unwrap(), 0);
    }

    #[test]
    fn test_find_one_and_delete() {
        let dao = user_dao();
        let created = dao
            .create(doc(json!({"firstName": "a", "lastName": "b", "email": "a@b.se"})))
            .unwrap();
        let id = created["_id"].as_str().unwrap();

        assert_eq!(dao.find_one(id).unwrap(), Some(created.clone()));
        assert!(dao.delete(id).unwrap());
        assert_eq!(dao.find_one(id).unwrap(), None);
        assert!(!dao.delete(id).unwrap());
    }

    #[test]
    fn test_malformed_id_is_invalid_argument() {
        let dao = user_dao();
        assert_eq!(dao.find_one("not-an-id").unwrap_err().code(), "EDU_INVALID_ARGUMENT");
        assert_eq!(dao.delete("not-an-id").unwrap_err().code(), "EDU_INVALID_ARGUMENT");
    }

    #[test]
    fn test_drop_keeps_validator() {
        let dao = user_dao();
        dao.create(doc(json!({"firstName": "a", "lastName": "b", "email": "a@b.se"})))
            .unwrap();

        dao.drop().unwrap();
        dao.drop().unwrap();
        assert_eq!(dao.count().unwrap(), 0);

        let err = dao.create(doc(json!({"firstName": "a"}))).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_new_attaches_validator_to_fresh_collection() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let dao = Dao::new(&client, &ValidatorRegistry::with_builtins(), "user").unwrap();

        let err = dao.create(doc(json!({"firstName": "abdi"}))).unwrap_err();
        assert!(err.is_schema_violation());
        assert_eq!(dao.count().unwrap(), 0);
    }

    #[test]
    fn test_new_without_schema_fails() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let err = Dao::new(&client, &ValidatorRegistry::new(), "user").unwrap_err();

        assert_eq!(err.code(), "EDU_PROVISIONING_FAILED");
        assert!(!client.default_database().has_collection("user").unwrap());
    }

    #[test]
    fn test_collection_name() {
        assert_eq!(user_dao().collection_name(), "user");
    }
}
