//! Store client, database and collection handles
//!
//! A [`StoreClient`] is created once from a connection string and handed to
//! whoever needs it. Clones share the same deployment. Each `connect` opens a
//! private in-process deployment.
//!
//! Every operation takes the shared lock for its whole duration, so
//! constraint checks and the write they guard are one atomic step. After
//! [`StoreClient::close`] every handle fails with `StoreError::Connection`.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

use super::collection::CollectionData;
use super::errors::{StoreError, StoreResult};
use super::uri::StoreUri;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{CollectionSchema, SchemaValidator};

#[derive(Debug, Default)]
struct StoreState {
    closed: bool,
    /// database -> collection -> data
    databases: BTreeMap<String, BTreeMap<String, CollectionData>>,
}

/// Handle to one store deployment
#[derive(Debug, Clone)]
pub struct StoreClient {
    uri: StoreUri,
    state: Arc<RwLock<StoreState>>,
}

impl StoreClient {
    /// Connects using a connection string such as `memory://edutask`.
    pub fn connect(connection_string: &str) -> StoreResult<Self> {
        let uri: StoreUri = connection_string.parse()?;
        let client = Self {
            uri,
            state: Arc::new(RwLock::new(StoreState::default())),
        };

        log_event_with_fields(Event::StoreConnected, &[("uri", &client.uri.to_string())]);
        Ok(client)
    }

    pub fn uri(&self) -> &StoreUri {
        &self.uri
    }

    /// Database named by the connection string
    pub fn default_database(&self) -> Database {
        self.database(self.uri.database())
    }

    /// Handle to a database. Databases exist once a collection is created in them.
    pub fn database(&self, name: &str) -> Database {
        Database {
            client: self.clone(),
            name: name.to_string(),
        }
    }

    pub fn list_database_names(&self) -> StoreResult<Vec<String>> {
        self.read(|state| Ok(state.databases.keys().cloned().collect()))
    }

    /// Drops a database and all its collections. Dropping a missing database is a no-op.
    pub fn drop_database(&self, name: &str) -> StoreResult<()> {
        self.write(|state| {
            state.databases.remove(name);
            Ok(())
        })
    }

    /// Closes the client. Every handle derived from it stops working.
    pub fn close(&self) {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !state.closed {
            state.closed = true;
            state.databases.clear();
            log_event_with_fields(Event::StoreClosed, &[("uri", &self.uri.to_string())]);
        }
    }

    pub fn is_closed(&self) -> bool {
        match self.state.read() {
            Ok(state) => state.closed,
            Err(_) => true,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&StoreState) -> StoreResult<R>) -> StoreResult<R> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        if state.closed {
            return Err(self.closed_error());
        }
        f(&state)
    }

    fn write<R>(&self, f: impl FnOnce(&mut StoreState) -> StoreResult<R>) -> StoreResult<R> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        if state.closed {
            return Err(self.closed_error());
        }
        f(&mut state)
    }

    fn closed_error(&self) -> StoreError {
        StoreError::Connection(format!("client for {} is closed", self.uri))
    }
}

/// Handle to a named database
#[derive(Debug, Clone)]
pub struct Database {
    client: StoreClient,
    name: String,
}

impl Database {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a collection, attaching `validator` and its unique keys.
    ///
    /// Fails with `CollectionExists` if the collection is already there.
    pub fn create_collection(
        &self,
        name: &str,
        validator: Option<CollectionSchema>,
    ) -> StoreResult<Collection> {
        let validator = validator
            .map(SchemaValidator::new)
            .transpose()
            .map_err(StoreError::InvalidValidator)?;

        self.client.write(|state| {
            let collections = state.databases.entry(self.name.clone()).or_default();
            if collections.contains_key(name) {
                return Err(StoreError::CollectionExists(name.to_string()));
            }
            collections.insert(name.to_string(), CollectionData::new(name, validator));
            Ok(())
        })?;

        log_event_with_fields(
            Event::CollectionCreated,
            &[("collection", name), ("database", &self.name)],
        );
        Ok(self.collection(name))
    }

    /// Drops a collection. Returns false if it did not exist.
    pub fn drop_collection(&self, name: &str) -> StoreResult<bool> {
        let dropped = self.client.write(|state| {
            Ok(state
                .databases
                .get_mut(&self.name)
                .map_or(false, |collections| collections.remove(name).is_some()))
        })?;

        if dropped {
            log_event_with_fields(
                Event::CollectionDropped,
                &[("collection", name), ("database", &self.name)],
            );
        }
        Ok(dropped)
    }

    /// Collection names in sorted order
    pub fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.client.read(|state| {
            Ok(state
                .databases
                .get(&self.name)
                .map(|collections| collections.keys().cloned().collect())
                .unwrap_or_default())
        })
    }

    pub fn has_collection(&self, name: &str) -> StoreResult<bool> {
        self.client.read(|state| {
            Ok(state
                .databases
                .get(&self.name)
                .map_or(false, |collections| collections.contains_key(name)))
        })
    }

    /// Handle to a collection. A missing collection reads as empty and is
    /// created without a validator on first insert.
    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            database: self.clone(),
            name: name.to_string(),
        }
    }
}

/// Handle to a named collection
#[derive(Debug, Clone)]
pub struct Collection {
    database: Database,
    name: String,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database_name(&self) -> &str {
        &self.database.name
    }

    fn with_data<R>(&self, f: impl FnOnce(Option<&CollectionData>) -> R) -> StoreResult<R> {
        self.database.client.read(|state| {
            Ok(f(state
                .databases
                .get(&self.database.name)
                .and_then(|collections| collections.get(&self.name))))
        })
    }

    fn with_data_mut<R>(&self, f: impl FnOnce(&mut CollectionData) -> StoreResult<R>) -> StoreResult<R> {
        self.database.client.write(|state| {
            let data = state
                .databases
                .entry(self.database.name.clone())
                .or_default()
                .entry(self.name.clone())
                .or_insert_with(|| CollectionData::new(self.name.clone(), None));
            f(data)
        })
    }

    /// Inserts one document; returns it with the assigned `_id`.
    pub fn insert_one(&self, document: Map<String, Value>) -> StoreResult<Map<String, Value>> {
        self.with_data_mut(|data| data.insert(document))
    }

    /// Every document matching the equality filter, in insertion order
    pub fn find(&self, filter: &Map<String, Value>) -> StoreResult<Vec<Map<String, Value>>> {
        self.with_data(|data| data.map(|d| d.find(filter)).unwrap_or_default())
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Map<String, Value>>> {
        self.with_data(|data| data.and_then(|d| d.find_by_id(id)))
    }

    /// Removes every matching document; returns the number removed
    pub fn delete_many(&self, filter: &Map<String, Value>) -> StoreResult<usize> {
        self.database.client.write(|state| {
            Ok(state
                .databases
                .get_mut(&self.database.name)
                .and_then(|collections| collections.get_mut(&self.name))
                .map_or(0, |data| data.delete_many(filter)))
        })
    }

    pub fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        self.database.client.write(|state| {
            Ok(state
                .databases
                .get_mut(&self.database.name)
                .and_then(|collections| collections.get_mut(&self.name))
                .map_or(false, |data| data.delete_by_id(id)))
        })
    }

    pub fn count_documents(&self) -> StoreResult<usize> {
        self.with_data(|data| data.map_or(0, CollectionData::len))
    }

    /// Enforces uniqueness of `field` from now on
    pub fn create_unique_index(&self, field: &str) -> StoreResult<()> {
        self.with_data_mut(|data| data.add_unique_key(field))
    }

    /// Validator attached to the collection, if any
    pub fn validator(&self) -> StoreResult<Option<CollectionSchema>> {
        self.with_data(|data| data.and_then(|d| d.validator().map(|v| v.schema().clone())))
    }

    /// Fields whose values must not repeat, in sorted order
    pub fn unique_keys(&self) -> StoreResult<Vec<String>> {
        self.with_data(|data| {
            data.map(|d| d.unique_keys().map(str::to_string).collect())
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin_schema;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_connect_rejects_bad_uri() {
        let err = StoreClient::connect("postgres://localhost").unwrap_err();
        assert_eq!(err.code(), "EDU_STORE_INVALID_URI");
    }

    #[test]
    fn test_create_and_list_collections() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        assert_eq!(db.name(), "edutask");

        db.create_collection("user", builtin_schema("user")).unwrap();
        db.create_collection("todo", builtin_schema("todo")).unwrap();

        assert_eq!(db.list_collection_names().unwrap(), vec!["todo", "user"]);
        assert!(db.has_collection("user").unwrap());
        assert_eq!(client.list_database_names().unwrap(), vec!["edutask"]);
    }

    #[test]
    fn test_create_collection_twice_fails() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        db.create_collection("user", None).unwrap();

        let err = db.create_collection("user", None).unwrap_err();
        assert_eq!(err, StoreError::CollectionExists("user".into()));
    }

    #[test]
    fn test_validator_and_unique_keys_attached() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let users = client
            .default_database()
            .create_collection("user", builtin_schema("user"))
            .unwrap();

        assert_eq!(users.validator().unwrap(), builtin_schema("user"));
        assert_eq!(users.unique_keys().unwrap(), vec!["email"]);
    }

    #[test]
    fn test_missing_collection_reads_empty() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let ghosts = client.default_database().collection("ghosts");

        assert!(ghosts.find(&Map::new()).unwrap().is_empty());
        assert_eq!(ghosts.count_documents().unwrap(), 0);
        assert_eq!(ghosts.delete_many(&Map::new()).unwrap(), 0);
        assert_eq!(ghosts.validator().unwrap(), None);
    }

    #[test]
    fn test_implicit_collection_on_insert() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        let notes = db.collection("notes");

        notes.insert_one(obj(json!({"text": "hello"}))).unwrap();
        assert!(db.has_collection("notes").unwrap());
        assert_eq!(notes.count_documents().unwrap(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let other = client.clone();

        client
            .default_database()
            .collection("notes")
            .insert_one(obj(json!({"text": "hello"})))
            .unwrap();

        let found = other.default_database().collection("notes").find(&Map::new()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_drop_collection_and_database() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let db = client.default_database();
        db.create_collection("user", None).unwrap();

        assert!(db.drop_collection("user").unwrap());
        assert!(!db.drop_collection("user").unwrap());

        db.create_collection("user", None).unwrap();
        client.drop_database("edutask").unwrap();
        assert!(db.list_collection_names().unwrap().is_empty());
        client.drop_database("edutask").unwrap();
    }

    #[test]
    fn test_closed_client_refuses_everything() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let users = client.default_database().collection("user");
        client.close();
        client.close();

        assert!(client.is_closed());
        let err = users.find(&Map::new()).unwrap_err();
        assert_eq!(err.code(), "EDU_STORE_CONNECTION");
        assert!(users.insert_one(obj(json!({"a": 1}))).is_err());
        assert!(client.list_database_names().is_err());
    }

    #[test]
    fn test_malformed_validator_refused() {
        let client = StoreClient::connect("memory://edutask").unwrap();
        let schema = CollectionSchema::new("broken", Default::default()).with_unique("nope");

        let err = client
            .default_database()
            .create_collection("broken", Some(schema))
            .unwrap_err();
        assert_eq!(err.code(), "EDU_STORE_INVALID_VALIDATOR");
        assert!(!client.default_database().has_collection("broken").unwrap());
    }
}
