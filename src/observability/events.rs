//! Observable events for the edutask data layer
//!
//! Events are explicit and typed. Every log line names exactly one event.

use std::fmt;

use super::logger::Severity;

/// Observable events emitted by the store, the DAO and the controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Schema files loaded into the registry
    SchemasLoaded,

    // Store lifecycle
    /// Store client connected
    StoreConnected,
    /// Store client closed
    StoreClosed,
    /// Collection created with its validator
    CollectionCreated,
    /// Collection dropped from its database
    CollectionDropped,

    // DAO operations
    /// Document accepted by the store
    DaoCreate,
    /// Document rejected by the store
    DaoCreateRejected,
    /// All documents removed from a collection
    DaoDrop,

    // Controllers
    /// Email lookup matched more than one user
    UserLookupAmbiguous,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",

            Event::StoreConnected => "STORE_CONNECTED",
            Event::StoreClosed => "STORE_CLOSED",
            Event::CollectionCreated => "COLLECTION_CREATED",
            Event::CollectionDropped => "COLLECTION_DROPPED",

            Event::DaoCreate => "DAO_CREATE",
            Event::DaoCreateRejected => "DAO_CREATE_REJECTED",
            Event::DaoDrop => "DAO_DROP",

            Event::UserLookupAmbiguous => "USER_LOOKUP_AMBIGUOUS",
        }
    }

    /// Default severity an event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DaoCreate | Event::DaoDrop => Severity::Trace,
            Event::DaoCreateRejected | Event::UserLookupAmbiguous => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::SchemasLoaded,
            Event::StoreConnected,
            Event::StoreClosed,
            Event::CollectionCreated,
            Event::CollectionDropped,
            Event::DaoCreate,
            Event::DaoCreateRejected,
            Event::DaoDrop,
            Event::UserLookupAmbiguous,
        ];

        for event in events {
            let name = event.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_ambiguous_lookup_is_a_warning() {
        assert_eq!(Event::UserLookupAmbiguous.severity(), Severity::Warn);
        assert_eq!(Event::DaoCreate.severity(), Severity::Trace);
    }
}
