//! Observability for the edutask data layer
//!
//! Structured one-line JSON logs with typed events.
//!
//! # Usage
//!
//! ```ignore
//! use edutask::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::CollectionCreated, &[("collection", "user")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{LogSink, Logger, MemorySink, Severity, StdSink};

/// Log a lifecycle event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Write a lifecycle event to a specific sink, ignoring the minimum severity
pub fn emit_event_to(sink: &dyn LogSink, event: Event, fields: &[(&str, &str)]) {
    Logger::write_to(sink, event.severity(), event.as_str(), fields);
}
