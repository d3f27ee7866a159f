//! User controller
//!
//! Lookups go through a [`DocumentDao`] bound to the `user` collection. The
//! controller holds no state of its own.

use std::sync::Arc;

use serde_json::Value;

use super::email::is_valid_email;
use super::errors::{ControllerError, ControllerResult};
use crate::dao::DocumentDao;
use crate::models::{NewUser, User};
use crate::observability::{emit_event_to, Event, LogSink, StdSink};
use crate::store::Document;

pub struct UserController<D> {
    dao: D,
    sink: Arc<dyn LogSink>,
}

impl<D: DocumentDao> UserController<D> {
    /// Warnings go to stdout.
    pub fn new(dao: D) -> Self {
        Self {
            dao,
            sink: Arc::new(StdSink),
        }
    }

    /// Sends warnings to `sink` instead of stdout.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn dao(&self) -> &D {
        &self.dao
    }

    /// Returns the user stored with exactly this email, if any.
    ///
    /// If several users share the email the first stored one is returned and
    /// a `USER_LOOKUP_AMBIGUOUS` warning is written to the sink, whatever the
    /// configured log level.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `email` is not shaped `local@domain.tld`; the DAO
    ///   is not called
    /// - `Dao` with the DAO's error, unchanged
    pub fn get_user_by_email(&self, email: &str) -> ControllerResult<Option<Document>> {
        if !is_valid_email(email) {
            return Err(ControllerError::InvalidArgument(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        let mut filter = Document::new();
        filter.insert("email".to_string(), Value::String(email.to_string()));

        let users = self.dao.find(&filter)?;
        if users.len() > 1 {
            emit_event_to(
                self.sink.as_ref(),
                Event::UserLookupAmbiguous,
                &[
                    ("count", &users.len().to_string()),
                    ("email", email),
                    ("message", &format!("more than one user found with mail {}", email)),
                ],
            );
        }

        Ok(users.into_iter().next())
    }

    /// Stores a new user. The `user` validator decides what is acceptable.
    pub fn create_user(&self, user: &NewUser) -> ControllerResult<User> {
        let stored = self.dao.create(user.to_document()?)?;
        Ok(User::from_document(stored)?)
    }

    pub fn get_user(&self, id: &str) -> ControllerResult<Option<User>> {
        match self.dao.find_one(id)? {
            Some(document) => Ok(Some(User::from_document(document)?)),
            None => Ok(None),
        }
    }
}
