//! Typed views of stored documents

mod errors;
mod user;

pub use errors::{ModelError, ModelResult};
pub use user::{NewUser, User};
