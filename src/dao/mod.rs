//! Data access objects
//!
//! A [`Dao`] mediates all reads and writes to one named collection. Writes go
//! through the store, which enforces the collection validator and unique
//! keys; the DAO turns the store's rejections into typed errors:
//!
//! | store says | DAO returns |
//! |---|---|
//! | validator rejected the document | `DaoError::SchemaValidation` |
//! | unique key already present | `DaoError::UniquenessViolation` |
//! | anything else | `DaoError::Store` (unchanged) |

mod dao;
mod errors;
mod provision;

#[cfg(test)]
pub use dao::MockDocumentDao;
pub use dao::{Dao, DocumentDao};
pub use errors::{DaoError, DaoResult};
pub use provision::{provision, provision_all};
