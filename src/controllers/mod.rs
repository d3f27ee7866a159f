//! Controllers over the DAO layer

mod email;
mod errors;
mod user;

pub use email::is_valid_email;
pub use errors::{ControllerError, ControllerResult};
pub use user::UserController;
