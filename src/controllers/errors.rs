//! Controller error types

use thiserror::Error;

use crate::dao::DaoError;
use crate::models::ModelError;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Input rejected before any DAO call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// DAO failure, propagated unchanged
    #[error(transparent)]
    Dao(#[from] DaoError),

    /// Stored document does not fit the model
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ControllerError {
    pub fn code(&self) -> &'static str {
        match self {
            ControllerError::InvalidArgument(_) => "EDU_INVALID_ARGUMENT",
            ControllerError::Dao(err) => err.code(),
            ControllerError::Model(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_dao_error_is_transparent() {
        let dao_err = DaoError::Store(StoreError::Connection("down".into()));
        let err = ControllerError::from(dao_err.clone());

        assert_eq!(err.to_string(), dao_err.to_string());
        assert_eq!(err.code(), dao_err.code());
    }

    #[test]
    fn test_invalid_argument_code_matches_dao() {
        let err = ControllerError::InvalidArgument("x".into());
        assert_eq!(err.code(), DaoError::InvalidArgument("x".into()).code());
    }
}
