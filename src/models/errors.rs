//! Model conversion errors

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// A document did not have the shape of the model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {model}: {reason}")]
pub struct ModelError {
    model: &'static str,
    reason: String,
}

impl ModelError {
    pub fn new(model: &'static str, reason: impl Into<String>) -> Self {
        Self {
            model,
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        "EDU_MODEL_CONVERSION"
    }

    pub fn model(&self) -> &'static str {
        self.model
    }
}
