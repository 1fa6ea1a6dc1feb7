use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{RecordId, StatusAction};

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(RecordId),
    #[error("User in status {from} cannot {action}")]
    InvalidTransition { from: String, action: StatusAction },
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => UserError::NotFound(id),
            FrameworkError::InvalidTransition { from, action, .. } => {
                UserError::InvalidTransition { from, action }
            }
            FrameworkError::Validation(msg) => UserError::ValidationError(msg),
            FrameworkError::Conflict(msg) => UserError::AlreadyExists(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                UserError::ActorCommunicationError(err.to_string())
            }
        }
    }
}
