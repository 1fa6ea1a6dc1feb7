use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{RecordId, StatusAction};

/// Errors that can occur during vendor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VendorError {
    #[error("Vendor not found: {0}")]
    NotFound(RecordId),
    #[error("Vendor in status {from} cannot {action}")]
    InvalidTransition { from: String, action: StatusAction },
    #[error("Vendor validation error: {0}")]
    ValidationError(String),
    #[error("Vendor already exists: {0}")]
    AlreadyExists(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for VendorError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => VendorError::NotFound(id),
            FrameworkError::InvalidTransition { from, action, .. } => {
                VendorError::InvalidTransition { from, action }
            }
            FrameworkError::Validation(msg) => VendorError::ValidationError(msg),
            FrameworkError::Conflict(msg) => VendorError::AlreadyExists(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                VendorError::ActorCommunicationError(err.to_string())
            }
        }
    }
}
