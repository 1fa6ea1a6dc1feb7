use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{EntityKind, ParseValueError, RecordId, StatusAction};
use crate::user_actor::UserError;
use crate::vendor_actor::VendorError;

/// Caller-facing error of the directory facade.
///
/// Each variant maps to a stable machine code and an HTTP-style status so a
/// remote adapter can surface the kinds distinguishably.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: RecordId },
    #[error("cannot {action} {kind} in status {from}")]
    InvalidTransition {
        kind: EntityKind,
        from: String,
        action: StatusAction,
    },
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn code(&self) -> &'static str {
        match self {
            DirectoryError::NotFound { .. } => "not_found",
            DirectoryError::InvalidTransition { .. } => "invalid_transition",
            DirectoryError::ValidationError(_) => "validation_error",
            DirectoryError::Conflict(_) => "conflict",
            DirectoryError::Unavailable(_) => "unavailable",
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            DirectoryError::NotFound { .. } => 404,
            DirectoryError::InvalidTransition { .. } | DirectoryError::Conflict(_) => 409,
            DirectoryError::ValidationError(_) => 422,
            DirectoryError::Unavailable(_) => 503,
        }
    }
}

impl From<ParseValueError> for DirectoryError {
    fn from(err: ParseValueError) -> Self {
        DirectoryError::ValidationError(err.to_string())
    }
}

impl From<FrameworkError> for DirectoryError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { kind, id } => DirectoryError::NotFound { kind, id },
            FrameworkError::InvalidTransition { kind, from, action } => {
                DirectoryError::InvalidTransition { kind, from, action }
            }
            FrameworkError::Validation(msg) => DirectoryError::ValidationError(msg),
            FrameworkError::Conflict(msg) => DirectoryError::Conflict(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                DirectoryError::Unavailable(err.to_string())
            }
        }
    }
}

impl From<UserError> for DirectoryError {
    fn from(err: UserError) -> Self {
        let kind = EntityKind::User;
        match err {
            UserError::NotFound(id) => DirectoryError::NotFound { kind, id },
            UserError::InvalidTransition { from, action } => {
                DirectoryError::InvalidTransition { kind, from, action }
            }
            UserError::ValidationError(msg) => DirectoryError::ValidationError(msg),
            UserError::AlreadyExists(msg) => DirectoryError::Conflict(msg),
            UserError::ActorCommunicationError(msg) => DirectoryError::Unavailable(msg),
        }
    }
}

impl From<VendorError> for DirectoryError {
    fn from(err: VendorError) -> Self {
        let kind = EntityKind::Vendor;
        match err {
            VendorError::NotFound(id) => DirectoryError::NotFound { kind, id },
            VendorError::InvalidTransition { from, action } => {
                DirectoryError::InvalidTransition { kind, from, action }
            }
            VendorError::ValidationError(msg) => DirectoryError::ValidationError(msg),
            VendorError::AlreadyExists(msg) => DirectoryError::Conflict(msg),
            VendorError::ActorCommunicationError(msg) => DirectoryError::Unavailable(msg),
        }
    }
}
