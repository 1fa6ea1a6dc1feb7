//! User-specific domain logic: the account transition table and user errors.

pub mod entity;
pub mod error;

pub use error::*;
