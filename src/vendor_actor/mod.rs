//! Vendor-specific domain logic: the approval lifecycle and vendor errors.

pub mod entity;
pub mod error;

pub use error::*;
