//! Typed clients for the directory store actors.

#[macro_use]
mod macros;

pub mod user_client;
pub mod vendor_client;

pub use user_client::*;
pub use vendor_client::*;
