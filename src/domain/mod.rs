//! Directory records and the closed value sets they are built from.

pub mod record;
pub mod user;
pub mod vendor;

pub use record::*;
pub use user::*;
pub use vendor::*;
