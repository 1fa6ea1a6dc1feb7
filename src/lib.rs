//! # Admin Directory
//!
//! Backend for the admin user and vendor lists: a directory store per entity
//! kind, filtered and paginated listing, and status transitions guarded by a
//! legal-transition table.
//!
//! ## Layout
//!
//! - **Domain types** - Records and their closed status sets → [`domain::User`], [`domain::Vendor`]
//! - **Store actors** - One [`actor_framework::ResourceActor`] per kind owns the records;
//!   requests are processed one at a time, so transitions never lose updates
//! - **Clients** - Cloneable handles with per-entity errors → [`clients::UserClient`], [`clients::VendorClient`]
//! - **Facade** - Raw-input entry point with distinguishable error codes → [`directory::DirectoryService`]
//! - **System** - Startup, seeding, configuration and shutdown → [`app_system::DirectorySystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # use admin_directory::app_system::{DirectoryConfig, DirectorySystem};
//! # use admin_directory::domain::EntityKind;
//! # use admin_directory::query::RawListQuery;
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = DirectorySystem::start(&DirectoryConfig::init()?).await?;
//! let service = system.service();
//!
//! let pending = RawListQuery { status: Some("pending".into()), ..Default::default() };
//! let listing = service.list(EntityKind::Vendor, pending).await?;
//! for id in listing.ids() {
//!     service.transition(EntityKind::Vendor, id.get(), "approve").await?;
//! }
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod directory;
pub mod domain;
pub mod query;
pub mod user_actor;
pub mod vendor_actor;

#[cfg(test)]
mod mock_framework;
