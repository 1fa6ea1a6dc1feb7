//! Entity-kind dispatched entry point for the presentation layer.
//!
//! Takes raw inputs (kind, query strings, numeric ids, action names), turns
//! them into typed client calls and reports failures as [`DirectoryError`].

mod error;

pub use error::*;

use serde::Serialize;
use tracing::{info, instrument};

use crate::actor_framework::Entity;
use crate::clients::{UserClient, VendorClient};
use crate::domain::{EntityKind, RecordId, RecordStatus, StatusAction, User, UserStatus, Vendor, VendorStatus};
use crate::query::{Page, PageLimits, RawListQuery, StatusCounts};

/// A listing result for either entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum Listing {
    Users(Page<User>),
    Vendors(Page<Vendor>),
}

impl Listing {
    pub fn total(&self) -> u64 {
        match self {
            Listing::Users(page) => page.total,
            Listing::Vendors(page) => page.total,
        }
    }

    pub fn ids(&self) -> Vec<RecordId> {
        match self {
            Listing::Users(page) => page.items.iter().map(|u| u.id).collect(),
            Listing::Vendors(page) => page.items.iter().map(|v| v.id).collect(),
        }
    }
}

/// A single record of either entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum DirectoryRecord {
    User(User),
    Vendor(Vendor),
}

impl DirectoryRecord {
    pub fn id(&self) -> RecordId {
        match self {
            DirectoryRecord::User(user) => user.id,
            DirectoryRecord::Vendor(vendor) => vendor.id,
        }
    }

    /// Lower-case wire name of the record's status.
    pub fn status(&self) -> &'static str {
        match self {
            DirectoryRecord::User(user) => user.status.as_str(),
            DirectoryRecord::Vendor(vendor) => vendor.status.as_str(),
        }
    }
}

/// Per-status record counts with wire-named statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub kind: EntityKind,
    pub counts: Vec<(&'static str, u64)>,
    pub total: u64,
}

impl StatusSummary {
    fn from_counts<S: RecordStatus>(kind: EntityKind, counts: StatusCounts<S>) -> Self {
        Self {
            kind,
            counts: counts
                .counts
                .iter()
                .map(|c| (c.status.as_str(), c.count))
                .collect(),
            total: counts.total,
        }
    }

    pub fn count(&self, status: &str) -> u64 {
        self.counts
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(status))
            .map_or(0, |(_, count)| *count)
    }
}

/// Query and transition operations over both directory stores.
#[derive(Clone)]
pub struct DirectoryService {
    users: UserClient,
    vendors: VendorClient,
    limits: PageLimits,
}

impl DirectoryService {
    pub fn new(users: UserClient, vendors: VendorClient, limits: PageLimits) -> Self {
        Self {
            users,
            vendors,
            limits,
        }
    }

    /// Lists records of `kind` matching the raw filter, identifier ascending.
    #[instrument(skip(self))]
    pub async fn list(&self, kind: EntityKind, raw: RawListQuery) -> Result<Listing, DirectoryError> {
        let listing = match kind {
            EntityKind::User => {
                let query = raw.into_query::<UserStatus>(&self.limits)?;
                Listing::Users(self.users.list_users(query).await?)
            }
            EntityKind::Vendor => {
                let query = raw.into_query::<VendorStatus>(&self.limits)?;
                Listing::Vendors(self.vendors.list_vendors(query).await?)
            }
        };
        info!(total = listing.total(), "Listing served");
        Ok(listing)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: EntityKind, id: u64) -> Result<DirectoryRecord, DirectoryError> {
        let id = RecordId::new(id);
        match kind {
            EntityKind::User => Ok(DirectoryRecord::User(self.users.get_user(id).await?)),
            EntityKind::Vendor => Ok(DirectoryRecord::Vendor(self.vendors.get_vendor(id).await?)),
        }
    }

    /// Applies the named action to one record.
    ///
    /// An action name outside the known set is a validation error; a known
    /// action the record's table does not allow is an invalid transition.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        kind: EntityKind,
        id: u64,
        action: &str,
    ) -> Result<DirectoryRecord, DirectoryError> {
        let action: StatusAction = action.parse()?;
        let id = RecordId::new(id);
        match kind {
            EntityKind::User => Ok(DirectoryRecord::User(self.users.transition(id, action).await?)),
            EntityKind::Vendor => Ok(DirectoryRecord::Vendor(
                self.vendors.transition(id, action).await?,
            )),
        }
    }

    #[instrument(skip(self))]
    pub async fn status_counts(&self, kind: EntityKind) -> Result<StatusSummary, DirectoryError> {
        match kind {
            EntityKind::User => Ok(StatusSummary::from_counts(kind, self.users.status_counts().await?)),
            EntityKind::Vendor => Ok(StatusSummary::from_counts(
                kind,
                self.vendors.status_counts().await?,
            )),
        }
    }

    /// Actions an operator may take on a record of `kind` in `status`.
    pub fn allowed_actions(kind: EntityKind, status: &str) -> Result<Vec<StatusAction>, DirectoryError> {
        match kind {
            EntityKind::User => Ok(User::allowed_actions(status.parse::<UserStatus>()?)),
            EntityKind::Vendor => Ok(Vendor::allowed_actions(status.parse::<VendorStatus>()?)),
        }
    }
}
