use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a directory record. Never reused once allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A textual value that does not name any member of a closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {what}: {value:?}")]
pub struct ParseValueError {
    pub what: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}

/// The two record families held by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Vendor,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Vendor => "vendor",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "users" => Ok(EntityKind::User),
            "vendor" | "vendors" => Ok(EntityKind::Vendor),
            _ => Err(ParseValueError::new("entity kind", s)),
        }
    }
}

/// Operator actions that move a record between statuses.
///
/// The set is shared by every entity kind; which actions are legal from a
/// given status is decided per entity by its transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Activate,
    Suspend,
    Approve,
}

impl StatusAction {
    pub const ALL: &'static [StatusAction] = &[
        StatusAction::Activate,
        StatusAction::Suspend,
        StatusAction::Approve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activate",
            StatusAction::Suspend => "suspend",
            StatusAction::Approve => "approve",
        }
    }
}

impl Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusAction {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activate" => Ok(StatusAction::Activate),
            "suspend" => Ok(StatusAction::Suspend),
            "approve" => Ok(StatusAction::Approve),
            _ => Err(ParseValueError::new("action", s)),
        }
    }
}

/// Closed status enumeration of one entity kind.
pub trait RecordStatus:
    Copy
    + Eq
    + Hash
    + Debug
    + Display
    + FromStr<Err = ParseValueError>
    + Send
    + Sync
    + 'static
{
    /// Every member, in display order.
    const ALL: &'static [Self];

    /// Lower-case wire name.
    fn as_str(&self) -> &'static str;
}
