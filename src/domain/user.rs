use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{ParseValueError, RecordId, RecordStatus};

/// Account status of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl RecordStatus for UserStatus {
    const ALL: &'static [Self] = &[UserStatus::Active, UserStatus::Suspended];

    fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => f.write_str("Active"),
            UserStatus::Suspended => f.write_str("Suspended"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(ParseValueError::new("user status", s)),
        }
    }
}

/// A registered user as shown in the admin user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub joined_on: NaiveDate,
    pub status: UserStatus,
}

/// Payload for registering a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub joined_on: NaiveDate,
}

impl User {
    /// Builds a record with an explicit identifier and status, as loaded from
    /// an external source.
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        email: impl Into<String>,
        joined_on: NaiveDate,
        status: UserStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            joined_on,
            status,
        }
    }
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, joined_on: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            joined_on,
        }
    }
}
