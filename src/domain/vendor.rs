use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{ParseValueError, RecordId, RecordStatus};

/// Lifecycle status of a vendor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Active,
    Suspended,
}

impl RecordStatus for VendorStatus {
    const ALL: &'static [Self] = &[
        VendorStatus::Pending,
        VendorStatus::Active,
        VendorStatus::Suspended,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Active => "active",
            VendorStatus::Suspended => "suspended",
        }
    }
}

impl Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorStatus::Pending => f.write_str("Pending"),
            VendorStatus::Active => f.write_str("Active"),
            VendorStatus::Suspended => f.write_str("Suspended"),
        }
    }
}

impl FromStr for VendorStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(VendorStatus::Pending),
            "active" => Ok(VendorStatus::Active),
            "suspended" => Ok(VendorStatus::Suspended),
            _ => Err(ParseValueError::new("vendor status", s)),
        }
    }
}

/// A vendor account as shown in the admin vendor list.
///
/// `product_count` is owned by the catalog; the directory only carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub joined_on: NaiveDate,
    pub product_count: u32,
    pub status: VendorStatus,
}

/// Payload for a vendor application. Applications always enter as Pending.
#[derive(Debug, Clone)]
pub struct VendorCreate {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub joined_on: NaiveDate,
    pub product_count: u32,
}

impl Vendor {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        email: impl Into<String>,
        specialty: impl Into<String>,
        joined_on: NaiveDate,
        product_count: u32,
        status: VendorStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            specialty: specialty.into(),
            joined_on,
            product_count,
            status,
        }
    }
}

impl VendorCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        specialty: impl Into<String>,
        joined_on: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            specialty: specialty.into(),
            joined_on,
            product_count: 0,
        }
    }

    pub fn with_product_count(mut self, product_count: u32) -> Self {
        self.product_count = product_count;
        self
    }
}
