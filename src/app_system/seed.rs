use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SeedError;
use crate::domain::{User, Vendor};

/// Externally supplied directory records, as stored in a JSON seed file.
///
/// ```json
/// { "users": [ { "id": 1, "name": "...", "email": "...", "joined_on": "2024-01-15", "status": "active" } ],
///   "vendors": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

impl DirectorySeed {
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_path(path: &Path) -> Result<Self, SeedError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.vendors.is_empty()
    }
}

/// How many records of each kind a seed inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub vendors: usize,
}
