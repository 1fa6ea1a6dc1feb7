use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::error::ConfigError;
use crate::query::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Prefix shared by every variable this crate reads.
const ENV_PREFIX: &str = "DIRECTORY";

/// Default mailbox size of each store actor.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

// The final, validated configuration struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    seed_path: Option<PathBuf>,
    channel_capacity: usize,
    page_limits: PageLimits,
}

// An intermediate struct for deserializing environment variables
// where every field is optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    seed_path: Option<PathBuf>,
    channel_capacity: Option<usize>,
    default_page_size: Option<u32>,
    max_page_size: Option<u32>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            page_limits: PageLimits::default(),
        }
    }
}

impl DirectoryConfig {
    /// Reads `DIRECTORY_*` environment variables and applies defaults.
    pub fn init() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment variables");
        Self::from_vars(std::env::vars())
    }

    /// Builds the configuration from an explicit variable list. Variables
    /// without the `DIRECTORY_` prefix and blank values are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let trimmed = vars
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().trim().to_string()));

        let raw: RawConfig = serde_env::from_iter_with_prefix(trimmed, ENV_PREFIX)
            .map_err(|e| ConfigError::Env(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            seed_path,
            channel_capacity,
            default_page_size,
            max_page_size,
        } = raw;

        let channel_capacity = channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        if channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "DIRECTORY_CHANNEL_CAPACITY must be at least 1".to_string(),
            ));
        }

        let max_per_page = max_page_size.unwrap_or(MAX_PAGE_SIZE);
        let default_per_page = default_page_size.unwrap_or(DEFAULT_PAGE_SIZE.min(max_per_page));
        if max_per_page == 0 || default_per_page == 0 {
            return Err(ConfigError::Invalid("page sizes must be at least 1".to_string()));
        }
        if default_per_page > max_per_page {
            return Err(ConfigError::Invalid(format!(
                "DIRECTORY_DEFAULT_PAGE_SIZE ({default_per_page}) exceeds DIRECTORY_MAX_PAGE_SIZE ({max_per_page})"
            )));
        }

        if let Some(path) = &seed_path {
            info!(seed_path = %path.display(), "Using seed file");
        }

        Ok(Self {
            seed_path,
            channel_capacity,
            page_limits: PageLimits {
                default_per_page,
                max_per_page,
            },
        })
    }

    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn page_limits(&self) -> PageLimits {
        self.page_limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = DirectoryConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, DirectoryConfig::default());
        assert_eq!(config.channel_capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert!(config.seed_path().is_none());
    }

    #[test]
    fn reads_prefixed_variables_only() {
        let config = DirectoryConfig::from_vars(vec![
            ("DIRECTORY_SEED_PATH", "/srv/directory.json"),
            ("DIRECTORY_CHANNEL_CAPACITY", "8"),
            ("DIRECTORY_DEFAULT_PAGE_SIZE", "10"),
            ("DIRECTORY_MAX_PAGE_SIZE", "25"),
            ("CHANNEL_CAPACITY", "0"),
        ])
        .unwrap();
        assert_eq!(config.seed_path(), Some(Path::new("/srv/directory.json")));
        assert_eq!(config.channel_capacity(), 8);
        assert_eq!(
            config.page_limits(),
            PageLimits {
                default_per_page: 10,
                max_per_page: 25,
            }
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = DirectoryConfig::from_vars(vec![("DIRECTORY_SEED_PATH", "  ")]).unwrap();
        assert!(config.seed_path().is_none());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = DirectoryConfig::from_vars(vec![("DIRECTORY_CHANNEL_CAPACITY", "0")]).unwrap_err();
        assert!(err.to_string().contains("DIRECTORY_CHANNEL_CAPACITY"));
    }

    #[test]
    fn default_page_size_cannot_exceed_max() {
        let err = DirectoryConfig::from_vars(vec![
            ("DIRECTORY_DEFAULT_PAGE_SIZE", "100"),
            ("DIRECTORY_MAX_PAGE_SIZE", "20"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn small_max_page_size_lowers_the_default() {
        let config = DirectoryConfig::from_vars(vec![("DIRECTORY_MAX_PAGE_SIZE", "20")]).unwrap();
        assert_eq!(config.page_limits().default_per_page, 20);
    }

    #[test]
    fn non_numeric_capacity_is_an_env_error() {
        let err =
            DirectoryConfig::from_vars(vec![("DIRECTORY_CHANNEL_CAPACITY", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }
}
