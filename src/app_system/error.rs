use std::path::PathBuf;

use thiserror::Error;

use crate::directory::DirectoryError;

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure to load a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while starting or stopping the directory system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("seed rejected: {0}")]
    SeedRejected(#[from] DirectoryError),
    #[error("actor task failed: {0}")]
    ActorFailed(String),
}
