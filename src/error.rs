//! Error types for homelab.
//!
//! Each concern gets its own enum; [`Error`] wraps them so callers can
//! match on the category without losing the detail.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading `homelab.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors from reading and persisting env files.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from secret generation.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Errors from the install orchestrator.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("containers directory not found: {0}")]
    NoContainers(PathBuf),

    #[error("failed to copy template {template} to {target}: {source}")]
    Template {
        template: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("key cannot be empty")]
    EmptyKey,

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
