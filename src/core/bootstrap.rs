//! Per-stack env bootstrap.
//!
//! Walks a stack's required keys in registry order and resolves each one
//! into the stack's env file, generating secrets only for keys that are
//! still unset.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::core::domain::{EnvFile, KeyState, SecretLog, ValueStrategy};
use crate::core::registry::Registry;
use crate::core::resolve::resolve_with;
use crate::core::secret::SecretGenerator;
use crate::error::Result;

/// Stack name for an env file: the name of the directory holding it.
///
/// Only the trailing segment counts, so `/opt/pi-homelab/containers/dns/.env`
/// and `./dns/.env` both belong to `dns`.
pub fn stack_name_for(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}

/// Bootstrap the env file at `path` for `stack`.
///
/// The file must already exist. It is rewritten once, atomically, and
/// only if at least one key was written.
///
/// # Errors
///
/// Returns `EnvError::NotFound` if the file is missing, a `SecretError` if
/// generation fails (the file is then left untouched), or
/// `EnvError::Persist` if the write fails.
pub fn bootstrap(
    stack: &str,
    path: &Path,
    registry: &Registry,
    generator: &mut SecretGenerator,
) -> Result<SecretLog> {
    if registry.requirements(stack).is_empty() {
        debug!(stack, "no requirements registered, skipping");
        return Ok(SecretLog::new());
    }

    let mut file = EnvFile::load(path)?;
    let log = bootstrap_file(&mut file, stack, registry, generator)?;

    if file.is_dirty() {
        file.save()?;
        info!(stack, written = log.len(), path = %path.display(), "bootstrapped env file");
    } else {
        debug!(stack, "env file already complete");
    }

    Ok(log)
}

/// Bootstrap an in-memory env file without persisting it.
///
/// # Errors
///
/// Returns a `SecretError` if a value cannot be generated.
pub fn bootstrap_file(
    file: &mut EnvFile,
    stack: &str,
    registry: &Registry,
    generator: &mut SecretGenerator,
) -> Result<SecretLog> {
    let mut log = SecretLog::new();

    for requirement in registry.requirements(stack) {
        let resolution = resolve_with(file, requirement.key(), || match requirement.strategy() {
            ValueStrategy::Fixed(value) => Ok(value.clone()),
            ValueStrategy::GeneratedPassword => generator.password(),
            ValueStrategy::GeneratedToken => generator.token(),
        })?;

        if let Some(value) = resolution.written() {
            log.push(format!("{}/{}", stack, requirement.key()), value);
        }
    }

    Ok(log)
}

/// State of one required key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub key: String,
    pub state: KeyState,
}

/// Report the state of each required key without changing anything.
///
/// A missing file reports every key as missing.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn inspect(stack: &str, path: &Path, registry: &Registry) -> Result<Vec<KeyStatus>> {
    let file = if path.is_file() {
        Some(EnvFile::load(path)?)
    } else {
        None
    };

    Ok(registry
        .requirements(stack)
        .iter()
        .map(|requirement| KeyStatus {
            key: requirement.key().to_string(),
            state: file
                .as_ref()
                .map_or(KeyState::Absent, |f| f.state(requirement.key())),
        })
        .collect())
}
