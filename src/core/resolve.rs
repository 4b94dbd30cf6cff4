//! Placeholder-aware key resolution.
//!
//! A key is written only when it is missing, empty, or still holds a
//! `CHANGEME` placeholder. Anything else belongs to the operator and is
//! left alone.

use std::convert::Infallible;
use tracing::debug;

use crate::core::domain::{EnvFile, KeyState};

/// Outcome of resolving one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Key was missing; a new line was added at the end.
    Appended(String),
    /// Placeholder value was replaced in place.
    Replaced(String),
    /// Real value already present.
    Kept,
}

impl Resolution {
    /// The value written, if any.
    pub fn written(&self) -> Option<&str> {
        match self {
            Self::Appended(v) | Self::Replaced(v) => Some(v),
            Self::Kept => None,
        }
    }

    pub fn was_written(&self) -> bool {
        !matches!(self, Self::Kept)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Appended(_) => "appended",
            Self::Replaced(_) => "replaced",
            Self::Kept => "kept",
        }
    }
}

/// Resolve `key` to `desired` if it is unset.
///
/// `desired` must be non-empty and must not start with `CHANGEME`,
/// otherwise a later run would treat it as a placeholder again.
pub fn resolve(file: &mut EnvFile, key: &str, desired: &str) -> Resolution {
    let produce = || Ok::<_, Infallible>(desired.to_string());
    match resolve_with(file, key, produce) {
        Ok(resolution) => resolution,
        Err(never) => match never {},
    }
}

/// Resolve `key`, calling `produce` only when a value must be written.
///
/// # Errors
///
/// Propagates errors from `produce`; the file is left unchanged in that case.
pub fn resolve_with<F, E>(file: &mut EnvFile, key: &str, produce: F) -> Result<Resolution, E>
where
    F: FnOnce() -> Result<String, E>,
{
    let resolution = match file.state(key) {
        KeyState::Set => Resolution::Kept,
        KeyState::Placeholder => {
            let value = produce()?;
            file.replace(key, &value);
            Resolution::Replaced(value)
        }
        KeyState::Absent => {
            let value = produce()?;
            file.append(key, &value);
            Resolution::Appended(value)
        }
    };

    debug!(key, outcome = resolution.label(), "resolved key");
    Ok(resolution)
}
