//! Key requirements.
//!
//! What a stack needs in its env file and how each value is produced.

use serde::Serialize;
use std::fmt;

use crate::core::types::EnvKey;

/// How a required key gets its value when it is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum ValueStrategy {
    /// A literal default.
    Fixed(String),
    /// An interactive admin password.
    GeneratedPassword,
    /// A long API token.
    GeneratedToken,
}

impl fmt::Display for ValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => write!(f, "fixed ({})", value),
            Self::GeneratedPassword => write!(f, "generated password"),
            Self::GeneratedToken => write!(f, "generated token"),
        }
    }
}

/// A key a stack requires, with its value strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRequirement {
    key: EnvKey,
    #[serde(flatten)]
    strategy: ValueStrategy,
}

impl KeyRequirement {
    pub fn new(key: impl Into<EnvKey>, strategy: ValueStrategy) -> Self {
        Self {
            key: key.into(),
            strategy,
        }
    }

    pub fn fixed(key: impl Into<EnvKey>, value: impl Into<String>) -> Self {
        Self::new(key, ValueStrategy::Fixed(value.into()))
    }

    pub fn password(key: impl Into<EnvKey>) -> Self {
        Self::new(key, ValueStrategy::GeneratedPassword)
    }

    pub fn token(key: impl Into<EnvKey>) -> Self {
        Self::new(key, ValueStrategy::GeneratedToken)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn strategy(&self) -> &ValueStrategy {
        &self.strategy
    }

    pub(crate) fn set_strategy(&mut self, strategy: ValueStrategy) {
        self.strategy = strategy;
    }
}

/// Where a key stands against the placeholder policy.
///
/// Only `Absent -> Set` and `Placeholder -> Set` happen; `Set` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    /// No line defines the key.
    #[serde(rename = "missing")]
    Absent,
    /// Empty, or starts with `CHANGEME`.
    Placeholder,
    /// A real value the operator owns.
    Set,
}

impl KeyState {
    /// Whether the resolver may write this key.
    pub fn is_unset(self) -> bool {
        !matches!(self, Self::Set)
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Absent => "missing",
            Self::Placeholder => "placeholder",
            Self::Set => "set",
        };
        f.write_str(label)
    }
}
