//! Password and token generation.
//!
//! Values are Base64 over OS randomness with the characters that break
//! `KEY=VALUE` lines, shell words and URLs swapped for letters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants::{PASSWORD_BYTES, TOKEN_BYTES, UNSAFE_SUBSTITUTES};
use crate::error::{Result, SecretError};

/// Strength class of a generated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// Interactive admin password.
    Password,
    /// API admin token.
    Token,
}

impl Strength {
    /// Random bytes consumed before encoding.
    pub fn bytes(self) -> usize {
        match self {
            Self::Password => PASSWORD_BYTES,
            Self::Token => TOKEN_BYTES,
        }
    }
}

/// Secret generator backed by a random source.
///
/// Defaults to the OS CSPRNG. When the source fails, generation errors
/// with `SecretError::EntropyUnavailable` unless the weak fallback was
/// enabled, in which case a time-seeded generator is used and a warning
/// is logged.
pub struct SecretGenerator {
    source: Box<dyn RngCore>,
    allow_weak: bool,
}

impl SecretGenerator {
    /// Generator over the OS random source.
    pub fn new() -> Self {
        Self::with_source(OsRng)
    }

    /// Generator over a custom random source.
    pub fn with_source(source: impl RngCore + 'static) -> Self {
        Self {
            source: Box::new(source),
            allow_weak: false,
        }
    }

    /// Enable or disable the degraded fallback.
    pub fn allow_weak_entropy(mut self, allow: bool) -> Self {
        self.allow_weak = allow;
        self
    }

    /// Generate an admin password.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::EntropyUnavailable` if no random bytes could be read.
    pub fn password(&mut self) -> Result<String> {
        self.generate(Strength::Password)
    }

    /// Generate an API token.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::EntropyUnavailable` if no random bytes could be read.
    pub fn token(&mut self) -> Result<String> {
        self.generate(Strength::Token)
    }

    /// Generate a value of the given strength.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::EntropyUnavailable` if no random bytes could be read.
    pub fn generate(&mut self, strength: Strength) -> Result<String> {
        let mut buf = Zeroizing::new(vec![0u8; strength.bytes()]);

        if let Err(e) = self.source.try_fill_bytes(buf.as_mut_slice()) {
            if !self.allow_weak {
                return Err(SecretError::EntropyUnavailable(e.to_string()).into());
            }
            warn!(
                error = %e,
                "secure random source unavailable, falling back to a time-seeded generator"
            );
            weak_rng().fill_bytes(buf.as_mut_slice());
        }

        debug!(?strength, "generated secret");
        Ok(encode(&buf))
    }
}

impl Default for SecretGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Base64 encode and replace `/`, `+` and `=`.
pub fn encode(bytes: &[u8]) -> String {
    let encoded = Zeroizing::new(STANDARD.encode(bytes));
    encoded
        .chars()
        .map(|ch| {
            UNSAFE_SUBSTITUTES
                .iter()
                .find(|(unsafe_ch, _)| *unsafe_ch == ch)
                .map_or(ch, |(_, safe)| *safe)
        })
        .collect()
}

fn weak_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos ^ u64::from(std::process::id()))
}
