//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A stack name (e.g., dns, monitoring).
///
/// Matches the name of the stack's directory under `containers/`.
pub type StackName = String;

/// An env key name (e.g., PIHOLE_WEBPASSWORD).
///
/// Must be a valid environment variable name.
pub type EnvKey = String;

/// Where a generated value went, formatted as `<stack>/<KEY>`.
pub type Origin = String;
