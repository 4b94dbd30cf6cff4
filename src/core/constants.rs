//! Constants used throughout homelab.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name, looked up in the install root.
pub const CONFIG_FILE: &str = "homelab.toml";

/// Default install root.
pub const DEFAULT_ROOT: &str = "/opt/pi-homelab";

/// Directory under the install root holding one subdirectory per stack.
pub const CONTAINERS_DIR: &str = "containers";

/// Template env file shipped with each stack.
pub const TEMPLATE_FILE: &str = ".env.example";

/// Live env file read by Docker Compose.
pub const ENV_FILE: &str = ".env";

/// Sentinel prefix marking a value as not yet set.
pub const PLACEHOLDER_PREFIX: &str = "CHANGEME";

/// Random bytes behind a generated password.
pub const PASSWORD_BYTES: usize = 24;

/// Random bytes behind a generated API token.
pub const TOKEN_BYTES: usize = 48;

/// Replacements for Base64 characters that are unsafe in env, shell and URL contexts.
pub const UNSAFE_SUBSTITUTES: &[(char, char)] = &[('/', 'x'), ('+', 'y'), ('=', 'z')];
