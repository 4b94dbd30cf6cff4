//! homelab - env-file bootstrap and secret provisioning for a home server stack.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── bootstrap     # Bootstrap every stack under the install root
//! │   ├── apply         # Bootstrap a single env file
//! │   ├── status        # Read-only view of required keys
//! │   ├── generate      # Print a fresh password or token
//! │   ├── stacks        # Show the effective registry
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # homelab.toml loading
//!     ├── domain/       # EnvFile, KeyRequirement, SecretLog
//!     ├── secret        # Password/token generation
//!     ├── resolve       # Placeholder-aware key resolution
//!     ├── registry      # Stack -> required keys
//!     ├── bootstrap     # Per-stack bootstrap
//!     └── install       # Stack discovery and orchestration
//! ```
//!
//! # Guarantees
//!
//! - A value that is present, non-empty and not a `CHANGEME` placeholder
//!   is never overwritten.
//! - Env files are rewritten atomically and only when something changed.
//! - Secrets come from the OS random source; the weak fallback must be
//!   opted into and is always logged.

pub mod cli;
pub mod core;
pub mod error;
