//! Domain types.

mod env;
mod requirement;
mod secret_log;

pub use env::EnvFile;
pub use requirement::{KeyRequirement, KeyState, ValueStrategy};
pub use secret_log::SecretLog;
