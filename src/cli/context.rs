//! Shared setup for CLI commands.
//!
//! Loads `homelab.toml` from the install root and builds the registry,
//! layout and secret generator the commands work with.

use std::path::Path;

use crate::core::config::Config;
use crate::core::install::Layout;
use crate::core::registry::Registry;
use crate::core::secret::SecretGenerator;
use crate::error::Result;

/// Everything a command needs, resolved from the install root.
pub struct Context {
    pub config: Config,
    pub registry: Registry,
    pub layout: Layout,
}

impl Context {
    /// Load config from `root` and build the effective registry.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `homelab.toml` exists but is invalid.
    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        let registry = Registry::from_config(&config)?;
        let layout = Layout::new(root, &config.install);

        Ok(Self {
            config,
            registry,
            layout,
        })
    }

    /// Secret generator honouring `secrets.allow_weak_entropy`.
    pub fn generator(&self) -> SecretGenerator {
        SecretGenerator::new().allow_weak_entropy(self.config.secrets.allow_weak_entropy)
    }
}
