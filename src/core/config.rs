//! Configuration file management.
//!
//! Handles reading and validating the optional `homelab.toml` in the
//! install root. A missing file means defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::{KeyRequirement, ValueStrategy};
use crate::core::types::{EnvKey, StackName};
use crate::core::validation::{validate_fixed_value, validate_key};
use crate::error::{ConfigError, Result};

/// Settings loaded from `homelab.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Install layout overrides
    #[serde(default)]
    pub install: InstallConfig,
    /// Secret generation options
    #[serde(default)]
    pub secrets: SecretsConfig,
    /// Extra key requirements per stack
    #[serde(default)]
    pub stacks: BTreeMap<StackName, StackConfig>,
}

/// `[install]` section
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Directory under the root holding one subdirectory per stack
    pub containers_dir: PathBuf,
    /// Template file name inside each stack directory
    pub template: String,
    /// Live env file name inside each stack directory
    pub env_file: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            containers_dir: PathBuf::from(constants::CONTAINERS_DIR),
            template: constants::TEMPLATE_FILE.to_string(),
            env_file: constants::ENV_FILE.to_string(),
        }
    }
}

/// `[secrets]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Use a time-seeded generator if the OS random source fails
    pub allow_weak_entropy: bool,
}

/// `[stacks.<name>]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    pub keys: Vec<KeyEntry>,
}

/// One configured key. Exactly one of `fixed` or `generate` must be set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyEntry {
    pub key: EnvKey,
    #[serde(default)]
    pub fixed: Option<String>,
    #[serde(default)]
    pub generate: Option<Generate>,
}

/// Value of `generate = "..."`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generate {
    Password,
    Token,
}

impl KeyEntry {
    /// Convert to a requirement, rejecting ambiguous or empty strategies.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless exactly one strategy is given.
    pub fn to_requirement(&self, stack: &str) -> Result<KeyRequirement> {
        validate_key(&self.key)?;

        let field = format!("stacks.{}.{}", stack, self.key);
        let strategy = match (&self.fixed, self.generate) {
            (Some(value), None) => {
                validate_fixed_value(&field, value)?;
                ValueStrategy::Fixed(value.clone())
            }
            (None, Some(Generate::Password)) => ValueStrategy::GeneratedPassword,
            (None, Some(Generate::Token)) => ValueStrategy::GeneratedToken,
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "set either `fixed` or `generate`, not both".to_string(),
                }
                .into())
            }
            (None, None) => {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "missing `fixed` or `generate`".to_string(),
                }
                .into())
            }
        };

        Ok(KeyRequirement::new(self.key.clone(), strategy))
    }
}

impl Config {
    /// Path of the configuration file under `root`
    pub fn path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Load configuration from `<root>/homelab.toml`, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse` if the file exists
    /// but cannot be used, or `ConfigError::InvalidValue` on validation failure.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;

        config.validate()?;

        debug!(stacks = config.stacks.len(), "config loaded");
        Ok(config)
    }

    /// Validate file names and stack entries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("install.template", &self.install.template),
            ("install.env_file", &self.install.env_file),
        ] {
            if name.is_empty() || name.contains('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be a plain file name, got '{}'", name),
                }
                .into());
            }
        }

        if self.install.template == self.install.env_file {
            return Err(ConfigError::InvalidValue {
                field: "install.env_file".to_string(),
                reason: "must differ from install.template".to_string(),
            }
            .into());
        }

        for (stack, entry) in &self.stacks {
            for key in &entry.keys {
                key.to_requirement(stack)?;
            }
        }

        Ok(())
    }
}
