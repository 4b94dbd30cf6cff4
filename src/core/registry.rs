//! Stack registry.
//!
//! Maps a stack name to the ordered keys its env file must hold. The
//! built-in table covers the shipped stacks; `homelab.toml` can add keys
//! or new stacks.

use std::collections::BTreeMap;

use crate::core::config::Config;
use crate::core::domain::KeyRequirement;
use crate::core::types::StackName;
use crate::error::Result;

/// Stack name -> ordered key requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    stacks: BTreeMap<StackName, Vec<KeyRequirement>>,
}

impl Registry {
    /// The built-in stacks.
    pub fn builtin() -> Self {
        let mut registry = Self::default();

        registry.add("dns", KeyRequirement::password("PIHOLE_WEBPASSWORD"));

        for requirement in [
            KeyRequirement::fixed("INFLUXDB_USERNAME", "admin"),
            KeyRequirement::password("INFLUXDB_PASSWORD"),
            KeyRequirement::fixed("INFLUXDB_ORG", "pi-homelab"),
            KeyRequirement::fixed("INFLUXDB_BUCKET", "homeassistant"),
            KeyRequirement::token("INFLUXDB_ADMIN_TOKEN"),
            KeyRequirement::fixed("GRAFANA_ADMIN_USER", "admin"),
            KeyRequirement::password("GRAFANA_ADMIN_PASSWORD"),
        ] {
            registry.add("monitoring", requirement);
        }

        registry
    }

    /// Built-in stacks plus the ones declared in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured key has an invalid strategy.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin();
        for (stack, entry) in &config.stacks {
            for key in &entry.keys {
                registry.add(stack, key.to_requirement(stack)?);
            }
        }
        Ok(registry)
    }

    /// Add a requirement to `stack`.
    ///
    /// A key the stack already requires keeps its position and takes the
    /// new strategy; new keys go last.
    pub fn add(&mut self, stack: impl Into<StackName>, requirement: KeyRequirement) {
        let requirements = self.stacks.entry(stack.into()).or_default();
        match requirements
            .iter_mut()
            .find(|r| r.key() == requirement.key())
        {
            Some(existing) => existing.set_strategy(requirement.strategy().clone()),
            None => requirements.push(requirement),
        }
    }

    /// Requirements for `stack`; empty for unknown stacks.
    pub fn requirements(&self, stack: &str) -> &[KeyRequirement] {
        self.stacks.get(stack).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, stack: &str) -> bool {
        self.stacks.contains_key(stack)
    }

    /// All stacks in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[KeyRequirement])> {
        self.stacks.iter().map(|(s, r)| (s.as_str(), r.as_slice()))
    }
}
