//! Install orchestration.
//!
//! Finds the stack directories under the install root, derives each
//! stack's live env file from its template when it has none yet, and runs
//! the bootstrap over all of them.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::bootstrap;
use crate::core::config::InstallConfig;
use crate::core::domain::SecretLog;
use crate::core::registry::Registry;
use crate::core::secret::SecretGenerator;
use crate::core::types::{Origin, StackName};
use crate::error::{InstallError, Result};

/// Where stacks live on disk.
#[derive(Debug, Clone)]
pub struct Layout {
    containers: PathBuf,
    template: String,
    env_file: String,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, install: &InstallConfig) -> Self {
        Self {
            containers: root.into().join(&install.containers_dir),
            template: install.template.clone(),
            env_file: install.env_file.clone(),
        }
    }

    pub fn containers(&self) -> &Path {
        &self.containers
    }
}

/// One stack directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackDir {
    pub name: StackName,
    pub dir: PathBuf,
    pub template: PathBuf,
    pub env_file: PathBuf,
}

/// Stack directories that hold a template or an env file, sorted by name.
///
/// # Errors
///
/// Returns `InstallError::NoContainers` if the containers directory is
/// missing.
pub fn discover(layout: &Layout) -> Result<Vec<StackDir>> {
    let containers = layout.containers();
    if !containers.is_dir() {
        return Err(InstallError::NoContainers(containers.to_path_buf()).into());
    }

    let mut stacks = Vec::new();
    for entry in fs::read_dir(containers)? {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let stack = StackDir {
            name: name.to_string(),
            template: dir.join(&layout.template),
            env_file: dir.join(&layout.env_file),
            dir: dir.clone(),
        };

        if stack.template.is_file() || stack.env_file.is_file() {
            stacks.push(stack);
        } else {
            debug!(dir = %dir.display(), "no env template, skipping");
        }
    }

    stacks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(stacks)
}

/// Copy the template to the env file if the env file does not exist yet.
///
/// Returns whether a copy happened. An existing env file is never touched.
///
/// # Errors
///
/// Returns `InstallError::Template` if the copy fails.
pub fn ensure_env_file(stack: &StackDir) -> Result<bool> {
    if stack.env_file.exists() {
        return Ok(false);
    }

    let template_error = |source: std::io::Error| InstallError::Template {
        template: stack.template.clone(),
        target: stack.env_file.clone(),
        source,
    };

    let contents = fs::read(&stack.template).map_err(template_error)?;

    // Only a complete copy is moved into place.
    let mut tmp = NamedTempFile::new_in(&stack.dir).map_err(template_error)?;
    tmp.write_all(&contents).map_err(template_error)?;
    tmp.as_file().sync_all().map_err(template_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
            .map_err(template_error)?;
    }

    tmp.persist_noclobber(&stack.env_file)
        .map_err(|e| template_error(e.error))?;

    info!(stack = %stack.name, path = %stack.env_file.display(), "created env file from template");
    Ok(true)
}

/// What happened to one stack.
#[derive(Debug, Clone, Serialize)]
pub struct StackOutcome {
    pub name: StackName,
    pub env_file: PathBuf,
    /// Env file was created from the template in this run.
    pub created: bool,
    /// Origins of the values written in this run.
    pub written: Vec<Origin>,
}

/// Result of a full run.
#[derive(Debug, Serialize)]
pub struct InstallReport {
    pub stacks: Vec<StackOutcome>,
    /// Every value written, in stack order.
    pub secrets: SecretLog,
}

impl InstallReport {
    /// Env files created from templates in this run.
    pub fn created(&self) -> impl Iterator<Item = &StackOutcome> {
        self.stacks.iter().filter(|s| s.created)
    }
}

/// Ensure and bootstrap every stack under `layout`.
///
/// Stacks are processed one at a time; each env file exists before its
/// secrets are resolved.
///
/// # Errors
///
/// Stops at the first stack that fails.
pub fn run(
    layout: &Layout,
    registry: &Registry,
    generator: &mut SecretGenerator,
) -> Result<InstallReport> {
    let stacks = discover(layout)?;
    debug!(count = stacks.len(), "discovered stacks");

    let mut outcomes = Vec::with_capacity(stacks.len());
    let mut secrets = SecretLog::new();

    for stack in &stacks {
        let created = ensure_env_file(stack)?;
        let mut log = bootstrap::bootstrap(&stack.name, &stack.env_file, registry, generator)?;

        outcomes.push(StackOutcome {
            name: stack.name.clone(),
            env_file: stack.env_file.clone(),
            created,
            written: log.origins().map(str::to_string).collect(),
        });
        secrets.append(&mut log);
    }

    Ok(InstallReport {
        stacks: outcomes,
        secrets,
    })
}
