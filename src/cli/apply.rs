//! Apply command - bootstrap a single env file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::bootstrap;
use crate::error::{ConfigError, Result};

/// Resolve the required keys of one env file.
///
/// The stack is taken from `--stack`, or else from the name of the
/// directory holding the file.
pub fn execute(root: &Path, file: &Path, stack: Option<String>, json: bool) -> Result<()> {
    let ctx = Context::load(root)?;

    let stack = match stack {
        Some(s) => s,
        None => bootstrap::stack_name_for(&absolute(file)?)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "stack".to_string(),
                reason: format!("cannot derive a stack name from {}", file.display()),
            })?,
    };
    debug!(stack = %stack, file = %file.display(), "applying");

    if !ctx.registry.contains(&stack) && !json {
        output::warn(&format!("no keys registered for stack '{}'", stack));
    }

    let mut generator = ctx.generator();
    let log = bootstrap::bootstrap(&stack, file, &ctx.registry, &mut generator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    output::success(&format!("{} ({})", output::path(file.display()), stack));
    crate::cli::bootstrap::disclose(&log);

    Ok(())
}

/// `file` as an absolute path, so `.env` or `../dns/.env` still name their
/// directory. Symlinks are resolved when the file exists.
fn absolute(file: &Path) -> Result<PathBuf> {
    if let Ok(path) = std::fs::canonicalize(file) {
        return Ok(path);
    }
    Ok(std::env::current_dir()?.join(file))
}
