//! Status command - show required keys per stack.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::bootstrap::{self, KeyStatus};
use crate::core::domain::KeyState;
use crate::core::install;
use crate::error::Result;

#[derive(Serialize)]
struct StackStatus {
    stack: String,
    env_file: PathBuf,
    exists: bool,
    keys: Vec<KeyStatus>,
}

/// Show the state of every required key. Nothing is written.
pub fn execute(root: &Path, json: bool) -> Result<()> {
    let ctx = Context::load(root)?;

    let mut statuses = Vec::new();
    for stack in install::discover(&ctx.layout)? {
        statuses.push(StackStatus {
            keys: bootstrap::inspect(&stack.name, &stack.env_file, &ctx.registry)?,
            exists: stack.env_file.is_file(),
            env_file: stack.env_file,
            stack: stack.name,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    let mut pending = 0;
    for status in &statuses {
        output::section(&status.stack);
        if !status.exists {
            output::dimmed("env file not created yet");
        }
        if status.keys.is_empty() {
            output::dimmed("no required keys");
        }
        for key in &status.keys {
            if key.state.is_unset() {
                pending += 1;
            }
            output::kv(
                &key.key,
                output::state(key.state, key.state == KeyState::Set),
            );
        }
    }

    println!();
    if pending == 0 {
        output::success("all required keys are set");
    } else {
        output::warn(&format!("{} keys still unset", pending));
        output::hint("run: homelab bootstrap");
    }

    Ok(())
}
