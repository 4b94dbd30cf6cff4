//! Bootstrap command - prepare every stack under the install root.

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::domain::SecretLog;
use crate::core::install;
use crate::error::Result;

/// Create missing env files and resolve every stack's required keys.
pub fn execute(root: &std::path::Path, json: bool) -> Result<()> {
    let ctx = Context::load(root)?;
    let mut generator = ctx.generator();

    let report = install::run(&ctx.layout, &ctx.registry, &mut generator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.stacks.is_empty() {
        output::warn(&format!(
            "no stacks found under {}",
            output::path(ctx.layout.containers().display())
        ));
        return Ok(());
    }

    for stack in &report.stacks {
        if stack.created {
            output::success(&format!(
                "created {}",
                output::path(stack.env_file.display())
            ));
        }
    }

    output::success(&format!("bootstrapped {} stacks", report.stacks.len()));
    disclose(&report.secrets);

    Ok(())
}

/// Print values written in this run so the operator can record them.
pub(crate) fn disclose(secrets: &SecretLog) {
    if secrets.is_empty() {
        output::dimmed("no new values written");
        return;
    }

    output::section("Generated values");
    for (origin, value) in secrets.iter() {
        output::kv(origin, value);
    }
    println!();
    output::hint("store these somewhere safe; they are also in each stack's env file");
}
