//! Stacks command - show the effective registry.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// List every known stack and the keys it requires, in resolution order.
pub fn execute(root: &Path, json: bool) -> Result<()> {
    let ctx = Context::load(root)?;

    if json {
        let mut stacks = serde_json::Map::new();
        for (name, requirements) in ctx.registry.iter() {
            stacks.insert(name.to_string(), serde_json::to_value(requirements)?);
        }
        println!("{}", serde_json::to_string_pretty(&stacks)?);
        return Ok(());
    }

    for (name, requirements) in ctx.registry.iter() {
        output::section(name);
        for requirement in requirements {
            output::kv(requirement.key(), requirement.strategy());
        }
    }

    Ok(())
}
