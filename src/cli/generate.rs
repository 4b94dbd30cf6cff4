//! Generate command - print one fresh secret.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::SecretKind;
use crate::core::secret::Strength;
use crate::error::Result;

/// Print a generated password or token to stdout.
pub fn execute(root: &Path, kind: SecretKind) -> Result<()> {
    let ctx = Context::load(root)?;
    let strength = match kind {
        SecretKind::Password => Strength::Password,
        SecretKind::Token => Strength::Token,
    };

    let value = ctx.generator().generate(strength)?;
    println!("{}", value);
    Ok(())
}
