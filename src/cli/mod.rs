//! Command-line interface.

pub mod apply;
pub mod bootstrap;
pub mod completions;
pub mod context;
pub mod generate;
pub mod output;
pub mod stacks;
pub mod status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::constants;

/// homelab - env-file bootstrap for a home server stack.
#[derive(Parser)]
#[command(
    name = "homelab",
    about = "Bootstrap env files and secrets for a Docker Compose home server stack",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Install root holding homelab.toml and containers/
    #[arg(
        long,
        global = true,
        env = "HOMELAB_ROOT",
        default_value = constants::DEFAULT_ROOT
    )]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create missing env files and fill in unset secrets for every stack
    Bootstrap {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in unset secrets in a single env file
    Apply {
        /// Path to the env file
        file: PathBuf,
        /// Stack name (defaults to the file's directory name)
        #[arg(short, long)]
        stack: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the state of every required key without changing anything
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a freshly generated secret
    Generate {
        /// Kind of secret
        #[arg(value_enum)]
        kind: SecretKind,
    },

    /// List stacks and the keys they require
    Stacks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Kinds of generated secret.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum SecretKind {
    Password,
    Token,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, root: PathBuf) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Bootstrap { json } => bootstrap::execute(&root, json),
        Apply { file, stack, json } => apply::execute(&root, &file, stack, json),
        Status { json } => status::execute(&root, json),
        Generate { kind } => generate::execute(&root, kind),
        Stacks { json } => stacks::execute(&root, json),
        Completions { shell } => completions::execute(shell),
    }
}
