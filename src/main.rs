//! homelab - env-file bootstrap for a home server stack.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use homelab::cli::output;
use homelab::cli::{execute, Cli};
use homelab::error::{EnvError, Error, InstallError, SecretError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HOMELAB_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("homelab=debug")
        } else {
            EnvFilter::new("homelab=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.root) {
        let suggestion = match &e {
            Error::Install(InstallError::NoContainers(_)) => {
                Some("pass --root or set HOMELAB_ROOT to the install directory")
            }
            Error::Env(EnvError::NotFound(_)) => {
                Some("create it from the stack's .env.example first, or run: homelab bootstrap")
            }
            Error::Secret(SecretError::EntropyUnavailable(_)) => {
                Some("set secrets.allow_weak_entropy = true in homelab.toml to accept a weaker generator")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
