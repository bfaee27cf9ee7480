//! combolock CLI - compare Q-learning curricula on a combination lock
//!
//! With no arguments, runs the default three configurations on a lock with
//! S = 10 actions and k = 4 required advances, then prints one line per
//! configuration with the episodes to first signal and to mastery.

use anyhow::Result;
use clap::Parser;
use combolock::cli::commands::simulate::{SimulateArgs, execute};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    execute(SimulateArgs::parse())
}
