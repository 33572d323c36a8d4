//! SkillToken CLI Library
//!
//! This crate provides the command-line interface for querying and minting
//! skill tokens.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{CliArgs, Command};
use tokio_util::sync::CancellationToken;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when neither `RUST_LOG` nor `--verbose` is given
pub const DEFAULT_LOG_FILTER: &str = "info,skilltoken=info";

/// Runs the parsed command and returns its output
pub async fn run(args: &CliArgs, liveness: &CancellationToken) -> Result<String> {
    let config = commands::resolve_config(args)?;

    match &args.command {
        Command::Tokens { address, json } => {
            commands::tokens(&config, address, *json, liveness).await
        }
        Command::Confirm { hash } => commands::confirm(&config, hash, liveness).await,
        Command::Payload {
            skill_name,
            skill_level,
        } => commands::payload(&config, skill_name, *skill_level),
        Command::Config => commands::show_config(&config),
    }
}
