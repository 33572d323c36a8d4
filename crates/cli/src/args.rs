use clap::{Parser, Subcommand, ValueEnum};
use skilltoken_config::Network;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for the SkillToken CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skilltoken",
    version = env!("CARGO_PKG_VERSION"),
    about = "SkillToken CLI - Query and mint on-chain skill credentials",
    long_about = "SkillToken CLI talks to a ledger fullnode to list the skill tokens owned by an account, wait for mint transactions to commit and build mint payloads for a wallet to sign."
)]
pub struct CliArgs {
    /// Specifies the TOML config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Address that published the skill_token module
    #[arg(long = "module-address", value_name = "ADDR", global = true)]
    pub module_address: Option<String>,

    /// Network to talk to (devnet, testnet, mainnet, local)
    #[arg(long = "network", value_name = "NETWORK", global = true)]
    pub network: Option<Network>,

    /// Fullnode REST endpoint, overriding the network default
    #[arg(long = "node-url", value_name = "URL", global = true)]
    pub node_url: Option<Url>,

    /// Log level; `RUST_LOG` wins when unset
    #[arg(long = "verbose", value_enum, value_name = "LEVEL", global = true)]
    pub verbose: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the skill tokens owned by an account
    Tokens {
        /// Account address, `0x` is optional
        address: String,

        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wait for a transaction to commit
    Confirm {
        /// Transaction hash
        hash: String,
    },

    /// Print the mint payload for a wallet to sign
    Payload {
        #[arg(long = "skill-name", value_name = "NAME")]
        skill_name: String,

        #[arg(long = "skill-level", value_name = "LEVEL")]
        skill_level: u64,
    },

    /// Print the resolved configuration
    Config,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["skilltoken", "config"]);
        assert_eq!(args.config, None);
        assert_eq!(args.module_address, None);
        assert_eq!(args.network, None);
        assert_eq!(args.verbose, None);
        assert_eq!(args.command, Command::Config);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
