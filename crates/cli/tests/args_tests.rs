//! CLI argument parsing tests

use clap::Parser;
use skilltoken_cli::args::*;
use skilltoken_config::Network;
use std::path::PathBuf;

#[test]
fn test_tokens_command() {
    let args = CliArgs::try_parse_from(["skilltoken", "tokens", "0xabc", "--json"]).unwrap();
    assert_eq!(
        args.command,
        Command::Tokens {
            address: "0xabc".to_string(),
            json: true
        }
    );
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "skilltoken",
        "confirm",
        "0xfeed",
        "--module-address",
        "0xc0ffee",
        "--network",
        "testnet",
        "--node-url",
        "http://127.0.0.1:8080/v1",
        "--verbose",
        "debug",
        "--config",
        "skilltoken.toml",
    ])
    .unwrap();

    assert_eq!(
        args.command,
        Command::Confirm {
            hash: "0xfeed".to_string()
        }
    );
    assert_eq!(args.module_address.as_deref(), Some("0xc0ffee"));
    assert_eq!(args.network, Some(Network::Testnet));
    assert_eq!(
        args.node_url.as_ref().map(|url| url.as_str()),
        Some("http://127.0.0.1:8080/v1")
    );
    assert_eq!(args.verbose, Some(LogLevel::Debug));
    assert_eq!(args.config, Some(PathBuf::from("skilltoken.toml")));
}

#[test]
fn test_payload_command() {
    let args = CliArgs::try_parse_from([
        "skilltoken",
        "payload",
        "--skill-name",
        "Rust",
        "--skill-level",
        "5",
    ])
    .unwrap();
    assert_eq!(
        args.command,
        Command::Payload {
            skill_name: "Rust".to_string(),
            skill_level: 5
        }
    );
}

#[test]
fn test_invalid_arguments_are_rejected() {
    assert!(CliArgs::try_parse_from(["skilltoken"]).is_err());
    assert!(CliArgs::try_parse_from(["skilltoken", "tokens"]).is_err());
    assert!(CliArgs::try_parse_from(["skilltoken", "config", "--network", "moonnet"]).is_err());
    assert!(CliArgs::try_parse_from(["skilltoken", "config", "--node-url", "not a url"]).is_err());
    assert!(CliArgs::try_parse_from([
        "skilltoken",
        "payload",
        "--skill-name",
        "Rust",
        "--skill-level",
        "-1"
    ])
    .is_err());
}
