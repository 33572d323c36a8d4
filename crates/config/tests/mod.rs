//! Config loading tests
//!
//! Covers TOML files, environment overrides and the validation rules the
//! client relies on before it talks to a ledger.

mod loading_tests {
    use skilltoken_config::{ConfigError, Network, SkillTokenConfig, ENV_MODULE_ADDRESS};
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
module_address = "0x42"
network = "testnet"

[wallet]
provider_name = "Petra"
poll_interval_ms = 250

[confirmation]
max_attempts = 3
"#
        )
        .unwrap();

        let config = SkillTokenConfig::load(file.path()).unwrap();
        assert_eq!(config.module_address().unwrap(), "0x42");
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.wallet.poll_interval_ms, 250);
        // Unspecified fields keep their defaults
        assert_eq!(config.wallet.max_poll_attempts, 10);
        assert_eq!(config.confirmation.max_attempts, 3);
        assert_eq!(config.confirmation.retry_delay_ms, 2000);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SkillTokenConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SkillTokenConfig::from_toml_str("module_address = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = SkillTokenConfig::with_module_address("0x1");
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_MODULE_ADDRESS, "0x2"),
            ("SKILLTOKEN_NETWORK", "mainnet"),
            ("SKILLTOKEN_NODE_URL", "http://localhost:8080/v1"),
        ]);

        config
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.module_address().unwrap(), "0x2");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(
            config.node_url().unwrap().as_str(),
            "http://localhost:8080/v1"
        );
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = SkillTokenConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "SKILLTOKEN_NETWORK").then(|| "moonnet".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "network", .. })
        ));
    }

    #[test]
    fn test_node_url_defaults_to_network() {
        let config = SkillTokenConfig::default();
        assert_eq!(
            config.node_url().unwrap().as_str(),
            "https://fullnode.devnet.aptoslabs.com/v1"
        );
    }

    #[test]
    fn test_validate_rejects_zero_budgets() {
        let mut config = SkillTokenConfig::default();
        assert!(config.validate().is_ok());

        config.confirmation.max_attempts = 0;
        assert!(config.validate().is_err());

        config.confirmation.max_attempts = 10;
        config.wallet.max_poll_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_module_address() {
        let config = SkillTokenConfig::with_module_address("0xbeef");
        let text = config.to_toml_string().unwrap();
        let parsed = SkillTokenConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
