//! SkillToken Configuration Module
//!
//! This module provides configuration types for the SkillToken client: the
//! deployed contract module, the ledger network, and the polling budgets used
//! by wallet detection and transaction confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Move module that holds the skill token entry and view functions
pub const SKILL_TOKEN_MODULE: &str = "skill_token";
/// View function returning every token owned by an address
pub const GET_USER_TOKENS_FUNCTION: &str = "get_user_tokens";
/// Entry function minting a new token for the signer
pub const MINT_SKILL_TOKEN_FUNCTION: &str = "mint_skill_token";

/// Wallet detection defaults
pub const DEFAULT_PROVIDER_NAME: &str = "Petra";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 10;

/// Transaction confirmation defaults
pub const DEFAULT_CONFIRMATION_ATTEMPTS: u32 = 10;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONFIRMATION_RETRY_DELAY_MS: u64 = 2000;

/// Environment overrides
pub const ENV_MODULE_ADDRESS: &str = "SKILLTOKEN_MODULE_ADDRESS";
pub const ENV_NETWORK: &str = "SKILLTOKEN_NETWORK";
pub const ENV_NODE_URL: &str = "SKILLTOKEN_NODE_URL";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Module address not configured")]
    ModuleAddressMissing,

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Ledger network the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
    Local,
}

impl Network {
    /// Gets the public fullnode REST endpoint for the network
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
            Network::Local => "http://127.0.0.1:8080/v1",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "devnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Mainnet => write!(f, "mainnet"),
            Network::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "devnet" | "dev" => Ok(Network::Devnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "mainnet" | "main" => Ok(Network::Mainnet),
            "local" | "localnet" => Ok(Network::Local),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Wallet provider detection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Display name of the injected provider, used in diagnostics
    pub provider_name: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
}

impl WalletConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// Transaction confirmation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub max_attempts: u32,
    pub attempt_timeout_secs: u64,
    pub retry_delay_ms: u64,
}

impl ConfirmationConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_CONFIRMATION_ATTEMPTS,
            attempt_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            retry_delay_ms: DEFAULT_CONFIRMATION_RETRY_DELAY_MS,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SkillTokenConfig {
    /// Address of the account that published the `skill_token` module
    pub module_address: Option<String>,
    pub network: Network,
    /// Overrides the network's public fullnode
    pub node_url: Option<Url>,
    pub wallet: WalletConfig,
    pub confirmation: ConfirmationConfig,
}

impl SkillTokenConfig {
    /// Creates a configuration for the given module address with defaults elsewhere
    pub fn with_module_address(module_address: impl Into<String>) -> Self {
        Self {
            module_address: Some(module_address.into()),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds a configuration from defaults and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `SKILLTOKEN_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup(ENV_MODULE_ADDRESS) {
            self.module_address = Some(address);
        }

        if let Some(network) = lookup(ENV_NETWORK) {
            self.network = network.parse().map_err(|reason| ConfigError::InvalidValue {
                field: "network",
                reason,
            })?;
        }

        if let Some(node_url) = lookup(ENV_NODE_URL) {
            let url = Url::parse(&node_url).map_err(|err| ConfigError::InvalidValue {
                field: "node_url",
                reason: err.to_string(),
            })?;
            self.node_url = Some(url);
        }

        Ok(())
    }

    /// Returns the configured module address, failing when it is unset or blank
    pub fn module_address(&self) -> Result<&str, ConfigError> {
        match self.module_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Ok(address),
            _ => Err(ConfigError::ModuleAddressMissing),
        }
    }

    /// Fully qualified id of the token listing view function
    pub fn view_function_id(&self) -> Result<String, ConfigError> {
        Ok(function_id(self.module_address()?, GET_USER_TOKENS_FUNCTION))
    }

    /// Fully qualified id of the mint entry function
    pub fn mint_function_id(&self) -> Result<String, ConfigError> {
        Ok(function_id(self.module_address()?, MINT_SKILL_TOKEN_FUNCTION))
    }

    /// REST endpoint, either the explicit override or the network default
    pub fn node_url(&self) -> Result<Url, ConfigError> {
        match &self.node_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(self.network.fullnode_url()).map_err(|err| {
                ConfigError::InvalidValue {
                    field: "network",
                    reason: err.to_string(),
                }
            }),
        }
    }

    /// Checks the polling budgets; a zero attempt bound would never poll
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wallet.max_poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "wallet.max_poll_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.confirmation.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmation.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.confirmation.attempt_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmation.attempt_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn function_id(module_address: &str, function: &str) -> String {
    format!("{}::{}::{}", module_address, SKILL_TOKEN_MODULE, function)
}
