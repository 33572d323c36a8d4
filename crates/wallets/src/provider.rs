//! Capability surface of an injected wallet provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skilltoken_rpc_client::EntryFunctionPayload;
use thiserror::Error;

/// Failure reported by the provider itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user or the wallet declined the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The provider failed internally
    #[error("Provider failure: {0}")]
    Failure(String),
}

/// Account as reported by the provider; nothing about it is guaranteed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAccount {
    pub address: Option<String>,
    #[serde(rename = "publicKey", alias = "public_key")]
    pub public_key: Option<String>,
}

impl ProviderAccount {
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            public_key: None,
        }
    }
}

/// Wallet injected into the runtime by a third party
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Asks the user to connect; the response shape is provider specific
    async fn connect(&self) -> Result<Value, ProviderError>;

    /// Currently selected account, if any
    async fn account(&self) -> Result<Option<ProviderAccount>, ProviderError>;

    /// Whether the site is already connected
    async fn is_connected(&self) -> Result<bool, ProviderError>;

    /// Signs and submits `payload`; the result should carry a `hash`
    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<Value, ProviderError>;
}
