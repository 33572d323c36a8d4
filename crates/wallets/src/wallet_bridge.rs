use crate::{ProviderError, ProviderSlot, Result, WalletError, WalletProvider};
use serde_json::Value;
use skilltoken_rpc_client::EntryFunctionPayload;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Capability wrapper over the injected provider.
///
/// Every call resolves the provider from the slot at call time, so a bridge
/// created before injection starts working once the provider appears.
#[derive(Debug, Clone, Default)]
pub struct WalletBridge {
    slot: ProviderSlot,
}

impl WalletBridge {
    pub fn new(slot: ProviderSlot) -> Self {
        Self { slot }
    }

    /// Slot shared with whoever injects the provider
    pub fn slot(&self) -> &ProviderSlot {
        &self.slot
    }

    /// Presence probe used while waiting for injection
    pub fn is_available(&self) -> bool {
        self.slot.is_present()
    }

    fn provider(&self) -> Result<Arc<dyn WalletProvider>> {
        self.slot.get().ok_or(WalletError::WalletUnavailable)
    }

    /// Requests a connection. The account must be fetched separately.
    pub async fn connect(&self) -> Result<()> {
        let provider = self.provider()?;
        let response = provider
            .connect()
            .await
            .map_err(|err| WalletError::ConnectionFailed(err.to_string()))?;
        debug!(target: "skilltoken", provider = provider.name(), ?response, "wallet connect response");
        Ok(())
    }

    /// Current account address exactly as the provider reports it
    pub async fn get_account(&self) -> Result<String> {
        let provider = self.provider()?;
        let account = provider
            .account()
            .await
            .map_err(|err| WalletError::ConnectionFailed(err.to_string()))?;

        match account.and_then(|account| account.address) {
            Some(address) if !address.trim().is_empty() => Ok(address),
            _ => Err(WalletError::AccountUnavailable),
        }
    }

    /// Whether the provider reports an existing connection
    pub async fn is_connected(&self) -> Result<bool> {
        let provider = self.provider()?;
        provider
            .is_connected()
            .await
            .map_err(|err| WalletError::ConnectionFailed(err.to_string()))
    }

    /// Signs and submits `payload`, returning the transaction hash
    pub async fn sign_and_submit(&self, payload: &EntryFunctionPayload) -> Result<String> {
        let provider = self.provider()?;
        info!(target: "skilltoken", function = %payload.function, "submitting transaction");

        let result = provider
            .sign_and_submit_transaction(payload)
            .await
            .map_err(|err| match err {
                ProviderError::Rejected(reason) | ProviderError::Failure(reason) => {
                    warn!(target: "skilltoken", %reason, "transaction submission declined");
                    WalletError::SubmissionRejected(reason)
                }
            })?;

        extract_hash(&result).ok_or_else(|| {
            warn!(target: "skilltoken", ?result, "submission result carries no hash");
            WalletError::MissingTransactionHash
        })
    }
}

fn extract_hash(result: &Value) -> Option<String> {
    result
        .get("hash")
        .and_then(Value::as_str)
        .filter(|hash| !hash.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_hash() {
        assert_eq!(extract_hash(&json!({ "hash": "0x1" })).as_deref(), Some("0x1"));
        assert_eq!(extract_hash(&json!({ "hash": "" })), None);
        assert_eq!(extract_hash(&json!({ "hash": 12 })), None);
        assert_eq!(extract_hash(&json!(null)), None);
    }

    #[tokio::test]
    async fn test_bridge_without_provider() {
        let bridge = WalletBridge::default();
        assert!(!bridge.is_available());
        assert_eq!(bridge.connect().await, Err(WalletError::WalletUnavailable));
        assert_eq!(bridge.get_account().await, Err(WalletError::WalletUnavailable));
        assert_eq!(bridge.is_connected().await, Err(WalletError::WalletUnavailable));
    }
}
