//! Full client lifecycle through the facade crate

use async_trait::async_trait;
use serde_json::{json, Value};
use skilltoken_rs::prelude::*;
use skilltoken_rs::rpc_client::{CommittedTransaction, EntryFunctionPayload, RpcError, ViewRequest};
use skilltoken_rs::wallets::{ProviderAccount, ProviderError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ledger holding minted tokens in memory
#[derive(Default)]
struct InMemoryLedger {
    tokens: Mutex<Vec<Value>>,
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn view(&self, request: &ViewRequest) -> Result<Value, RpcError> {
        let owner = request.arguments.first().cloned().unwrap_or(Value::Null);
        let owned: Vec<Value> = self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|token| token["owner"] == owner)
            .cloned()
            .collect();
        Ok(Value::Array(owned))
    }

    async fn wait_for_transaction(
        &self,
        hash: &str,
        _timeout: Duration,
    ) -> Result<CommittedTransaction, RpcError> {
        Ok(CommittedTransaction {
            hash: hash.to_string(),
            version: Some("1".to_string()),
            success: true,
            vm_status: "Executed successfully".to_string(),
        })
    }
}

/// Wallet that "mints" straight into the in-memory ledger
struct MintingWallet {
    address: String,
    ledger: Arc<InMemoryLedger>,
}

#[async_trait]
impl WalletProvider for MintingWallet {
    fn name(&self) -> &str {
        "minting"
    }

    async fn connect(&self) -> Result<Value, ProviderError> {
        Ok(json!({}))
    }

    async fn account(&self) -> Result<Option<ProviderAccount>, ProviderError> {
        Ok(Some(ProviderAccount::with_address(self.address.clone())))
    }

    async fn is_connected(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<Value, ProviderError> {
        let mut tokens = self.ledger.tokens.lock().unwrap();
        let id = tokens.len() + 1;
        tokens.push(json!({
            "token_id": id.to_string(),
            "skill_name": payload.arguments[0],
            "skill_level": payload.arguments[1].to_string(),
            "owner": format!("0x{}", self.address),
            "endorsements": "0",
            "created_at": "1700000000000"
        }));
        Ok(json!({ "hash": format!("0xtx{}", id) }))
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_mint_and_list() {
    let ledger = Arc::new(InMemoryLedger::default());
    let slot = ProviderSlot::new();
    slot.inject(Arc::new(MintingWallet {
        address: "abc".to_string(),
        ledger: ledger.clone(),
    }))
    .unwrap();

    let config = SkillTokenConfig::with_module_address("0xc0ffee");
    let mut app = SkillTokenApp::new(config, slot, ledger);

    let report = app.start().await.unwrap();
    assert_eq!(report.availability, Availability::Available);
    assert_eq!(
        app.state().session.as_ref().map(|s| s.address()),
        Some("0xabc")
    );
    assert!(app.tokens().is_empty());

    app.mint(MintRequest::new("Rust", 5).unwrap()).await.unwrap();
    let confirmed = app.mint(MintRequest::new("Go", 3).unwrap()).await.unwrap();
    assert_eq!(confirmed.transaction.hash, "0xtx2");

    let names: Vec<&str> = app.tokens().iter().map(|t| t.skill_name.as_str()).collect();
    assert_eq!(names, vec!["Rust", "Go"]);
    assert_eq!(app.tokens()[1].skill_level, 3);
    assert_eq!(app.state().error, None);

    app.teardown();
    assert_eq!(app.refresh().await, Err(Error::Cancelled));
}

#[test]
fn test_connect_fullnode_checks_configuration() {
    let mut config = SkillTokenConfig::with_module_address("0xc0ffee");
    config.network = Network::Local;
    assert!(skilltoken_rs::connect_fullnode(config.clone(), ProviderSlot::new()).is_ok());

    config.confirmation.max_attempts = 0;
    assert!(matches!(
        skilltoken_rs::connect_fullnode(config, ProviderSlot::new()),
        Err(Error::InvalidConfiguration(_))
    ));
}
