//! Scripted ledger and wallet provider shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use skilltoken_config::SkillTokenConfig;
use skilltoken_core::SkillTokenApp;
use skilltoken_rpc_client::{
    CommittedTransaction, EntryFunctionPayload, LedgerClient, RpcError, ViewRequest,
};
use skilltoken_wallets::{ProviderAccount, ProviderError, ProviderSlot, WalletProvider};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MODULE_ADDRESS: &str = "0xc0ffee";
pub const TX_HASH: &str = "0xfeedbeef";

pub fn config() -> SkillTokenConfig {
    SkillTokenConfig::with_module_address(MODULE_ADDRESS)
}

pub fn rust_token() -> Value {
    json!({
        "token_id": "1",
        "skill_name": "Rust",
        "skill_level": "5",
        "owner": "0xabc",
        "endorsements": "2"
    })
}

/// Ledger that answers from scripts; the last view answer repeats
#[derive(Default)]
pub struct MockLedger {
    views: Mutex<VecDeque<Result<Value, RpcError>>>,
    last_view: Mutex<Option<Result<Value, RpcError>>>,
    confirmations: Mutex<VecDeque<Result<CommittedTransaction, RpcError>>>,
    pub view_requests: Mutex<Vec<ViewRequest>>,
    pub confirmation_calls: AtomicU32,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_views(self, views: Vec<Result<Value, RpcError>>) -> Self {
        *self.views.lock().unwrap() = views.into();
        self
    }

    /// `failures` failed checks followed by a committed transaction
    pub fn confirming_after(self, failures: usize) -> Self {
        let mut script: VecDeque<_> = (0..failures)
            .map(|_| Err(RpcError::Timeout(TX_HASH.to_string())))
            .collect();
        script.push_back(Ok(committed()));
        *self.confirmations.lock().unwrap() = script;
        self
    }

    pub fn confirmation_calls(&self) -> u32 {
        self.confirmation_calls.load(Ordering::SeqCst)
    }

    pub fn view_count(&self) -> usize {
        self.view_requests.lock().unwrap().len()
    }

    pub fn last_view_request(&self) -> Option<ViewRequest> {
        self.view_requests.lock().unwrap().last().cloned()
    }
}

pub fn committed() -> CommittedTransaction {
    CommittedTransaction {
        hash: TX_HASH.to_string(),
        version: Some("42".to_string()),
        success: true,
        vm_status: "Executed successfully".to_string(),
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn view(&self, request: &ViewRequest) -> Result<Value, RpcError> {
        self.view_requests.lock().unwrap().push(request.clone());
        let next = self.views.lock().unwrap().pop_front();
        let mut last = self.last_view.lock().unwrap();
        if let Some(next) = next {
            *last = Some(next);
        }
        last.clone().unwrap_or(Ok(Value::Null))
    }

    async fn wait_for_transaction(
        &self,
        hash: &str,
        _timeout: Duration,
    ) -> Result<CommittedTransaction, RpcError> {
        self.confirmation_calls.fetch_add(1, Ordering::SeqCst);
        self.confirmations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Timeout(hash.to_string())))
    }
}

/// Provider with a mutable account
pub struct MockProvider {
    account: Mutex<Option<String>>,
    connected: bool,
    submission: Result<Value, ProviderError>,
    /// Account the wallet reports once a transaction is submitted
    account_after_submit: Option<Option<String>>,
    pub submissions: Mutex<Vec<EntryFunctionPayload>>,
}

impl MockProvider {
    pub fn with_account(address: &str) -> Self {
        Self {
            account: Mutex::new(Some(address.to_string())),
            connected: false,
            submission: Ok(json!({ "hash": TX_HASH })),
            account_after_submit: None,
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Already connected when the client starts
    pub fn already_connected(mut self) -> Self {
        self.connected = true;
        self
    }

    pub fn rejecting(mut self, reason: &str) -> Self {
        self.submission = Err(ProviderError::Rejected(reason.to_string()));
        self
    }

    /// The account disappears once a transaction is submitted
    pub fn losing_account_on_submit(mut self) -> Self {
        self.account_after_submit = Some(None);
        self
    }

    /// The user switches to `address` while the transaction is confirming
    pub fn switching_account_on_submit(mut self, address: &str) -> Self {
        self.account_after_submit = Some(Some(address.to_string()));
        self
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn connect(&self) -> Result<Value, ProviderError> {
        Ok(json!({ "status": "connected" }))
    }

    async fn account(&self) -> Result<Option<ProviderAccount>, ProviderError> {
        Ok(self
            .account
            .lock()
            .unwrap()
            .clone()
            .map(ProviderAccount::with_address))
    }

    async fn is_connected(&self) -> Result<bool, ProviderError> {
        Ok(self.connected)
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<Value, ProviderError> {
        self.submissions.lock().unwrap().push(payload.clone());
        if let Some(account) = &self.account_after_submit {
            *self.account.lock().unwrap() = account.clone();
        }
        self.submission.clone()
    }
}

/// App over the given ledger with `provider` already injected
pub fn app_with(provider: MockProvider, ledger: Arc<MockLedger>) -> SkillTokenApp {
    let slot = ProviderSlot::with_provider(Arc::new(provider));
    SkillTokenApp::new(config(), slot, ledger)
}
