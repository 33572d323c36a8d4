//! Mint submission and confirmation.

use crate::error::{Error, Result};
use crate::retry::{RetryError, RetryPolicy};
use crate::token_store::TokenStore;
use serde::{Deserialize, Serialize};
use skilltoken_config::SkillTokenConfig;
use skilltoken_rpc_client::{EntryFunctionPayload, LedgerClient};
use skilltoken_wallets::{normalize_address, WalletBridge, WalletSession};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lowest level a skill can be minted at
pub const MIN_SKILL_LEVEL: u64 = 1;
/// Highest level a skill can be minted at
pub const MAX_SKILL_LEVEL: u64 = 100;

/// A submitted transaction and how far its confirmation got
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
    pub confirmed: bool,
    /// Confirmation checks made so far
    pub attempts: u32,
}

impl PendingTransaction {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            confirmed: false,
            attempts: 0,
        }
    }
}

/// Validated input of the mint form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    skill_name: String,
    skill_level: u64,
}

impl MintRequest {
    pub fn new(skill_name: impl Into<String>, skill_level: u64) -> Result<Self> {
        let skill_name = skill_name.into();
        if skill_name.trim().is_empty() {
            return Err(Error::InvalidMintRequest("skill name is required".to_string()));
        }
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill_level) {
            return Err(Error::InvalidMintRequest(format!(
                "skill level must be between {} and {}, got {}",
                MIN_SKILL_LEVEL, MAX_SKILL_LEVEL, skill_level
            )));
        }
        Ok(Self {
            skill_name,
            skill_level,
        })
    }

    pub fn skill_name(&self) -> &str {
        &self.skill_name
    }

    pub fn skill_level(&self) -> u64 {
        self.skill_level
    }

    /// Entry function payload against the configured module
    pub fn payload(&self, config: &SkillTokenConfig) -> Result<EntryFunctionPayload> {
        let function = config.mint_function_id()?;
        Ok(EntryFunctionPayload::mint_skill_token(
            function,
            &self.skill_name,
            self.skill_level,
        ))
    }
}

/// A confirmed mint after the token store was refreshed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed {
    pub transaction: PendingTransaction,
    /// Account the store was refreshed for
    pub account: String,
    pub token_count: usize,
}

/// Drives a transaction from submission to a refreshed token store
#[derive(Clone)]
pub struct TransactionManager {
    bridge: WalletBridge,
    ledger: Arc<dyn LedgerClient>,
    config: Arc<SkillTokenConfig>,
    policy: RetryPolicy,
}

impl TransactionManager {
    pub fn new(
        bridge: WalletBridge,
        ledger: Arc<dyn LedgerClient>,
        config: Arc<SkillTokenConfig>,
    ) -> Self {
        let policy = RetryPolicy::from(&config.confirmation);
        Self {
            bridge,
            ledger,
            config,
            policy,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Submits `payload`, waits for it to commit and refreshes `store`.
    ///
    /// Once the transaction is confirmed any further failure is reported as
    /// [`Error::ResyncFailed`], which still carries the confirmed transaction.
    pub async fn submit_and_confirm(
        &self,
        session: Option<&WalletSession>,
        payload: &EntryFunctionPayload,
        store: &mut TokenStore,
        liveness: &CancellationToken,
    ) -> Result<Confirmed> {
        match session {
            Some(session) if session.is_connected() => {}
            _ => return Err(Error::NotConnected),
        }
        if liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let hash = self.bridge.sign_and_submit(payload).await?;
        info!(target: "skilltoken", %hash, "transaction submitted");
        if liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let transaction = self.confirm(&hash, liveness).await?;
        self.resync(transaction, store, liveness).await
    }

    /// Waits until `hash` commits successfully
    pub async fn confirm(&self, hash: &str, liveness: &CancellationToken) -> Result<PendingTransaction> {
        let ledger = self.ledger.clone();
        let attempt_timeout = self.config.confirmation.attempt_timeout();

        let outcome = self
            .policy
            .run(liveness, |attempt| {
                let ledger = ledger.clone();
                let hash = hash.to_string();
                async move {
                    debug!(target: "skilltoken", %hash, attempt, "checking transaction");
                    ledger.wait_for_transaction(&hash, attempt_timeout).await
                }
            })
            .await;

        match outcome {
            Ok(outcome) => {
                info!(
                    target: "skilltoken",
                    hash,
                    attempts = outcome.attempts,
                    version = ?outcome.value.version,
                    "transaction confirmed"
                );
                Ok(PendingTransaction {
                    hash: hash.to_string(),
                    confirmed: true,
                    attempts: outcome.attempts,
                })
            }
            Err(RetryError::Exhausted { attempts, last_error }) => {
                warn!(
                    target: "skilltoken",
                    hash,
                    attempts,
                    last_error = ?last_error,
                    "transaction confirmation timed out"
                );
                Err(Error::TransactionTimeout {
                    hash: hash.to_string(),
                    attempts,
                })
            }
            Err(RetryError::Cancelled { attempts }) => {
                debug!(target: "skilltoken", hash, attempts, "transaction confirmation cancelled");
                Err(Error::Cancelled)
            }
        }
    }

    /// The account is read again rather than taken from the submitting session
    async fn resync(
        &self,
        transaction: PendingTransaction,
        store: &mut TokenStore,
        liveness: &CancellationToken,
    ) -> Result<Confirmed> {
        let account = match self.bridge.get_account().await {
            Ok(account) => normalize_address(&account),
            Err(err) => return Err(resync_failed(transaction, err.into())),
        };

        match store
            .sync_while_live(self.ledger.as_ref(), &self.config, &account, liveness)
            .await
        {
            Ok(tokens) => {
                let token_count = tokens.len();
                Ok(Confirmed {
                    transaction,
                    account,
                    token_count,
                })
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(err) => Err(resync_failed(transaction, err)),
        }
    }
}

fn resync_failed(transaction: PendingTransaction, source: Error) -> Error {
    warn!(
        target: "skilltoken",
        hash = %transaction.hash,
        error = %source,
        "transaction confirmed but token refresh failed"
    );
    Error::ResyncFailed {
        transaction,
        source: Box::new(source),
    }
}
