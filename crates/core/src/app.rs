//! Coordinating context that owns the client state.
//!
//! `SkillTokenApp` is the only writer of [`AppState`]. Every operation takes
//! `&mut self`, so no two components ever modify the state at once. Once
//! [`SkillTokenApp::teardown`] has run, operations return [`Error::Cancelled`]
//! and leave the state alone.

use crate::availability::{Availability, AvailabilityMonitor, MonitorReport};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::token::SkillToken;
use crate::token_store::TokenStore;
use crate::transaction::{Confirmed, MintRequest, PendingTransaction, TransactionManager};
use skilltoken_config::SkillTokenConfig;
use skilltoken_rpc_client::LedgerClient;
use skilltoken_wallets::{ProviderSlot, WalletBridge, WalletSession};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Observable client state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub session: Option<WalletSession>,
    pub availability: Availability,
    pub tokens: TokenStore,
    pub pending_tx: Option<PendingTransaction>,
    /// User-facing message of the last failure
    pub error: Option<String>,
    pub is_loading: bool,
    pub is_minting: bool,
    pub is_checking_wallet: bool,
}

/// SkillToken client
pub struct SkillTokenApp {
    config: Arc<SkillTokenConfig>,
    bridge: WalletBridge,
    ledger: Arc<dyn LedgerClient>,
    monitor: AvailabilityMonitor,
    transactions: TransactionManager,
    liveness: CancellationToken,
    state: AppState,
}

impl SkillTokenApp {
    pub fn new(config: SkillTokenConfig, slot: ProviderSlot, ledger: Arc<dyn LedgerClient>) -> Self {
        let config = Arc::new(config);
        let bridge = WalletBridge::new(slot);
        let liveness = CancellationToken::new();

        let mut monitor = AvailabilityMonitor::new(
            bridge.clone(),
            RetryPolicy::from(&config.wallet),
            config.wallet.provider_name.clone(),
        );
        monitor.reset(liveness.child_token());

        let transactions = TransactionManager::new(bridge.clone(), ledger.clone(), config.clone());

        Self {
            config,
            bridge,
            ledger,
            monitor,
            transactions,
            liveness,
            state: AppState::default(),
        }
    }

    /// Replaces the confirmation policy
    pub fn with_confirmation_policy(mut self, policy: RetryPolicy) -> Self {
        self.transactions = self.transactions.with_policy(policy);
        self
    }

    /// Replaces the wallet detection policy
    pub fn with_detection_policy(mut self, policy: RetryPolicy) -> Self {
        self.monitor = AvailabilityMonitor::new(
            self.bridge.clone(),
            policy,
            self.config.wallet.provider_name.clone(),
        );
        self.monitor.reset(self.liveness.child_token());
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &SkillTokenConfig {
        &self.config
    }

    pub fn tokens(&self) -> &[SkillToken] {
        self.state.tokens.tokens()
    }

    /// Token that tears the app down when cancelled
    pub fn liveness(&self) -> CancellationToken {
        self.liveness.clone()
    }

    pub fn is_live(&self) -> bool {
        !self.liveness.is_cancelled()
    }

    /// Stops every loop at its next resumption point
    pub fn teardown(&self) {
        info!(target: "skilltoken", "tearing down client");
        self.liveness.cancel();
    }

    /// Waits for the wallet provider and picks up an existing session
    pub async fn start(&mut self) -> Result<MonitorReport> {
        self.ensure_live()?;
        self.state.is_checking_wallet = true;

        let report = self.monitor.run().await;
        if report.cancelled || !self.is_live() {
            return Err(Error::Cancelled);
        }

        self.state.is_checking_wallet = false;
        self.state.availability = report.availability;

        match report.availability {
            Availability::Unavailable => {
                self.state.error = report.diagnostic.clone();
            }
            Availability::Available => {
                if let Some(session) = &report.session {
                    self.state.session = Some(session.clone());
                    self.load_tokens(session.address()).await?;
                }
            }
            Availability::Unknown => {}
        }

        Ok(report)
    }

    /// Connects the wallet and loads the account's tokens
    pub async fn connect_wallet(&mut self) -> Result<WalletSession> {
        self.ensure_live()?;
        self.state.error = None;

        let connected = self.request_session().await;
        self.ensure_live()?;

        let session = match connected {
            Ok(session) => session,
            Err(err) => return Err(self.fail(err)),
        };

        info!(target: "skilltoken", address = session.address(), "wallet connected");
        self.state.session = Some(session.clone());
        self.load_tokens(session.address()).await?;
        Ok(session)
    }

    /// Reloads the tokens of the current session
    pub async fn refresh(&mut self) -> Result<usize> {
        self.ensure_live()?;
        let address = match &self.state.session {
            Some(session) if session.is_connected() => session.address().to_string(),
            _ => return Err(self.fail(Error::NotConnected)),
        };
        self.load_tokens(&address).await
    }

    /// Mints a skill token for the connected account
    pub async fn mint(&mut self, request: MintRequest) -> Result<Confirmed> {
        self.ensure_live()?;
        self.state.error = None;

        let payload = match request.payload(&self.config) {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(err)),
        };

        self.state.is_minting = true;
        let result = self
            .transactions
            .submit_and_confirm(
                self.state.session.as_ref(),
                &payload,
                &mut self.state.tokens,
                &self.liveness,
            )
            .await;
        if !self.is_live() {
            return Err(Error::Cancelled);
        }
        self.state.is_minting = false;

        match result {
            Ok(confirmed) => {
                info!(
                    target: "skilltoken",
                    hash = %confirmed.transaction.hash,
                    skill = request.skill_name(),
                    "skill token minted"
                );
                self.state.pending_tx = Some(confirmed.transaction.clone());
                Ok(confirmed)
            }
            Err(err) => {
                match &err {
                    Error::ResyncFailed { transaction, .. } => {
                        self.state.pending_tx = Some(transaction.clone());
                    }
                    Error::TransactionTimeout { hash, attempts } => {
                        self.state.pending_tx = Some(PendingTransaction {
                            hash: hash.clone(),
                            confirmed: false,
                            attempts: *attempts,
                        });
                    }
                    _ => {}
                }
                Err(self.fail(err))
            }
        }
    }

    async fn request_session(&self) -> Result<WalletSession> {
        let connect = async {
            self.bridge.connect().await?;
            let address = self.bridge.get_account().await?;
            Ok::<_, skilltoken_wallets::WalletError>(WalletSession::connected(&address))
        };

        connect.await.map_err(|err| match Error::from(err) {
            Error::WalletUnavailable => Error::WalletUnavailable,
            Error::ConnectionFailed(reason) => Error::ConnectionFailed(reason),
            other => Error::ConnectionFailed(other.to_string()),
        })
    }

    async fn load_tokens(&mut self, address: &str) -> Result<usize> {
        self.state.is_loading = true;
        let result = self
            .state
            .tokens
            .sync_while_live(self.ledger.as_ref(), &self.config, address, &self.liveness)
            .await
            .map(|tokens| tokens.len());
        if !self.is_live() {
            return Err(Error::Cancelled);
        }
        self.state.is_loading = false;

        result.map_err(|err| self.fail(err))
    }

    /// Records `err` for display unless the app is gone
    fn fail(&mut self, err: Error) -> Error {
        if err != Error::Cancelled && self.is_live() {
            warn!(target: "skilltoken", error = %err, "operation failed");
            self.state.error = Some(err.user_message(&self.config.wallet.provider_name));
        }
        err
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_live() {
            Ok(())
        } else {
            Err(Error::Cancelled)
        }
    }
}
