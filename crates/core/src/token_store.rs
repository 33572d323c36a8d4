//! Local view of the tokens owned by the connected account.

use crate::error::{Error, Result};
use crate::token::SkillToken;
use crate::validator::validate_response;
use skilltoken_config::SkillTokenConfig;
use skilltoken_rpc_client::{LedgerClient, ViewRequest};
use skilltoken_wallets::normalize_address;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Token collection of one account, replaced wholesale on every sync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    tokens: Vec<SkillToken>,
    address: Option<String>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches, validates and stores the tokens owned by `address`.
    ///
    /// Any failure leaves the store empty.
    pub async fn sync(
        &mut self,
        ledger: &dyn LedgerClient,
        config: &SkillTokenConfig,
        address: &str,
    ) -> Result<&[SkillToken]> {
        let liveness = CancellationToken::new();
        self.sync_while_live(ledger, config, address, &liveness).await
    }

    /// Like [`TokenStore::sync`], but leaves the store untouched when
    /// `liveness` is cancelled while the view call is in flight.
    pub async fn sync_while_live(
        &mut self,
        ledger: &dyn LedgerClient,
        config: &SkillTokenConfig,
        address: &str,
        liveness: &CancellationToken,
    ) -> Result<&[SkillToken]> {
        if liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let address = normalize_address(address);
        let fetched = fetch_tokens(ledger, config, &address).await;

        if liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        match fetched {
            Ok(tokens) => {
                info!(target: "skilltoken", %address, count = tokens.len(), "token store synced");
                self.tokens = tokens;
                self.address = Some(address);
                Ok(self.tokens.as_slice())
            }
            Err(err) => {
                warn!(target: "skilltoken", %address, error = %err, "token sync failed");
                self.clear();
                Err(err)
            }
        }
    }

    pub fn tokens(&self) -> &[SkillToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Address of the last successful sync
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.address = None;
    }
}

async fn fetch_tokens(
    ledger: &dyn LedgerClient,
    config: &SkillTokenConfig,
    address: &str,
) -> Result<Vec<SkillToken>> {
    let function = config.view_function_id()?;
    let request = ViewRequest::get_user_tokens(function, address);
    let raw = ledger.view(&request).await?;
    validate_response(&raw)
}
