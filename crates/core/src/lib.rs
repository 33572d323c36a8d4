//! # SkillToken Core
//!
//! Chain-interaction core of the SkillToken client.
//!
//! This crate turns untrusted ledger responses into validated tokens, waits for
//! a wallet provider that shows up at an unspecified time, and drives a mint
//! from submission to a refreshed token list.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skilltoken_config::SkillTokenConfig;
//! use skilltoken_core::{MintRequest, SkillTokenApp};
//! use skilltoken_rpc_client::RpcClient;
//! use skilltoken_wallets::ProviderSlot;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SkillTokenConfig::from_env()?;
//! let ledger = Arc::new(RpcClient::new(config.node_url()?)?);
//! let slot = ProviderSlot::new();
//!
//! let mut app = SkillTokenApp::new(config, slot, ledger);
//! app.start().await?;
//! app.connect_wallet().await?;
//! app.mint(MintRequest::new("Rust", 5)?).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Validation**: `validator` - Total parsing of view responses
//! - **Token Store**: `token_store` - The connected account's tokens
//! - **Retry**: `retry` - Bounded polling shared by detection and confirmation
//! - **Availability**: `availability` - Wallet provider detection
//! - **Transactions**: `transaction` - Mint submission and confirmation
//! - **Application**: `app` - The context that owns all client state

pub mod app;
pub mod availability;
pub mod error;
pub mod retry;
pub mod token;
pub mod token_store;
pub mod transaction;
pub mod validator;

pub use app::{AppState, SkillTokenApp};
pub use availability::{Availability, AvailabilityMonitor, MonitorReport};
pub use error::{Error, Result};
pub use retry::{RetryError, RetryOutcome, RetryPolicy};
pub use token::SkillToken;
pub use token_store::TokenStore;
pub use transaction::{
    Confirmed, MintRequest, PendingTransaction, TransactionManager, MAX_SKILL_LEVEL,
    MIN_SKILL_LEVEL,
};
pub use validator::{validate_response, validate_token, RejectReason};
