//! # SkillToken-RS: wallet-driven skill credentials in Rust
//!
//! Client core for an application that mints and lists skill tokens on a
//! Move-based ledger through a browser-injected wallet.
//!
//! This library provides:
//! - Total validation of untrusted view responses
//! - Detection of a wallet provider injected at an unspecified time
//! - Bounded, cancellable transaction confirmation
//! - A token store that is replaced wholesale on every sync
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skilltoken_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SkillTokenConfig::from_env()?;
//!     let slot = ProviderSlot::new();
//!
//!     let mut app = skilltoken_rs::connect_fullnode(config, slot)?;
//!     app.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`skilltoken_config`] - Configuration and contract constants
//! - [`skilltoken_rpc_client`] - Ledger client and wire models
//! - [`skilltoken_wallets`] - Wallet provider bridge and sessions
//! - [`skilltoken_core`] - Validation, token store, monitor and transactions

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use skilltoken_config as config;
pub use skilltoken_core as core;
pub use skilltoken_rpc_client as rpc_client;
pub use skilltoken_wallets as wallets;

use std::sync::Arc;

/// Common imports for SkillToken development
pub mod prelude {
    pub use crate::config::{Network, SkillTokenConfig};
    pub use crate::core::{
        AppState, Availability, Error, MintRequest, PendingTransaction, SkillToken,
        SkillTokenApp, TokenStore,
    };
    pub use crate::rpc_client::{LedgerClient, RpcClient};
    pub use crate::wallets::{ProviderSlot, WalletProvider, WalletSession};
}

/// Builds a client that talks to the fullnode named by `config`
pub fn connect_fullnode(
    config: crate::config::SkillTokenConfig,
    slot: crate::wallets::ProviderSlot,
) -> crate::core::Result<crate::core::SkillTokenApp> {
    config.validate()?;
    let ledger = crate::rpc_client::RpcClient::new(config.node_url()?)?;
    Ok(crate::core::SkillTokenApp::new(config, slot, Arc::new(ledger)))
}

/// SkillToken library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
