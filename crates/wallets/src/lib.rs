//! SkillToken Wallets Library
//!
//! This crate wraps a browser-injected wallet provider for the SkillToken client:
//! - The provider capability surface (`WalletProvider`)
//! - A slot the provider is injected into at an unspecified time (`ProviderSlot`)
//! - The bridge the rest of the client talks to (`WalletBridge`)
//! - The connected session and address normalization (`WalletSession`)
//!
//! The provider's absence is an expected state, not an exceptional one; every
//! bridge operation reports it as `WalletError::WalletUnavailable`.

pub mod provider;
pub mod provider_slot;
pub mod session;
pub mod wallet_bridge;

// Re-export main types
pub use provider::{ProviderAccount, ProviderError, WalletProvider};
pub use provider_slot::ProviderSlot;
pub use session::{normalize_address, WalletSession};
pub use wallet_bridge::WalletBridge;

use thiserror::Error;

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet provider not available")]
    WalletUnavailable,

    #[error("Could not get wallet address")]
    AccountUnavailable,

    #[error("Wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("No transaction hash received")]
    MissingTransactionHash,

    #[error("A wallet provider is already injected: {0}")]
    ProviderAlreadyInjected(String),
}
