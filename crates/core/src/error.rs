//! Error taxonomy of the client core.

use crate::transaction::PendingTransaction;
use skilltoken_config::ConfigError;
use skilltoken_rpc_client::RpcError;
use skilltoken_wallets::WalletError;
use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Wallet provider not available")]
    WalletUnavailable,

    #[error("Could not get wallet address")]
    AccountUnavailable,

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Received invalid data format from contract")]
    InvalidResponseFormat,

    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("No transaction hash received")]
    MissingTransactionHash,

    #[error("Transaction confirmation timed out")]
    TransactionTimeout { hash: String, attempts: u32 },

    #[error("{0}")]
    ConfigurationMissing(String),

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("Wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid mint request: {0}")]
    InvalidMintRequest(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] RpcError),

    /// The mint is on the ledger; only refreshing local state failed
    #[error("Transaction {} confirmed but refreshing tokens failed: {source}", .transaction.hash)]
    ResyncFailed {
        transaction: PendingTransaction,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Message suitable for showing to the user
    pub fn user_message(&self, provider_name: &str) -> String {
        match self {
            Error::WalletUnavailable => format!("Please install {} wallet extension", provider_name),
            Error::ConnectionFailed(_) => "Failed to connect wallet. Please try again.".to_string(),
            Error::NotConnected => "Please connect your wallet first".to_string(),
            Error::ResyncFailed { transaction, .. } => format!(
                "Token minted (transaction {}) but your token list could not be refreshed",
                transaction.hash
            ),
            other => other.to_string(),
        }
    }

    /// Whether the ledger write behind this error went through
    pub fn mint_succeeded(&self) -> bool {
        matches!(self, Error::ResyncFailed { .. })
    }
}

impl From<WalletError> for Error {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::WalletUnavailable => Error::WalletUnavailable,
            WalletError::AccountUnavailable => Error::AccountUnavailable,
            WalletError::SubmissionRejected(reason) => Error::SubmissionRejected(reason),
            WalletError::MissingTransactionHash => Error::MissingTransactionHash,
            WalletError::ConnectionFailed(reason) => Error::ConnectionFailed(reason),
            WalletError::ProviderAlreadyInjected(name) => {
                Error::ConnectionFailed(format!("provider {} already injected", name))
            }
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ModuleAddressMissing => Error::ConfigurationMissing(err.to_string()),
            _ => Error::InvalidConfiguration(err.to_string()),
        }
    }
}
