use crate::{Result, WalletError, WalletProvider};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Holder for the injected provider.
///
/// Clones share the same slot, so the injecting side and the bridge observe
/// the same provider. A slot is filled at most once.
#[derive(Clone, Default)]
pub struct ProviderSlot {
    inner: Arc<OnceLock<Arc<dyn WalletProvider>>>,
}

impl ProviderSlot {
    /// Creates an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `provider`
    pub fn with_provider(provider: Arc<dyn WalletProvider>) -> Self {
        let slot = Self::new();
        let _ = slot.inner.set(provider);
        slot
    }

    /// Injects the provider; a second provider is refused
    pub fn inject(&self, provider: Arc<dyn WalletProvider>) -> Result<()> {
        let name = provider.name().to_string();
        if self.inner.set(provider).is_err() {
            let current = self
                .inner
                .get()
                .map(|p| p.name().to_string())
                .unwrap_or_default();
            return Err(WalletError::ProviderAlreadyInjected(current));
        }
        info!(target: "skilltoken", provider = %name, "wallet provider injected");
        Ok(())
    }

    /// Whether a provider has been injected
    pub fn is_present(&self) -> bool {
        self.inner.get().is_some()
    }

    /// The injected provider, if any
    pub fn get(&self) -> Option<Arc<dyn WalletProvider>> {
        self.inner.get().cloned()
    }
}

impl fmt::Debug for ProviderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSlot")
            .field("provider", &self.inner.get().map(|p| p.name().to_string()))
            .finish()
    }
}
