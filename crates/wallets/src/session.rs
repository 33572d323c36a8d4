use serde::{Deserialize, Serialize};

const ADDRESS_PREFIX: &str = "0x";

/// Prefixes `0x` when absent; otherwise returns the address unchanged.
///
/// Case is preserved, and applying it twice gives the same result as once.
pub fn normalize_address(address: &str) -> String {
    if address.starts_with(ADDRESS_PREFIX) {
        address.to_string()
    } else {
        format!("{}{}", ADDRESS_PREFIX, address)
    }
}

/// Connected wallet session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    address: String,
    is_connected: bool,
}

impl WalletSession {
    /// Creates a connected session, normalizing the provider's address
    pub fn connected(address: &str) -> Self {
        Self {
            address: normalize_address(address),
            is_connected: true,
        }
    }

    /// Normalized address
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// `0x1234...abcd` form for display
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 10 {
            return self.address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
