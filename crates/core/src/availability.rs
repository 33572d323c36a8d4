//! Detection of a wallet provider that is injected at an unspecified time.

use crate::retry::{RetryError, RetryPolicy};
use skilltoken_wallets::{WalletBridge, WalletSession};
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Whether a wallet provider was found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unknown,
    Available,
    Unavailable,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Unknown => write!(f, "unknown"),
            Availability::Available => write!(f, "available"),
            Availability::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Result of one monitor run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorReport {
    pub availability: Availability,
    /// Presence probes made
    pub attempts: u32,
    /// Session that already existed when the provider was found
    pub session: Option<WalletSession>,
    /// User-facing message when the provider never appeared
    pub diagnostic: Option<String>,
    pub cancelled: bool,
}

/// Polls for the provider and resolves [`Availability`] once
#[derive(Debug)]
pub struct AvailabilityMonitor {
    bridge: WalletBridge,
    policy: RetryPolicy,
    provider_name: String,
    state: Availability,
    liveness: CancellationToken,
}

impl AvailabilityMonitor {
    pub fn new(bridge: WalletBridge, policy: RetryPolicy, provider_name: impl Into<String>) -> Self {
        Self {
            bridge,
            policy,
            provider_name: provider_name.into(),
            state: Availability::Unknown,
            liveness: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> Availability {
        self.state
    }

    /// Token that stops the monitor when cancelled
    pub fn liveness(&self) -> CancellationToken {
        self.liveness.clone()
    }

    /// Back to `Unknown` under a fresh liveness token
    pub fn reset(&mut self, liveness: CancellationToken) {
        self.state = Availability::Unknown;
        self.liveness = liveness;
    }

    pub fn cancel(&self) {
        self.liveness.cancel();
    }

    /// Probes for the provider until found, exhausted or cancelled.
    ///
    /// A resolved state is final; later runs report it without probing.
    pub async fn run(&mut self) -> MonitorReport {
        if self.state != Availability::Unknown {
            return self.report(0, None, false);
        }

        let bridge = self.bridge.clone();
        let outcome = self
            .policy
            .run(&self.liveness, |attempt| {
                let available = bridge.is_available();
                debug!(target: "skilltoken", attempt, available, "wallet presence probe");
                async move {
                    if available {
                        Ok(())
                    } else {
                        Err("provider not injected")
                    }
                }
            })
            .await;

        match outcome {
            Ok(outcome) => {
                self.state = Availability::Available;
                info!(
                    target: "skilltoken",
                    provider = %self.provider_name,
                    attempts = outcome.attempts,
                    "wallet provider detected"
                );
                let session = self.discover_session().await;
                let cancelled = self.liveness.is_cancelled();
                self.report(outcome.attempts, session, cancelled)
            }
            Err(RetryError::Exhausted { attempts, .. }) => {
                self.state = Availability::Unavailable;
                warn!(
                    target: "skilltoken",
                    provider = %self.provider_name,
                    attempts,
                    "wallet provider not detected"
                );
                self.report(attempts, None, false)
            }
            Err(RetryError::Cancelled { attempts }) => {
                debug!(target: "skilltoken", attempts, "wallet detection cancelled");
                self.report(attempts, None, true)
            }
        }
    }

    /// Looks for a connection that predates this run
    async fn discover_session(&self) -> Option<WalletSession> {
        match self.bridge.is_connected().await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(err) => {
                warn!(target: "skilltoken", error = %err, "could not query wallet connection");
                return None;
            }
        }
        if self.liveness.is_cancelled() {
            return None;
        }

        let address = match self.bridge.get_account().await {
            Ok(address) => address,
            Err(err) => {
                warn!(target: "skilltoken", error = %err, "connected wallet has no usable account");
                return None;
            }
        };
        if self.liveness.is_cancelled() {
            return None;
        }

        let session = WalletSession::connected(&address);
        info!(target: "skilltoken", address = session.address(), "existing wallet session found");
        Some(session)
    }

    fn report(&self, attempts: u32, session: Option<WalletSession>, cancelled: bool) -> MonitorReport {
        MonitorReport {
            availability: self.state,
            attempts,
            session: if cancelled { None } else { session },
            diagnostic: (self.state == Availability::Unavailable).then(|| self.diagnostic()),
            cancelled,
        }
    }

    fn diagnostic(&self) -> String {
        format!(
            "{name} wallet not detected. Please install {name} wallet extension.",
            name = self.provider_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn monitor(attempts: u32) -> AvailabilityMonitor {
        AvailabilityMonitor::new(
            WalletBridge::default(),
            RetryPolicy::new(attempts, Duration::from_millis(500)),
            "Petra",
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_provider_resolves_unavailable() {
        let mut monitor = monitor(3);
        let report = monitor.run().await;

        assert_eq!(report.availability, Availability::Unavailable);
        assert_eq!(report.attempts, 3);
        assert_eq!(
            report.diagnostic.as_deref(),
            Some("Petra wallet not detected. Please install Petra wallet extension.")
        );
        assert!(!report.cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolved_state_is_final_until_reset() {
        let mut monitor = monitor(2);
        monitor.run().await;
        assert_eq!(monitor.state(), Availability::Unavailable);

        let again = monitor.run().await;
        assert_eq!(again.attempts, 0);
        assert_eq!(again.availability, Availability::Unavailable);

        monitor.reset(CancellationToken::new());
        assert_eq!(monitor.state(), Availability::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_monitor_does_not_transition() {
        let mut monitor = monitor(10);
        monitor.cancel();
        let report = monitor.run().await;

        assert!(report.cancelled);
        assert_eq!(report.attempts, 0);
        assert_eq!(report.availability, Availability::Unknown);
        assert_eq!(report.diagnostic, None);
    }
}
