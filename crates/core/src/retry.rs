//! Bounded retry primitive shared by wallet detection and transaction confirmation.

use skilltoken_config::{ConfirmationConfig, WalletConfig};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound on attempts, at least one attempt is always made
    pub max_attempts: u32,
    /// Wait between a failed attempt and the next one
    pub delay: Duration,
    /// Limit on a single attempt; an attempt that exceeds it counts as failed
    pub attempt_timeout: Option<Duration>,
}

/// Successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome<T> {
    pub value: T,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Failed run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every attempt failed. `last_error` is `None` when the last attempt timed out.
    #[error("gave up after {attempts} attempts")]
    Exhausted { attempts: u32, last_error: Option<E> },

    /// The liveness token was cancelled
    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            attempt_timeout: None,
        }
    }

    pub const fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// 10 polls, 500 ms apart
    pub fn wallet_detection() -> Self {
        Self::from(&WalletConfig::default())
    }

    /// 10 attempts of up to 10 s, 2 s apart
    pub fn confirmation() -> Self {
        Self::from(&ConfirmationConfig::default())
    }

    /// Runs `op` until it succeeds, the attempts run out, or `liveness` is cancelled.
    ///
    /// `liveness` is checked before every attempt, when an attempt resumes and
    /// while waiting between attempts. At most `max_attempts - 1` delays happen.
    pub async fn run<T, E, F, Fut>(
        &self,
        liveness: &CancellationToken,
        mut op: F,
    ) -> Result<RetryOutcome<T>, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if liveness.is_cancelled() {
                return Err(RetryError::Cancelled { attempts: attempt - 1 });
            }

            let result = match self.attempt_timeout {
                Some(limit) => match tokio::time::timeout(limit, op(attempt)).await {
                    Ok(result) => result.map_err(Some),
                    Err(_) => Err(None),
                },
                None => op(attempt).await.map_err(Some),
            };

            if liveness.is_cancelled() {
                return Err(RetryError::Cancelled { attempts: attempt });
            }

            match result {
                Ok(value) => {
                    return Ok(RetryOutcome {
                        value,
                        attempts: attempt,
                    })
                }
                Err(Some(err)) => {
                    debug!(target: "skilltoken", attempt, max_attempts, error = %err, "attempt failed");
                    last_error = Some(err);
                }
                Err(None) => {
                    debug!(target: "skilltoken", attempt, max_attempts, "attempt timed out");
                    last_error = None;
                }
            }

            if attempt < max_attempts {
                tokio::select! {
                    _ = liveness.cancelled() => {
                        return Err(RetryError::Cancelled { attempts: attempt });
                    }
                    _ = tokio::time::sleep(self.delay) => {}
                }
            }
        }

        Err(RetryError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}

impl From<&WalletConfig> for RetryPolicy {
    fn from(config: &WalletConfig) -> Self {
        Self::new(config.max_poll_attempts, config.poll_interval())
    }
}

impl From<&ConfirmationConfig> for RetryPolicy {
    fn from(config: &ConfirmationConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay())
            .with_attempt_timeout(config.attempt_timeout())
    }
}
