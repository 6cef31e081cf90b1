use ns_core::{ChatError, Pacer};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Why one attempt did not produce a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The provider asked us to slow down. Retried after the long delay.
    #[error("rate limited by provider")]
    RateLimited,

    /// Transport or parse failure. Retried after the short delay.
    #[error("{0}")]
    Transient(String),

    /// The reply parsed but has the wrong shape. Never retried.
    #[error("{0}")]
    Structural(String),
}

impl From<ChatError> for AttemptFailure {
    fn from(e: ChatError) -> Self {
        if e.is_rate_limited() {
            AttemptFailure::RateLimited
        } else {
            AttemptFailure::Transient(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Success { value: T, attempts: u32 },
    TransientFailure { cause: String, attempts: u32 },
    StructuralFailure { cause: String, attempts: u32 },
}

impl<T> RetryOutcome<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Success { attempts, .. }
            | RetryOutcome::TransientFailure { attempts, .. }
            | RetryOutcome::StructuralFailure { attempts, .. } => *attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Success { .. })
    }
}

/// Bounded attempts with two backoff tiers.
///
/// Rate-limit waits and generic waits both count toward the same attempt
/// ceiling. `rate_limit_delay` is expected to be longer than `retry_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
    rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            rate_limit_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration, rate_limit_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
            rate_limit_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_for(&self, failure: &AttemptFailure) -> Duration {
        match failure {
            AttemptFailure::RateLimited => self.rate_limit_delay,
            _ => self.retry_delay,
        }
    }

    /// Run `attempt` (called with the 1-based attempt number) until it
    /// succeeds, fails structurally, or the ceiling is reached.
    pub async fn run<T, F, Fut>(&self, pacer: &dyn Pacer, mut attempt: F) -> RetryOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AttemptFailure>>,
    {
        let mut last_cause = String::new();
        for n in 1..=self.max_attempts {
            match attempt(n).await {
                Ok(value) => return RetryOutcome::Success { value, attempts: n },
                Err(AttemptFailure::Structural(cause)) => {
                    return RetryOutcome::StructuralFailure { cause, attempts: n };
                }
                Err(failure) => {
                    let delay = self.delay_for(&failure);
                    last_cause = failure.to_string();
                    if n < self.max_attempts {
                        warn!(
                            "Attempt {}/{} failed: {}; retrying in {:.1}s",
                            n,
                            self.max_attempts,
                            last_cause,
                            delay.as_secs_f32()
                        );
                        pacer.pause(delay).await;
                    }
                }
            }
        }
        RetryOutcome::TransientFailure {
            cause: last_cause,
            attempts: self.max_attempts,
        }
    }
}
