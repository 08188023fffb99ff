//! Retry policy for rate-limited requests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Delay before the retry that follows the zero-based `attempt`.
pub trait Backoff: fmt::Debug + Send + Sync {
    fn delay(&self, attempt: u32) -> Duration;
}

/// `base × (attempt + 1)`: 3 s, 6 s, 9 s … with the default base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    pub base: Duration,
}

impl Backoff for LinearBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt.saturating_add(1))
    }
}

/// `base × factor^attempt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBackoff {
    pub base: Duration,
    pub factor: u32,
}

impl Backoff for ExponentialBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(self.factor.saturating_pow(attempt))
    }
}

pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(3000);

/// How many times to try a request and how long to wait between tries.
///
/// Only rate-limit responses are retried. No jitter is added; anything that
/// needs to spread load across clients has to do so above this layer.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Arc<dyn Backoff>,
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; values below 1 are raised to 1.
    pub fn new(max_attempts: u32, backoff: impl Backoff + 'static) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Arc::new(backoff),
        }
    }

    pub fn linear(max_attempts: u32, base: Duration) -> Self {
        Self::new(max_attempts, LinearBackoff { base })
    }

    /// Same attempt count as the default, no waiting. For tests.
    pub fn immediate() -> Self {
        Self::linear(DEFAULT_MAX_ATTEMPTS, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// A copy with a different attempt cap and the same backoff.
    pub fn with_max_attempts(&self, max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Arc::clone(&self.backoff),
        }
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF_BASE)
    }
}
