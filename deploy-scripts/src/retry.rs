//! Bounded retry policy for contract verification

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::{
    constants::{DEFAULT_RETRY_INITIAL_DELAY, DEFAULT_RETRY_MAX_DELAY, VERIFY_ATTEMPTS},
    errors::ScriptError,
};

/// How many times, and how patiently, to attempt an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: VERIFY_ATTEMPTS,
            initial_delay: DEFAULT_RETRY_INITIAL_DELAY,
            max_delay: DEFAULT_RETRY_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A policy making at most `attempts` attempts with the default delays
    pub fn new(attempts: u32) -> Result<Self, ScriptError> {
        if attempts == 0 {
            return Err(ScriptError::InvalidRetryBudget);
        }

        Ok(Self {
            attempts,
            ..Default::default()
        })
    }

    /// Replace the backoff delays
    pub fn with_delays(mut self, initial_delay: Duration, max_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self.max_delay = max_delay.max(initial_delay);
        self
    }

    /// The total number of attempts
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Creates a `backon` [`ExponentialBuilder`] from this policy.
    ///
    /// `backon` counts retries rather than attempts, hence the first attempt is
    /// subtracted from the budget.
    pub fn to_backoff_builder(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.attempts.saturating_sub(1) as usize)
            .with_jitter()
    }
}

#[cfg(test)]
mod tests {
    use backon::BackoffBuilder;

    use super::*;

    #[test]
    fn zero_attempts_is_rejected() {
        assert!(matches!(
            RetryPolicy::new(0),
            Err(ScriptError::InvalidRetryBudget)
        ));
    }

    #[test]
    fn default_policy_uses_verify_budget() {
        assert_eq!(RetryPolicy::default().attempts(), VERIFY_ATTEMPTS);
    }

    #[test]
    fn backoff_yields_one_delay_per_retry() {
        let policy = RetryPolicy::new(3)
            .unwrap()
            .with_delays(Duration::from_millis(10), Duration::from_millis(40));
        let delays: Vec<_> = policy.to_backoff_builder().build().collect();

        assert_eq!(delays.len(), 2);
        // Jitter at most doubles a capped step
        assert!(delays.iter().all(|d| *d <= Duration::from_millis(80)));
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new(1).unwrap();
        assert_eq!(policy.to_backoff_builder().build().count(), 0);
    }
}
