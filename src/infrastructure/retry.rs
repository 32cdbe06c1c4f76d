use std::time::Duration;

use crate::types::constants::{MAX_CONNECT_ATTEMPTS, RETRY_DELAY_MS};

/// Fixed-delay retry budget for reconnection attempts.
///
/// The delay is deliberately flat rather than exponential; it matches the
/// gateway's expected client behavior.
#[derive(Debug, Clone, Copy)]
pub struct RetrySchedule {
    failures: u32,
    max_attempts: u32,
    delay: Duration,
}

impl RetrySchedule {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            failures: 0,
            max_attempts,
            delay,
        }
    }

    /// Record one failed attempt. Returns `true` while budget remains for
    /// another attempt.
    pub fn record_failure(&mut self) -> bool {
        self.failures += 1;
        self.failures < self.max_attempts
    }

    /// Reset the budget after a successful connection.
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::new(MAX_CONNECT_ATTEMPTS, Duration::from_millis(RETRY_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_retries_until_budget_is_spent() {
        let mut schedule = RetrySchedule::new(3, Duration::from_millis(100));

        assert!(schedule.record_failure());
        assert!(schedule.record_failure());
        assert!(!schedule.record_failure());
        assert_eq!(schedule.failures(), 3);
    }

    #[test]
    fn delay_is_flat_across_attempts() {
        let mut schedule = RetrySchedule::new(5, Duration::from_millis(1000));

        let first = schedule.delay();
        schedule.record_failure();
        schedule.record_failure();

        assert_eq!(schedule.delay(), first);
    }

    #[test]
    fn reset_restores_the_full_budget() {
        let mut schedule = RetrySchedule::new(2, Duration::from_millis(100));

        assert!(schedule.record_failure());
        schedule.reset();

        assert_eq!(schedule.failures(), 0);
        assert!(schedule.record_failure());
    }

    #[test]
    fn default_matches_protocol_constants() {
        let schedule = RetrySchedule::default();

        assert_eq!(schedule.delay(), Duration::from_millis(RETRY_DELAY_MS));
        assert_eq!(schedule.failures(), 0);
    }
}
