//! Backoff policies for realtime reconnection and HTTP retries.
//!
//! Both policies are pure: they only compute delays. Timer wiring lives with
//! the owners of the timers (`realtime`, `visit_gate`).

use std::time::Duration;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(30_000);
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;

/// `min(1000 * 2^attempt, 30000)` milliseconds.
pub fn backoff(attempt: u32) -> Duration {
    ReconnectPolicy::default().delay_for_attempt(attempt)
}

/// Configuration for auto-reconnect behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Maximum number of consecutive reconnect attempts
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl ReconnectPolicy {
    /// Calculate delay for a given attempt number (0-based), doubling each
    /// time and clamped to `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Delay before the next attempt, or `None` once the cap is reached.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then(|| self.delay_for_attempt(attempt))
    }
}

/// Bounded retry for one-shot HTTP checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            base_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Wait after the `failed`-th consecutive failure (1-based), or `None`
    /// when no attempts remain.
    pub fn delay_after(&self, failed: u32) -> Option<Duration> {
        if failed == 0 || failed >= self.max_attempts {
            return None;
        }
        let factor = 2u32.saturating_pow(failed - 1);
        Some(self.base_delay.saturating_mul(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconnect_delays_double_until_ceiling() {
        let delays: Vec<u64> = (0..7).map(|a| backoff(a).as_millis() as u64).collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 16000, 30000, 30000]);
    }

    #[test]
    fn reconnect_delay_survives_huge_attempts() {
        assert_eq!(backoff(u32::MAX), DEFAULT_MAX_DELAY);
        assert_eq!(backoff(40), DEFAULT_MAX_DELAY);
    }

    #[test]
    fn next_delay_stops_at_cap() {
        let policy = ReconnectPolicy::default();
        for attempt in 0..5 {
            assert_eq!(policy.next_delay(attempt), Some(backoff(attempt)));
        }
        assert_eq!(policy.next_delay(5), None);
        assert_eq!(policy.next_delay(6), None);
    }

    #[test]
    fn retry_policy_allows_three_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_after(3), None);
    }
}
