use crate::clock::{Clock, SystemClock};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_COOLDOWN_MS: i64 = 60_000; // 1 minute

// Limits for one submitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub max_attempts: u32,
    pub cooldown_ms: i64,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

// Attempts in the current window + when the last one happened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimiterState {
    pub attempts: u32,
    pub last_attempt_ms: i64,
}

/// Fixed window-reset counter.
///
/// The window restarts only once `cooldown_ms` has passed since the last
/// recorded attempt; checking never consumes an attempt.
#[derive(Debug, Clone)]
pub struct RateLimiter<C: Clock = SystemClock> {
    state: RateLimiterState,
    limits: RateLimits,
    clock: C,
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(limits: RateLimits, clock: C) -> Self {
        Self {
            state: RateLimiterState::default(),
            limits,
            clock,
        }
    }

    /// Returns whether another attempt is allowed. Resets the counter as a
    /// side effect when the cooldown has elapsed.
    pub fn can_submit(&mut self) -> bool {
        if self.window_elapsed() {
            self.state.attempts = 0;
        }
        self.state.attempts < self.limits.max_attempts
    }

    pub fn record_attempt(&mut self) {
        self.state.attempts += 1;
        self.state.last_attempt_ms = self.clock.now_ms();
    }

    // Read-only: has the cooldown passed since the last attempt?
    pub fn window_elapsed(&self) -> bool {
        self.clock.now_ms() - self.state.last_attempt_ms > self.limits.cooldown_ms
    }

    // Milliseconds until the window resets (0 when already elapsed)
    pub fn remaining_ms(&self) -> i64 {
        let elapsed = self.clock.now_ms() - self.state.last_attempt_ms;
        self.limits
            .cooldown_ms
            .saturating_sub(elapsed)
            .saturating_add(1)
            .max(0)
    }

    pub fn state(&self) -> RateLimiterState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const START: i64 = 1_700_000_000_000;

    fn limiter() -> (RateLimiter<ManualClock>, ManualClock) {
        let clock = ManualClock::starting_at(START);
        (RateLimiter::new(RateLimits::default(), clock.clone()), clock)
    }

    #[test]
    fn test_fresh_limiter_allows() {
        let (mut limiter, _) = limiter();
        assert!(limiter.can_submit());
        assert_eq!(limiter.state().attempts, 0);
    }

    #[test]
    fn test_denies_after_max_attempts_within_cooldown() {
        let (mut limiter, clock) = limiter();
        for _ in 0..3 {
            assert!(limiter.can_submit());
            limiter.record_attempt();
            clock.advance(1_000);
        }
        assert!(!limiter.can_submit());

        // Still inside the window, measured from the last attempt
        clock.advance(55_000);
        assert!(!limiter.can_submit());
        assert_eq!(limiter.state().attempts, 3);
    }

    #[test]
    fn test_exact_cooldown_is_not_enough() {
        let (mut limiter, clock) = limiter();
        for _ in 0..3 {
            limiter.record_attempt();
        }
        clock.advance(DEFAULT_COOLDOWN_MS);
        assert!(!limiter.can_submit());
        clock.advance(1);
        assert!(limiter.can_submit());
    }

    #[test]
    fn test_resets_after_cooldown_regardless_of_count() {
        let (mut limiter, clock) = limiter();
        for _ in 0..7 {
            limiter.record_attempt();
        }
        clock.advance(DEFAULT_COOLDOWN_MS + 1);
        assert!(limiter.can_submit());
        assert_eq!(limiter.state().attempts, 0);
    }

    #[test]
    fn test_check_does_not_consume() {
        let (mut limiter, _) = limiter();
        for _ in 0..10 {
            assert!(limiter.can_submit());
        }
        assert_eq!(limiter.state().attempts, 0);
    }

    #[test]
    fn test_repeated_checks_keep_resetting_after_cooldown() {
        let (mut limiter, clock) = limiter();
        limiter.record_attempt();
        clock.advance(DEFAULT_COOLDOWN_MS + 1);
        assert!(limiter.can_submit());
        limiter.record_attempt();
        limiter.record_attempt();
        assert_eq!(limiter.state().attempts, 2);

        clock.advance(DEFAULT_COOLDOWN_MS + 1);
        assert!(limiter.can_submit());
        assert!(limiter.can_submit());
        assert_eq!(limiter.state().attempts, 0);
    }

    #[test]
    fn test_remaining_ms() {
        let (mut limiter, clock) = limiter();
        limiter.record_attempt();
        clock.advance(20_000);
        assert_eq!(limiter.remaining_ms(), 40_001);
        clock.advance(50_000);
        assert_eq!(limiter.remaining_ms(), 0);
        assert!(limiter.window_elapsed());
    }

    #[test]
    fn test_remaining_ms_with_huge_cooldown() {
        let clock = ManualClock::starting_at(START);
        let limits = RateLimits {
            max_attempts: 1,
            cooldown_ms: i64::MAX,
        };
        let mut limiter = RateLimiter::new(limits, clock.clone());
        limiter.record_attempt();
        assert_eq!(limiter.remaining_ms(), i64::MAX);
        assert!(!limiter.can_submit());

        clock.advance(1_000);
        assert_eq!(limiter.remaining_ms(), i64::MAX - 999);
    }
}
