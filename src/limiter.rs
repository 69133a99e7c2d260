//! Fixed-window rate limiter for uploads.
//!
//! Counts requests per client id per minute. Each client gets its own
//! window, so one noisy client cannot spend another client's budget.

use std::collections::HashMap;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

/// Clock abstraction so tests can drive time deterministically.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Default)]
pub struct RealClock;

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter<C: Clock = RealClock> {
    max_per_window: u32,
    windows: HashMap<String, Window>,
    clock: C,
}

impl RateLimiter<RealClock> {
    pub fn new(max_per_window: u32) -> Self {
        Self::with_clock(max_per_window, RealClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_per_window: u32, clock: C) -> Self {
        Self {
            max_per_window,
            windows: HashMap::new(),
            clock,
        }
    }

    /// Count one request against `client`. On rejection the error carries
    /// the seconds until that client's window resets, never less than 1.
    pub fn check(&mut self, client: &str) -> Result<(), u64> {
        let now = self.clock.now();
        // Finished windows are dropped wholesale, so the map only holds
        // clients seen within the last minute.
        self.windows
            .retain(|_, w| now.duration_since(w.started) < WINDOW);
        let window = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if window.count < self.max_per_window {
            window.count += 1;
            Ok(())
        } else {
            let elapsed = now.duration_since(window.started);
            Err(WINDOW.saturating_sub(elapsed).as_secs().max(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct MockClock {
        now: Rc<Cell<Instant>>,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        fn advance(&self, d: Duration) {
            self.now.set(self.now.get() + d);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    #[test]
    fn test_allows_up_to_limit() {
        let mut limiter = RateLimiter::with_clock(3, MockClock::new());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
    }

    #[test]
    fn test_window_resets_after_a_minute() {
        let clock = MockClock::new();
        let mut limiter = RateLimiter::with_clock(1, clock.clone());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
        clock.advance(Duration::from_secs(60));
        assert!(limiter.check("a").is_ok());
    }

    #[test]
    fn test_expired_windows_are_pruned() {
        let clock = MockClock::new();
        let mut limiter = RateLimiter::with_clock(5, clock.clone());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("b").is_ok());
        assert_eq!(limiter.windows.len(), 2);
        clock.advance(Duration::from_secs(60));
        assert!(limiter.check("c").is_ok());
        assert_eq!(limiter.windows.len(), 1);
    }

    #[test]
    fn test_clients_are_independent() {
        let mut limiter = RateLimiter::with_clock(1, MockClock::new());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
        assert!(limiter.check("b").is_ok());
    }

    #[test]
    fn test_retry_after_counts_down() {
        let clock = MockClock::new();
        let mut limiter = RateLimiter::with_clock(1, clock.clone());
        assert!(limiter.check("a").is_ok());
        assert_eq!(limiter.check("a").unwrap_err(), 60);
        clock.advance(Duration::from_secs(20));
        assert_eq!(limiter.check("a").unwrap_err(), 40);
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let mut limiter = RateLimiter::with_clock(0, MockClock::new());
        assert!(limiter.check("a").is_err());
    }
}
