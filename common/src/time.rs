//! Clock abstraction for staleness evaluation.
//!
//! Rate freshness is judged against wall-clock seconds that advance
//! outside the repository, so the clock is injected rather than read
//! ambiently. Production uses [`SystemClock`]; tests use
//! [`ManualClock`] to pin staleness boundaries to the second.

use std::sync::atomic::{AtomicU64, Ordering};

/// A unix timestamp in whole seconds.
pub type UnixSeconds = u64;

/// Source of the current time in unix seconds.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now_seconds(&self) -> UnixSeconds;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> UnixSeconds {
        let now = chrono::Utc::now().timestamp();
        // Pre-epoch wall clocks clamp to zero rather than wrapping.
        u64::try_from(now).unwrap_or(0)
    }
}

/// A settable clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock pinned at the given time.
    pub fn new(now: UnixSeconds) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Set the current time.
    pub fn set(&self, now: UnixSeconds) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advance the current time by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> UnixSeconds {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_seconds(), 1_000);

        clock.advance(30);
        assert_eq!(clock.now_seconds(), 1_030);

        clock.set(500);
        assert_eq!(clock.now_seconds(), 500);
    }

    #[test]
    fn test_system_clock_is_past_2020() {
        let clock = SystemClock;
        assert!(clock.now_seconds() > 1_577_836_800);
    }
}
