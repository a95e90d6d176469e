//! Nullable clock: host time under test control.

use seed_types::Timestamp;
use std::cell::Cell;

/// Stands in for the host's block time.
///
/// Time only moves when a test moves it, so refund maturity can be reached
/// (or just missed) exactly.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(initial_secs)),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().plus_secs(secs));
    }

    /// Jump forward to `target`. Never moves backwards.
    pub fn advance_to(&self, target: Timestamp) {
        if target > self.current.get() {
            self.current.set(target);
        }
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_to_is_monotonic() {
        let clock = NullClock::new(100);
        clock.advance_to(Timestamp::new(50));
        assert_eq!(clock.now(), Timestamp::new(100));
        clock.advance_to(Timestamp::new(604_900));
        assert_eq!(clock.now(), Timestamp::new(604_900));
        clock.advance(u64::MAX);
        assert_eq!(clock.now(), Timestamp::new(u64::MAX));
    }
}
