//! Timestamp type used throughout the ledger.
//!
//! Timestamps are Unix epoch seconds (UTC) supplied by the host at the moment
//! an action executes. The engine never reads the wall clock itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Current system time. Hosts call this; the engine does not.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward, clamped at `u64::MAX`.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `now` until this timestamp (zero once reached).
    pub fn secs_until(&self, now: Timestamp) -> u64 {
        self.0.saturating_sub(now.0)
    }

    /// Whether `now` has reached this timestamp.
    pub fn has_passed(&self, now: Timestamp) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_arithmetic() {
        let unstaked_at = Timestamp::new(1_000);
        let maturity = unstaked_at.plus_secs(604_800);
        assert!(!maturity.has_passed(Timestamp::new(605_799)));
        assert!(maturity.has_passed(Timestamp::new(605_800)));
        assert_eq!(maturity.secs_until(Timestamp::new(605_000)), 800);
        assert_eq!(maturity.secs_until(Timestamp::new(700_000)), 0);
        assert_eq!(Timestamp::new(u64::MAX).plus_secs(1), Timestamp::new(u64::MAX));
    }
}
