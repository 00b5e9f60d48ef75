//! Logical clock source
//!
//! The engine measures proposal TTLs in abstract slots. The host guarantees
//! the slot counter never decreases; nothing here depends on the length of a
//! slot in wall time.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically non-decreasing slot counter
pub trait Clock {
    /// Current slot
    fn slot(&self) -> u64;
}

/// Wall-clock backed slot source (one slot per second)
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn slot(&self) -> u64 {
        let ts = chrono::Utc::now().timestamp();
        // timestamp() is negative only before 1970
        ts.max(0) as u64
    }
}

/// Manually advanced clock for tests and simulation
#[derive(Debug, Default)]
pub struct ManualClock {
    slot: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at the given slot
    pub fn starting_at(slot: u64) -> Self {
        Self {
            slot: AtomicU64::new(slot),
        }
    }

    /// Advance the clock by a number of slots
    pub fn advance(&self, slots: u64) {
        self.slot.fetch_add(slots, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn slot(&self) -> u64 {
        self.slot.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::starting_at(5);
        assert_eq!(clock.slot(), 5);

        clock.advance(10);
        assert_eq!(clock.slot(), 15);
    }

    #[test]
    fn test_system_clock_is_monotone() {
        let clock = SystemClock;
        let a = clock.slot();
        let b = clock.slot();
        assert!(b >= a);
        assert!(a > 0);
    }
}
