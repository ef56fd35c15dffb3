//! Session countdown clock
//!
//! Counts down in whole seconds. The owner calls `tick()` once per logical
//! second; nothing here reads real time.

use serde::{Deserialize, Serialize};

use crate::consts::LOW_TIME_THRESHOLD;

/// Outcome of one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Still counting
    Running { remaining: u32 },
    /// Just reached zero (emitted exactly once)
    Expired,
    /// Already expired or stopped; nothing changed
    Idle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    duration: u32,
    remaining: u32,
    expired: bool,
    stopped: bool,
}

impl SessionClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            expired: false,
            stopped: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_running(&self) -> bool {
        !self.expired && !self.stopped
    }

    /// Presentation hint only
    pub fn is_low(&self) -> bool {
        self.remaining <= LOW_TIME_THRESHOLD
    }

    /// Halt without expiring (session exit)
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn tick(&mut self) -> ClockTick {
        if !self.is_running() {
            return ClockTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            ClockTick::Expired
        } else {
            ClockTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_expires_once_after_duration() {
        let mut clock = SessionClock::new(30);
        let mut expired = 0;
        for _ in 0..30 {
            if clock.tick() == ClockTick::Expired {
                expired += 1;
            }
        }
        assert_eq!(clock.remaining(), 0);
        assert_eq!(expired, 1);
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_low_threshold() {
        let mut clock = SessionClock::new(30);
        for _ in 0..19 {
            clock.tick();
        }
        assert_eq!(clock.remaining(), 11);
        assert!(!clock.is_low());
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 10 });
        assert!(clock.is_low());
    }

    #[test]
    fn test_stop_freezes_clock() {
        let mut clock = SessionClock::new(5);
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.remaining(), 4);
        assert!(!clock.is_expired());
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_single_expiry(duration in 1u32..120, ticks in 0usize..300) {
            let mut clock = SessionClock::new(duration);
            let mut previous = clock.remaining();
            let mut expiries = 0;
            for _ in 0..ticks {
                if clock.tick() == ClockTick::Expired {
                    expiries += 1;
                }
                prop_assert!(clock.remaining() <= previous);
                previous = clock.remaining();
            }
            prop_assert!(expiries <= 1);
            prop_assert_eq!(expiries == 1, ticks >= duration as usize);
        }
    }
}
