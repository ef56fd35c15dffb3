//! Fixed-step scheduling
//!
//! Turns variable frame times into simulated time plus one clock tick per
//! whole logical second. Hosts that already have a 1 Hz callback can skip
//! this and call `GameSession::tick` directly.

use std::time::Duration;

use super::session::GameSession;
use crate::consts::{MAX_TICKS_PER_PUMP, TICK_INTERVAL_MS};

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    accumulator: Duration,
    tick_interval: Duration,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_INTERVAL_MS))
    }
}

impl FixedStepDriver {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            accumulator: Duration::ZERO,
            tick_interval,
        }
    }

    /// Time carried over toward the next tick
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Feed one frame's worth of time. Returns the number of clock ticks run.
    pub fn pump(&mut self, session: &mut GameSession, frame_dt: Duration) -> u32 {
        session.advance(frame_dt);
        self.accumulator += frame_dt;

        if self.tick_interval.is_zero() {
            return 0;
        }

        let mut ticks = 0;
        while self.accumulator >= self.tick_interval && ticks < MAX_TICKS_PER_PUMP {
            session.tick();
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }
        ticks
    }
}
