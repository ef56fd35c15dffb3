//! Balloon entities
//!
//! A balloon carries one number and a fixed trajectory chosen at spawn time.
//! Positions are a pure function of elapsed time, so nothing here samples a
//! wall clock. The only time-dependent state is the pop animation delay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Viewport;

/// Session-unique balloon identifier
pub type BalloonId = u32;

/// Lifecycle of a balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalloonState {
    /// Floating, can be popped
    Alive,
    /// Pop accepted, animation running since `since_ms` (session time)
    Popping { since_ms: u64 },
    /// Gone; never comes back
    Removed,
}

/// Result of a single pop attempt on one balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopResult {
    Accepted { number: u32 },
    Rejected,
}

impl PopResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PopResult::Accepted { .. })
    }
}

/// Spawn-time trajectory and cosmetics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Lane this balloon was placed in (0-based)
    pub lane: u32,
    /// Left edge x at spawn (px)
    pub x: f32,
    /// Spawn y, just below the bottom edge (px)
    pub start_y: f32,
    /// Final y, above the top edge (px)
    pub end_y: f32,
    /// Lateral sway amplitude (px)
    pub amplitude: f32,
    /// Sway phase offset (radians)
    pub phase: f32,
    /// Seconds to float from start_y to end_y
    pub ascent_secs: f32,
    /// Balloon footprint (px)
    pub size: f32,
    pub color_index: u8,
    /// String tilt (degrees)
    pub string_tilt: f32,
}

/// One poppable balloon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: BalloonId,
    pub number: u32,
    /// Session time the balloon appeared (ms)
    pub spawn_ms: u64,
    pub trajectory: Trajectory,
    pub state: BalloonState,
}

impl Balloon {
    /// Place a balloon in lane `index` of `total` equal-width lanes.
    ///
    /// Jitter keeps the left edge inside the lane, so balloons of one round
    /// never start in the same lane.
    pub fn spawn<R: Rng>(
        id: BalloonId,
        number: u32,
        index: u32,
        total: u32,
        viewport: &Viewport,
        spawn_ms: u64,
        rng: &mut R,
    ) -> Self {
        let class = viewport.class();
        let size = class.balloon_size();
        let total = total.max(1);

        let available = (viewport.width - size).max(0.0);
        let lane_width = available / total as f32;
        let jitter = rng.random::<f32>() * lane_width;
        let x = index as f32 * lane_width + jitter;

        let trajectory = Trajectory {
            lane: index,
            x,
            start_y: viewport.height + size,
            end_y: ASCENT_END_Y,
            amplitude: rng.random_range(SWAY_MIN..=SWAY_MAX),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            ascent_secs: class.ascent_secs(),
            size,
            color_index: rng.random_range(0..PALETTE_SIZE),
            string_tilt: rng.random_range(-STRING_TILT_MAX_DEG..=STRING_TILT_MAX_DEG),
        };

        Self {
            id,
            number,
            spawn_ms,
            trajectory,
            state: BalloonState::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == BalloonState::Alive
    }

    pub fn is_removed(&self) -> bool {
        self.state == BalloonState::Removed
    }

    /// Accept the first pop only; later attempts are rejected
    pub fn attempt_pop(&mut self, now_ms: u64) -> PopResult {
        match self.state {
            BalloonState::Alive => {
                self.state = BalloonState::Popping { since_ms: now_ms };
                PopResult::Accepted {
                    number: self.number,
                }
            }
            BalloonState::Popping { .. } | BalloonState::Removed => PopResult::Rejected,
        }
    }

    /// Finish the pop animation once it has run its course.
    /// Returns true if the balloon was removed by this call.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if let BalloonState::Popping { since_ms } = self.state {
            if now_ms.saturating_sub(since_ms) >= POP_ANIMATION_MS {
                self.state = BalloonState::Removed;
                return true;
            }
        }
        false
    }

    /// Round teardown: straight to Removed, no pop result
    pub fn force_remove(&mut self) {
        self.state = BalloonState::Removed;
    }

    /// Position at `elapsed` seconds after spawn
    pub fn position_at(&self, elapsed: f32) -> Vec2 {
        let t = self.trajectory;
        let progress = if t.ascent_secs > 0.0 {
            (elapsed / t.ascent_secs).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let y = t.start_y + (t.end_y - t.start_y) * progress;
        let x = t.x + t.amplitude * (elapsed + t.phase).sin();
        Vec2::new(x, y)
    }

    /// True once the balloon has floated past the top of the screen
    pub fn has_ascended(&self, elapsed: f32) -> bool {
        elapsed >= self.trajectory.ascent_secs
    }
}
