//! Balloon Pop - number matching game core
//!
//! Core modules:
//! - `sim`: Deterministic round/session engine (numbers, balloons, clock, scoring)
//! - `settings`: Difficulty presets and session configuration
//! - `error`: Configuration errors
//!
//! Rendering, audio and input plumbing live in the UI shell. The shell feeds
//! pop notifications and elapsed time in, and reads snapshots and events out.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Difficulty, DifficultyParams, SessionConfig, SessionPolicy, Viewport, ViewportClass};
pub use sim::{GameEvent, GamePhase, GameSession, PopOutcome, SessionSnapshot};

/// Game configuration constants
pub mod consts {
    /// Default session length for the timed policy (seconds)
    pub const SESSION_DURATION_SECS: u32 = 30;
    /// Timer turns "low" at or below this many seconds
    pub const LOW_TIME_THRESHOLD: u32 = 10;
    /// One logical clock tick (ms)
    pub const TICK_INTERVAL_MS: u64 = 1000;
    /// Undrained events kept per session (oldest dropped first)
    pub const MAX_PENDING_EVENTS: usize = 256;
    /// Maximum clock ticks per driver pump to prevent spiral of death
    pub const MAX_TICKS_PER_PUMP: u32 = 4;

    /// Pop animation length before a popped balloon is removed (ms)
    pub const POP_ANIMATION_MS: u64 = 300;
    /// Celebration overlay after a correct pop (ms)
    pub const CELEBRATION_MS: u64 = 2000;
    /// Game-over screen before returning to the menu (ms)
    pub const END_SCREEN_MS: u64 = 3000;

    /// Endless mode awards a star every N correct pops
    pub const DEFAULT_MILESTONE_EVERY: u64 = 5;

    /// Viewports at or below this width use the compact layout
    pub const COMPACT_MAX_WIDTH: f32 = 768.0;
    /// Balloon footprint (px)
    pub const BALLOON_SIZE_COMPACT: f32 = 60.0;
    pub const BALLOON_SIZE_REGULAR: f32 = 100.0;
    /// Ascent duration (seconds)
    pub const ASCENT_SECS_COMPACT: f32 = 5.0;
    pub const ASCENT_SECS_REGULAR: f32 = 8.0;
    /// Balloons float until this y (px, above the top edge)
    pub const ASCENT_END_Y: f32 = -200.0;

    /// Lateral sway amplitude range (px)
    pub const SWAY_MIN: f32 = 20.0;
    pub const SWAY_MAX: f32 = 50.0;
    /// String tilt range (degrees, symmetric)
    pub const STRING_TILT_MAX_DEG: f32 = 5.0;
    /// Number of balloon colours in the palette
    pub const PALETTE_SIZE: u8 = 8;
}
