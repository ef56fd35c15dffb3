//! Configuration errors
//!
//! Raised while building a session, never mid-round.

use thiserror::Error;

/// A session could not be configured
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cannot draw that many distinct numbers from [1, max_number]
    #[error("cannot draw {balloon_count} distinct numbers from 1..={max_number}")]
    BalloonCountExceedsRange { balloon_count: u32, max_number: u32 },
    #[error("a round needs at least one balloon")]
    EmptyRound,
    #[error("timed sessions need a non-zero duration")]
    ZeroDuration,
    #[error("endless sessions need a non-zero milestone interval")]
    ZeroMilestone,
    #[error("viewport {width}x{height} is not usable")]
    InvalidViewport { width: f32, height: f32 },
}
