//! Discrete events emitted by a session
//!
//! The core never plays sounds or draws anything. The UI shell drains these
//! after each input/tick and maps them to feedback with `GameEvent::cues`.

use serde::{Deserialize, Serialize};

use super::balloon::BalloonId;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Countdown reached zero
    TimeUp,
    /// Player left (Back button)
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        target: u32,
        balloons: u32,
    },
    PopAccepted {
        id: BalloonId,
        number: u32,
        correct: bool,
    },
    /// Countdown crossed into the warning zone
    TimeLow { remaining: u32 },
    /// Endless mode: another star earned
    MilestoneReached { stars: u64 },
    SessionEnded { score: u64, reason: EndReason },
    /// Game-over screen finished; go back to the menu
    ReturnToMenu,
}

/// Feedback the shell should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackCue {
    /// Balloon burst
    Pop,
    /// Correct number
    Success,
    /// Wrong number
    Error,
    /// Star earned
    Milestone,
    /// Time ran out
    GameOver,
}

impl GameEvent {
    pub fn cues(&self) -> &'static [FeedbackCue] {
        match self {
            GameEvent::PopAccepted { correct: true, .. } => &[FeedbackCue::Pop, FeedbackCue::Success],
            GameEvent::PopAccepted { correct: false, .. } => &[FeedbackCue::Error],
            GameEvent::MilestoneReached { .. } => &[FeedbackCue::Milestone],
            GameEvent::SessionEnded {
                reason: EndReason::TimeUp,
                ..
            } => &[FeedbackCue::GameOver],
            _ => &[],
        }
    }
}
