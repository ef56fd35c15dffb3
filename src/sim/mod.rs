//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only advances when the host says so (`tick`, `advance`)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod balloon;
pub mod clock;
pub mod driver;
pub mod event;
pub mod numbers;
pub mod round;
pub mod session;

pub use balloon::{Balloon, BalloonId, BalloonState, PopResult, Trajectory};
pub use clock::{ClockTick, SessionClock};
pub use driver::FixedStepDriver;
pub use event::{EndReason, FeedbackCue, GameEvent};
pub use numbers::{NumberSet, NumberSetGenerator};
pub use round::{PopOutcome, Round, RoundController};
pub use session::{GamePhase, GameSession, SessionSnapshot};
