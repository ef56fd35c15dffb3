//! Game session
//!
//! Composes the round controller and the countdown clock, keeps score and
//! owns the terminal transition. All input is serialized through `&mut self`:
//! pop notifications (`on_pop`), logical seconds (`tick`) and simulated time
//! for animations (`advance`). Nothing here reads a real clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::balloon::{Balloon, BalloonId};
use super::clock::{ClockTick, SessionClock};
use super::event::{EndReason, GameEvent};
use super::round::{PopOutcome, Round, RoundController};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::{SessionConfig, SessionPolicy};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting pops
    Playing,
    /// Terminal; waiting to return to the menu
    Ended,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub stars: u64,
    /// None in endless mode
    pub time_remaining: Option<u32>,
    pub is_low: bool,
    pub celebrating: bool,
    pub round: Option<u32>,
    pub target: Option<u32>,
    /// Balloons still on screen, ordered by id
    pub balloons: Vec<Balloon>,
    pub elapsed_ms: u64,
}

pub struct GameSession {
    config: SessionConfig,
    phase: GamePhase,
    score: u64,
    /// Endless-mode stars
    stars: u64,
    clock: Option<SessionClock>,
    rounds: RoundController,
    /// Simulated session time
    elapsed: Duration,
    celebrate_until_ms: Option<u64>,
    ended_at_ms: Option<u64>,
    end_reason: Option<EndReason>,
    returned_to_menu: bool,
    low_time_signalled: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Validate the config, start the clock and deal the first round
    pub fn start(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rounds = RoundController::new(config.params, config.viewport, config.seed)?;
        let clock = match config.policy {
            SessionPolicy::Timed { duration_secs } => Some(SessionClock::new(duration_secs)),
            SessionPolicy::Endless { .. } => None,
        };

        log::info!(
            "Session started: {} balloons from 1..={}, {:?}, seed {}",
            config.params.balloon_count,
            config.params.max_number,
            config.policy,
            config.seed
        );

        let mut session = Self {
            config,
            phase: GamePhase::Playing,
            score: 0,
            stars: 0,
            clock,
            rounds,
            elapsed: Duration::ZERO,
            celebrate_until_ms: None,
            ended_at_ms: None,
            end_reason: None,
            returned_to_menu: false,
            low_time_signalled: false,
            events: Vec::new(),
        };
        session.rounds.start_round(0);
        session.push_round_started();
        Ok(session)
    }

    fn push_round_started(&mut self) {
        let started = self.rounds.round().map(|round| GameEvent::RoundStarted {
            round: round.index,
            target: round.target,
            balloons: round.balloons.len() as u32,
        });
        if let Some(event) = started {
            self.push_event(event);
        }
    }

    /// Pop notification from the input boundary
    pub fn on_pop(&mut self, id: BalloonId) -> PopOutcome {
        if self.phase != GamePhase::Playing {
            return PopOutcome::Ignored;
        }

        let outcome = self.rounds.handle_pop(id, self.elapsed_ms());
        match outcome {
            PopOutcome::Correct { number } => {
                self.score += 1;
                self.celebrate_until_ms = Some(self.elapsed_ms() + CELEBRATION_MS);
                self.push_event(GameEvent::PopAccepted {
                    id,
                    number,
                    correct: true,
                });
                if let SessionPolicy::Endless { milestone_every } = self.config.policy {
                    if self.score % milestone_every == 0 {
                        self.stars += 1;
                        log::info!("Milestone: {} stars at score {}", self.stars, self.score);
                        self.push_event(GameEvent::MilestoneReached { stars: self.stars });
                    }
                }
                self.push_round_started();
            }
            PopOutcome::Incorrect { number } => {
                self.push_event(GameEvent::PopAccepted {
                    id,
                    number,
                    correct: false,
                });
            }
            PopOutcome::Ignored => {}
        }
        outcome
    }

    /// One logical second
    pub fn tick(&mut self) -> ClockTick {
        if self.phase != GamePhase::Playing {
            return ClockTick::Idle;
        }
        let Some(clock) = self.clock.as_mut() else {
            return ClockTick::Idle;
        };

        let result = clock.tick();
        match result {
            ClockTick::Running { remaining } => {
                if remaining <= LOW_TIME_THRESHOLD && !self.low_time_signalled {
                    self.low_time_signalled = true;
                    self.push_event(GameEvent::TimeLow { remaining });
                }
            }
            ClockTick::Expired => self.end(EndReason::TimeUp),
            ClockTick::Idle => {}
        }
        result
    }

    /// Move simulated time forward (pop animations, celebration, end screen)
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        let now_ms = self.elapsed_ms();
        self.rounds.update(now_ms);

        if self.celebrate_until_ms.is_some_and(|until| now_ms >= until) {
            self.celebrate_until_ms = None;
        }

        if let Some(ended_at) = self.ended_at_ms {
            if now_ms >= ended_at + END_SCREEN_MS {
                self.return_to_menu();
            }
        }
    }

    /// Player pressed Back: end now (if still playing) and leave immediately
    pub fn exit(&mut self) {
        if self.phase == GamePhase::Playing {
            self.end(EndReason::Exited);
        }
        self.return_to_menu();
    }

    fn end(&mut self, reason: EndReason) {
        self.phase = GamePhase::Ended;
        self.ended_at_ms = Some(self.elapsed_ms());
        self.end_reason = Some(reason);
        self.celebrate_until_ms = None;
        if let Some(clock) = self.clock.as_mut() {
            clock.stop();
        }
        self.rounds.teardown();

        log::info!("Session ended ({:?}) with score {}", reason, self.score);
        self.push_event(GameEvent::SessionEnded {
            score: self.score,
            reason,
        });
    }

    fn return_to_menu(&mut self) {
        if self.returned_to_menu {
            return;
        }
        self.returned_to_menu = true;
        log::info!("Returning to menu");
        self.push_event(GameEvent::ReturnToMenu);
    }

    /// Queue an event, dropping the oldest once the backlog is full
    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events emitted since the last drain.
    ///
    /// Hosts should drain once per frame. Only the newest
    /// `MAX_PENDING_EVENTS` are kept for hosts that never do.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn stars(&self) -> u64 {
        self.stars
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.clock.as_ref().map(SessionClock::remaining)
    }

    pub fn is_low(&self) -> bool {
        self.clock.as_ref().is_some_and(SessionClock::is_low)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrate_until_ms.is_some()
    }

    pub fn round(&self) -> Option<&Round> {
        self.rounds.round()
    }

    /// Whole milliseconds of session time; sub-millisecond frames still accumulate
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn has_returned_to_menu(&self) -> bool {
        self.returned_to_menu
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let round = self.rounds.round();
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            stars: self.stars,
            time_remaining: self.time_remaining(),
            is_low: self.is_low(),
            celebrating: self.is_celebrating(),
            round: round.map(|r| r.index),
            target: round.map(|r| r.target),
            balloons: round
                .map(|r| r.balloons.values().cloned().collect())
                .unwrap_or_default(),
            elapsed_ms: self.elapsed_ms(),
        }
    }
}
