//! Round control
//!
//! Owns the one active round and resolves pop attempts against its target.
//! A round is never edited into the next one: a correct pop tears the old
//! round down and installs a fresh one before `handle_pop` returns.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::balloon::{Balloon, BalloonId, PopResult};
use super::numbers::{NumberSet, NumberSetGenerator};
use crate::error::ConfigError;
use crate::settings::{DifficultyParams, Viewport};

/// How a pop notification was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Matched the target; a new round is already in place
    Correct { number: u32 },
    /// Wrong number; the round continues
    Incorrect { number: u32 },
    /// Unknown id, already popped, or session not accepting pops
    Ignored,
}

/// One target plus its balloons
#[derive(Debug, Clone)]
pub struct Round {
    /// 1-based round counter within the session
    pub index: u32,
    pub target: u32,
    pub numbers: NumberSet,
    /// Balloons keyed by id (stable iteration order)
    pub balloons: BTreeMap<BalloonId, Balloon>,
}

impl Round {
    pub fn balloon(&self, id: BalloonId) -> Option<&Balloon> {
        self.balloons.get(&id)
    }

    /// Balloons that can still be popped
    pub fn alive(&self) -> impl Iterator<Item = &Balloon> {
        self.balloons.values().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// First balloon carrying `number`, if it is still in the round
    pub fn find_number(&self, number: u32) -> Option<&Balloon> {
        self.balloons.values().find(|b| b.number == number)
    }
}

pub struct RoundController {
    generator: NumberSetGenerator,
    viewport: Viewport,
    rng: Pcg32,
    round: Option<Round>,
    rounds_started: u32,
    /// Next entity ID (never reused within a session)
    next_id: BalloonId,
}

impl RoundController {
    pub fn new(
        params: impl Into<DifficultyParams>,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        viewport.validate()?;
        Ok(Self {
            generator: NumberSetGenerator::new(params)?,
            viewport,
            rng: Pcg32::seed_from_u64(seed),
            round: None,
            rounds_started: 0,
            next_id: 1,
        })
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn params(&self) -> DifficultyParams {
        self.generator.params()
    }

    fn next_entity_id(&mut self) -> BalloonId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace whatever round is active with a freshly generated one
    pub fn start_round(&mut self, now_ms: u64) -> &Round {
        self.teardown();

        let numbers = self.generator.generate(&mut self.rng);
        let total = numbers.len() as u32;
        let mut balloons = BTreeMap::new();
        for (index, number) in numbers.iter().enumerate() {
            let id = self.next_entity_id();
            let balloon = Balloon::spawn(
                id,
                number,
                index as u32,
                total,
                &self.viewport,
                now_ms,
                &mut self.rng,
            );
            balloons.insert(id, balloon);
        }

        let pick = self.rng.random_range(0..numbers.len());
        let target = numbers.as_slice()[pick];

        self.rounds_started += 1;
        log::info!(
            "Round {}: target={} numbers={:?}",
            self.rounds_started,
            target,
            numbers.as_slice()
        );

        self.round.insert(Round {
            index: self.rounds_started,
            target,
            numbers,
            balloons,
        })
    }

    /// Resolve a pop notification against the active round
    pub fn handle_pop(&mut self, id: BalloonId, now_ms: u64) -> PopOutcome {
        let Some(round) = self.round.as_mut() else {
            return PopOutcome::Ignored;
        };
        let Some(balloon) = round.balloons.get_mut(&id) else {
            log::debug!("Pop for unknown balloon {} ignored", id);
            return PopOutcome::Ignored;
        };
        let target = round.target;

        match balloon.attempt_pop(now_ms) {
            PopResult::Rejected => {
                log::debug!("Duplicate pop for balloon {} ignored", id);
                PopOutcome::Ignored
            }
            PopResult::Accepted { number } if number == target => {
                log::debug!("Balloon {} ({}) popped - correct", id, number);
                self.start_round(now_ms);
                PopOutcome::Correct { number }
            }
            PopResult::Accepted { number } => {
                log::debug!("Balloon {} ({}) popped - wrong, target {}", id, number, target);
                PopOutcome::Incorrect { number }
            }
        }
    }

    /// Advance pop animations and prune removed balloons
    pub fn update(&mut self, now_ms: u64) {
        if let Some(round) = self.round.as_mut() {
            for balloon in round.balloons.values_mut() {
                balloon.update(now_ms);
            }
            round.balloons.retain(|_, b| !b.is_removed());
        }
    }

    /// Force-remove every balloon and drop the round
    pub fn teardown(&mut self) {
        if let Some(mut round) = self.round.take() {
            for balloon in round.balloons.values_mut() {
                balloon.force_remove();
            }
            log::debug!(
                "Round {} torn down ({} balloons)",
                round.index,
                round.balloons.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POP_ANIMATION_MS;
    use crate::sim::BalloonState;
    use crate::settings::Difficulty;

    fn controller(difficulty: Difficulty, seed: u64) -> RoundController {
        RoundController::new(difficulty, Viewport::default(), seed).unwrap()
    }

    fn wrong_id(round: &Round) -> BalloonId {
        round.alive().find(|b| b.number != round.target).unwrap().id
    }

    fn target_id(round: &Round) -> BalloonId {
        round.find_number(round.target).unwrap().id
    }

    #[test]
    fn test_target_is_member_of_round() {
        let mut rounds = controller(Difficulty::Hard, 5);
        for i in 0..100 {
            let round = rounds.start_round(i);
            assert!(round.numbers.contains(round.target));
            assert_eq!(round.balloons.len(), 10);
            let numbers: Vec<u32> = round.balloons.values().map(|b| b.number).collect();
            assert_eq!(numbers, round.numbers.as_slice());
        }
    }

    #[test]
    fn test_no_round_ignores_pops() {
        let mut rounds = controller(Difficulty::Easy, 1);
        assert_eq!(rounds.handle_pop(1, 0), PopOutcome::Ignored);
    }

    #[test]
    fn test_incorrect_pop_keeps_round() {
        let mut rounds = controller(Difficulty::Easy, 2);
        let (target, index, wrong) = {
            let round = rounds.start_round(0);
            (round.target, round.index, wrong_id(round))
        };

        let outcome = rounds.handle_pop(wrong, 100);
        assert!(matches!(outcome, PopOutcome::Incorrect { .. }));

        let round = rounds.round().unwrap();
        assert_eq!(round.target, target);
        assert_eq!(round.index, index);
        assert_eq!(round.alive_count(), 4);

        // Second attempt on the same balloon is ignored
        assert_eq!(rounds.handle_pop(wrong, 150), PopOutcome::Ignored);
    }

    #[test]
    fn test_correct_pop_swaps_round_atomically() {
        let mut rounds = controller(Difficulty::Medium, 3);
        let (old_ids, target_balloon) = {
            let round = rounds.start_round(0);
            let ids: Vec<BalloonId> = round.balloons.keys().copied().collect();
            (ids, target_id(round))
        };

        let outcome = rounds.handle_pop(target_balloon, 50);
        assert!(matches!(outcome, PopOutcome::Correct { .. }));

        let round = rounds.round().unwrap();
        assert_eq!(round.index, 2);
        assert_eq!(round.balloons.len(), 8);
        assert!(round.numbers.contains(round.target));
        assert!(round.balloons.keys().all(|id| !old_ids.contains(id)));
        assert!(round.alive().all(|b| b.spawn_ms == 50));
    }

    #[test]
    fn test_replacing_round_drops_balloon_mid_pop() {
        let mut rounds = controller(Difficulty::Medium, 15);
        let (popping, old_ids) = {
            let round = rounds.start_round(0);
            (wrong_id(round), round.balloons.keys().copied().collect::<Vec<_>>())
        };
        assert!(matches!(rounds.handle_pop(popping, 100), PopOutcome::Incorrect { .. }));
        assert!(matches!(
            rounds.round().unwrap().balloon(popping).unwrap().state,
            BalloonState::Popping { since_ms: 100 }
        ));

        // Replace before the pop animation finishes
        let round = rounds.start_round(150);
        assert_eq!(round.index, 2);
        assert!(round.balloon(popping).is_none());
        assert!(round.balloons.keys().all(|id| !old_ids.contains(id)));
        assert_eq!(round.alive_count(), round.balloons.len());

        // Late animation completion and late pops have nothing to act on
        rounds.update(100 + POP_ANIMATION_MS);
        assert_eq!(rounds.round().unwrap().balloons.len(), 8);
        assert_eq!(rounds.handle_pop(popping, 500), PopOutcome::Ignored);
    }

    #[test]
    fn test_stale_pop_after_replacement_is_ignored() {
        let mut rounds = controller(Difficulty::Easy, 4);
        let (target_balloon, stale) = {
            let round = rounds.start_round(0);
            (target_id(round), wrong_id(round))
        };
        rounds.handle_pop(target_balloon, 10);
        let target = rounds.round().unwrap().target;

        assert_eq!(rounds.handle_pop(target_balloon, 20), PopOutcome::Ignored);
        assert_eq!(rounds.handle_pop(stale, 20), PopOutcome::Ignored);
        assert_eq!(rounds.round().unwrap().target, target);
    }

    #[test]
    fn test_round_stays_open_when_only_target_remains() {
        let mut rounds = controller(Difficulty::Easy, 6);
        let wrong: Vec<BalloonId> = {
            let round = rounds.start_round(0);
            round
                .balloons
                .values()
                .filter(|b| b.number != round.target)
                .map(|b| b.id)
                .collect()
        };
        for id in wrong {
            assert!(matches!(rounds.handle_pop(id, 0), PopOutcome::Incorrect { .. }));
        }
        rounds.update(POP_ANIMATION_MS);

        let round = rounds.round().unwrap();
        assert_eq!(round.index, 1);
        assert_eq!(round.balloons.len(), 1);
        assert_eq!(round.alive_count(), 1);
        assert_eq!(round.alive().next().unwrap().number, round.target);
    }

    #[test]
    fn test_update_prunes_after_animation() {
        let mut rounds = controller(Difficulty::Easy, 7);
        let wrong = wrong_id(rounds.start_round(0));
        rounds.handle_pop(wrong, 1000);

        rounds.update(1000 + POP_ANIMATION_MS - 1);
        assert!(rounds.round().unwrap().balloon(wrong).is_some());
        rounds.update(1000 + POP_ANIMATION_MS);
        assert!(rounds.round().unwrap().balloon(wrong).is_none());
        assert_eq!(rounds.handle_pop(wrong, 2000), PopOutcome::Ignored);
    }

    #[test]
    fn test_teardown_drops_round() {
        let mut rounds = controller(Difficulty::Easy, 8);
        let id = target_id(rounds.start_round(0));
        rounds.teardown();
        assert!(rounds.round().is_none());
        assert_eq!(rounds.handle_pop(id, 0), PopOutcome::Ignored);
    }

    #[test]
    fn test_determinism() {
        let mut a = controller(Difficulty::Hard, 99999);
        let mut b = controller(Difficulty::Hard, 99999);
        for i in 0..5 {
            let ra = a.start_round(i).clone();
            let rb = b.start_round(i).clone();
            assert_eq!(ra.target, rb.target);
            assert_eq!(ra.numbers, rb.numbers);
            for (x, y) in ra.balloons.values().zip(rb.balloons.values()) {
                assert_eq!(x.id, y.id);
                assert_eq!(x.trajectory, y.trajectory);
            }
        }
    }
}
