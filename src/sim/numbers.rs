//! Number set generation
//!
//! Each round draws `balloon_count` distinct numbers from [1, max_number].
//! Rejection sampling only terminates when `balloon_count <= max_number`, so
//! the generator refuses to exist for any other shape.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::DifficultyParams;

/// Distinct numbers for one round, in draw order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSet(Vec<u32>);

impl NumberSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, number: u32) -> bool {
        self.0.contains(&number)
    }

    /// Numbers in draw order (stable for the lifetime of the set)
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

/// Validated generator for one round shape
#[derive(Debug, Clone, Copy)]
pub struct NumberSetGenerator {
    params: DifficultyParams,
}

impl NumberSetGenerator {
    pub fn new(params: impl Into<DifficultyParams>) -> Result<Self, ConfigError> {
        let params = params.into();
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> DifficultyParams {
        self.params
    }

    /// Draw a fresh set of distinct numbers
    pub fn generate<R: Rng>(&self, rng: &mut R) -> NumberSet {
        let count = self.params.balloon_count as usize;
        let mut numbers = Vec::with_capacity(count);
        while numbers.len() < count {
            let n = rng.random_range(1..=self.params.max_number);
            if !numbers.contains(&n) {
                numbers.push(n);
            }
        }
        NumberSet(numbers)
    }
}
