//! Session configuration
//!
//! Difficulty is the only thing the player picks. Policy, viewport and seed
//! come from the UI shell. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Balloon count and number range for this preset
    pub fn params(&self) -> DifficultyParams {
        match self {
            Difficulty::Easy => DifficultyParams { balloon_count: 5, max_number: 5 },
            Difficulty::Medium => DifficultyParams { balloon_count: 8, max_number: 10 },
            Difficulty::Hard => DifficultyParams { balloon_count: 10, max_number: 20 },
        }
    }
}

/// Round shape: how many balloons, drawn from which range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub balloon_count: u32,
    pub max_number: u32,
}

impl DifficultyParams {
    /// Check that a round of this shape can always be generated
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.balloon_count == 0 {
            return Err(ConfigError::EmptyRound);
        }
        if self.balloon_count > self.max_number {
            return Err(ConfigError::BalloonCountExceedsRange {
                balloon_count: self.balloon_count,
                max_number: self.max_number,
            });
        }
        Ok(())
    }
}

impl From<Difficulty> for DifficultyParams {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.params()
    }
}

/// How a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPolicy {
    /// Countdown clock; expiry ends the session
    Timed { duration_secs: u32 },
    /// No clock; a star every `milestone_every` correct pops, ends only on exit
    Endless { milestone_every: u64 },
}

impl Default for SessionPolicy {
    fn default() -> Self {
        SessionPolicy::Timed {
            duration_secs: SESSION_DURATION_SECS,
        }
    }
}

impl SessionPolicy {
    pub fn endless() -> Self {
        SessionPolicy::Endless {
            milestone_every: DEFAULT_MILESTONE_EVERY,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SessionPolicy::Timed { duration_secs: 0 } => Err(ConfigError::ZeroDuration),
            SessionPolicy::Endless { milestone_every: 0 } => Err(ConfigError::ZeroMilestone),
            _ => Ok(()),
        }
    }
}

/// Layout class, picked from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportClass {
    Compact,
    Regular,
}

impl ViewportClass {
    pub fn balloon_size(&self) -> f32 {
        match self {
            ViewportClass::Compact => BALLOON_SIZE_COMPACT,
            ViewportClass::Regular => BALLOON_SIZE_REGULAR,
        }
    }

    /// Seconds a balloon takes to float from the bottom edge to the top
    pub fn ascent_secs(&self) -> f32 {
        match self {
            ViewportClass::Compact => ASCENT_SECS_COMPACT,
            ViewportClass::Regular => ASCENT_SECS_REGULAR,
        }
    }
}

/// Play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn class(&self) -> ViewportClass {
        if self.width <= COMPACT_MAX_WIDTH {
            ViewportClass::Compact
        } else {
            ViewportClass::Regular
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if usable {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub params: DifficultyParams,
    pub policy: SessionPolicy,
    pub viewport: Viewport,
    /// Run seed for reproducibility
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            params: difficulty.params(),
            policy: SessionPolicy::default(),
            viewport: Viewport::default(),
            seed: 0,
        }
    }

    /// Custom round shape instead of a preset
    pub fn with_params(mut self, params: DifficultyParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        self.policy.validate()?;
        self.viewport.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for difficulty in Difficulty::ALL {
            let params = difficulty.params();
            assert!(params.validate().is_ok(), "{} preset invalid", difficulty.as_str());
            assert!(params.balloon_count <= params.max_number);
        }
        assert_eq!(Difficulty::Easy.params(), DifficultyParams { balloon_count: 5, max_number: 5 });
        assert_eq!(Difficulty::Medium.params(), DifficultyParams { balloon_count: 8, max_number: 10 });
        assert_eq!(Difficulty::Hard.params(), DifficultyParams { balloon_count: 10, max_number: 20 });
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_rejects_impossible_params() {
        let params = DifficultyParams { balloon_count: 6, max_number: 5 };
        assert_eq!(
            params.validate(),
            Err(ConfigError::BalloonCountExceedsRange { balloon_count: 6, max_number: 5 })
        );
        let empty = DifficultyParams { balloon_count: 0, max_number: 5 };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyRound));
    }

    #[test]
    fn test_policy_and_viewport_validation() {
        assert_eq!(
            SessionPolicy::Timed { duration_secs: 0 }.validate(),
            Err(ConfigError::ZeroDuration)
        );
        assert!(SessionPolicy::endless().validate().is_ok());
        assert!(Viewport::new(0.0, 600.0).validate().is_err());
        assert!(Viewport::new(f32::NAN, 600.0).validate().is_err());

        let config = SessionConfig::new(Difficulty::Hard).with_viewport(Viewport::new(-1.0, 10.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_viewport_class() {
        assert_eq!(Viewport::new(768.0, 1024.0).class(), ViewportClass::Compact);
        assert_eq!(Viewport::new(769.0, 1024.0).class(), ViewportClass::Regular);
        assert!(ViewportClass::Compact.ascent_secs() < ViewportClass::Regular.ascent_secs());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = SessionConfig::new(Difficulty::Medium)
            .with_policy(SessionPolicy::endless())
            .with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
