use core::time::Duration;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::SessionError;

/// Spawning faster than this would stall the session scheduler.
const MIN_SPAWN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const fn profile(self) -> DifficultyProfile {
        let (fall_speed, spawn_interval_ms) = match self {
            Self::Easy => (3.0, 1200),
            Self::Medium => (5.0, 900),
            Self::Hard => (8.0, 500),
            Self::Impossible => (10.0, 200),
        };

        DifficultyProfile {
            difficulty: self,
            fall_speed,
            spawn_interval: Duration::from_millis(spawn_interval_ms),
            round_duration_secs: 60,
        }
    }
}

/// Timing and speed parameters of one difficulty. Copied into the session when selected.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyProfile {
    difficulty: Difficulty,
    fall_speed: f32,
    spawn_interval: Duration,
    round_duration_secs: u32,
}

impl DifficultyProfile {
    /// Profile used whenever a requested difficulty cannot be honoured.
    pub const fn baseline() -> Self {
        Difficulty::Medium.profile()
    }

    pub fn name(&self) -> &'static str {
        self.difficulty.into()
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Units a drop falls per fall tick
    pub const fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    pub const fn round_duration_secs(&self) -> u32 {
        self.round_duration_secs
    }

    #[must_use]
    pub const fn with_fall_speed(mut self, fall_speed: f32) -> Self {
        self.fall_speed = fall_speed;
        self
    }

    #[must_use]
    pub fn with_spawn_interval(mut self, spawn_interval: Duration) -> Self {
        self.spawn_interval = spawn_interval.max(MIN_SPAWN_INTERVAL);
        self
    }

    #[must_use]
    pub const fn with_round_duration(mut self, round_duration_secs: u32) -> Self {
        self.round_duration_secs = round_duration_secs;
        self
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Looks up the profile of a difficulty by name, ignoring case and surrounding whitespace.
pub fn select_difficulty(name: &str) -> Result<DifficultyProfile, SessionError> {
    let Ok(difficulty) = name.trim().parse::<Difficulty>() else {
        return Err(SessionError::InvalidDifficulty(name.to_owned()));
    };
    Ok(difficulty.profile())
}
