use core::time::Duration;

use bevy::math::Vec2;
use bevy::prelude::Resource;
use bevy::time::{Timer, TimerMode};
use bits_helpers::play_area::PLAY_AREA;
use tracing::{debug, info, warn};

use crate::catcher::{Catcher, Direction};
use crate::core::GameState;
use crate::core::config::{
    CATCHER_SIZE, CLOCK_TICK, DROP_SIZE, FALL_TICK, KEYBOARD_STEP, MISS_MARGIN,
};
use crate::difficulty::{self, DifficultyProfile};
use crate::drops::{DropField, DropId, DropState};
use crate::error::SessionError;
use crate::milestones::Milestones;

/// Things that happened inside the session, for presentation and effects to pick up.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    DropSpawned(DropId),
    DropCaught { id: DropId, score: u32, at: Vec2 },
    DropMissed(DropId),
    MilestoneReached { score: u32, message: &'static str },
    RoundEnded { final_score: u32, timed_out: bool },
}

/// One game of drop catching: status, score, countdown, catcher and falling drops.
///
/// The session runs on three kinds of periodic activity while a round is running: the
/// one-second clock, the spawner and one fall subscription per drop. [`Session::advance`] is the
/// only place where time moves forward, so every handler runs to completion before the next one.
#[derive(Resource, Debug)]
pub struct Session {
    status: GameState,
    score: u32,
    time_remaining: u32,
    profile: DifficultyProfile,
    catcher: Catcher,
    drops: DropField,
    clock: Timer,
    spawner: Timer,
    milestones: Milestones,
    play_area: Vec2,
    rng: fastrand::Rng,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DifficultyProfile::baseline(), fastrand::Rng::new())
    }
}

impl Session {
    pub fn new(profile: DifficultyProfile, rng: fastrand::Rng) -> Self {
        Self {
            status: GameState::Idle,
            score: 0,
            time_remaining: profile.round_duration_secs(),
            clock: Timer::new(CLOCK_TICK, TimerMode::Repeating),
            spawner: Timer::new(profile.spawn_interval(), TimerMode::Repeating),
            profile,
            catcher: Catcher::new(CATCHER_SIZE, PLAY_AREA),
            drops: DropField::default(),
            milestones: Milestones::default(),
            play_area: PLAY_AREA,
            rng,
            events: Vec::new(),
        }
    }

    pub const fn status(&self) -> GameState {
        self.status
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whole seconds left in the round
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub const fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub const fn catcher(&self) -> &Catcher {
        &self.catcher
    }

    pub const fn drops(&self) -> &DropField {
        &self.drops
    }

    pub const fn milestones(&self) -> &Milestones {
        &self.milestones
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    /// Starts a fresh round from Idle or Ended.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.forbid_status(GameState::Running, "start")?;

        self.score = 0;
        self.time_remaining = self.profile.round_duration_secs();
        self.discard_drops();
        self.clock = Timer::new(CLOCK_TICK, TimerMode::Repeating);
        self.spawner = Timer::new(self.profile.spawn_interval(), TimerMode::Repeating);
        self.status = GameState::Running;

        info!(
            difficulty = self.profile.name(),
            seconds = self.time_remaining,
            "Round started"
        );
        Ok(())
    }

    /// Stops the running round, freezing its score.
    pub fn end(&mut self) -> Result<(), SessionError> {
        self.require_status(GameState::Running, "end")?;
        self.finish(false);
        Ok(())
    }

    /// Returns to Idle with a zero score and a full countdown, from any status.
    pub fn reset(&mut self) {
        self.discard_drops();
        self.score = 0;
        self.time_remaining = self.profile.round_duration_secs();
        self.status = GameState::Idle;

        info!("Session reset");
    }

    /// One second of the round clock.
    pub fn tick_second(&mut self) -> Result<(), SessionError> {
        self.require_status(GameState::Running, "count down")?;
        self.count_down();
        Ok(())
    }

    /// Switches difficulty, falling back to the baseline profile for unknown names.
    ///
    /// During a round the score and countdown are kept. Drops already falling keep the speed
    /// they spawned with.
    pub fn select_difficulty(&mut self, name: &str) -> Result<(), SessionError> {
        match difficulty::select_difficulty(name) {
            Ok(profile) => {
                self.apply_profile(profile);
                Ok(())
            }
            Err(err) => {
                warn!("{err}, using the {} profile", DifficultyProfile::baseline().name());
                self.apply_profile(DifficultyProfile::baseline());
                Err(err)
            }
        }
    }

    /// Replaces the active profile.
    ///
    /// A running round restarts its spawn cadence. An idle session shows the new round length.
    pub fn apply_profile(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
        match self.status {
            GameState::Running => {
                self.spawner = Timer::new(self.profile.spawn_interval(), TimerMode::Repeating);
            }
            GameState::Idle => self.time_remaining = self.profile.round_duration_secs(),
            GameState::Ended => {}
        }
        debug!(difficulty = self.profile.name(), "Difficulty selected");
    }

    /// Keyboard step. Accepted in every status.
    pub fn step_catcher(&mut self, direction: Direction) {
        self.catcher.step(direction, KEYBOARD_STEP);
    }

    /// Pointer tracking, only while a round is running.
    pub fn track_pointer(&mut self, pointer_x: f32) -> Result<(), SessionError> {
        self.require_status(GameState::Running, "track the pointer")?;
        self.catcher.follow_pointer(pointer_x);
        Ok(())
    }

    /// Spawns a drop right away, outside of the spawn cadence.
    pub(crate) fn spawn_drop(&mut self) -> Result<DropId, SessionError> {
        self.require_status(GameState::Running, "spawn a drop")?;
        Ok(self.spawn())
    }

    /// One fall update for a single drop.
    pub fn fall_tick(&mut self, id: DropId) -> Result<DropState, SessionError> {
        self.fall(id).ok_or(SessionError::StaleDrop(id))
    }

    /// Moves the round forward by `delta`, firing every due clock, spawn and fall tick in order.
    ///
    /// Timers that fall due at the same instant fire drops first, then the spawner, then the
    /// clock. Nothing happens outside of a running round.
    pub fn advance(&mut self, delta: Duration) {
        let mut left = delta;

        while self.status == GameState::Running && !left.is_zero() {
            let step = self.until_next_deadline().min(left);
            left -= step;

            for id in self.drops.tick_subscriptions(step) {
                self.fall(id);
            }
            if self.spawner.tick(step).just_finished() {
                self.spawn();
            }
            if self.clock.tick(step).just_finished() {
                self.count_down();
            }
        }
    }

    fn until_next_deadline(&self) -> Duration {
        let timers = self.clock.remaining().min(self.spawner.remaining());
        self.drops
            .until_next_fall()
            .map_or(timers, |fall| fall.min(timers))
    }

    fn spawn(&mut self) -> DropId {
        let max_x = (self.play_area.x - DROP_SIZE.x).max(0.0);
        let position = Vec2::new(self.rng.f32() * max_x, -DROP_SIZE.y);
        let id = self
            .drops
            .spawn(position, DROP_SIZE, self.profile.fall_speed(), FALL_TICK);

        self.events.push(SessionEvent::DropSpawned(id));
        id
    }

    fn fall(&mut self, id: DropId) -> Option<DropState> {
        let miss_line = self.play_area.y - MISS_MARGIN;
        let drop = self.drops.get(id)?;
        let landing = drop.bounds().center() + Vec2::Y * drop.speed();
        let state = self.drops.fall(id, self.catcher.bounds(), miss_line)?;

        match state {
            DropState::Caught => self.record_catch(id, landing),
            DropState::Missed => self.events.push(SessionEvent::DropMissed(id)),
            DropState::Falling => {}
        }
        Some(state)
    }

    fn record_catch(&mut self, id: DropId, at: Vec2) {
        self.score += 1;
        self.events.push(SessionEvent::DropCaught {
            id,
            score: self.score,
            at,
        });

        if let Some(message) = self.milestones.celebration_for(self.score) {
            info!(score = self.score, "Milestone reached");
            self.events.push(SessionEvent::MilestoneReached {
                score: self.score,
                message,
            });
        }
    }

    fn count_down(&mut self) {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finish(true);
        }
    }

    fn finish(&mut self, timed_out: bool) {
        let discarded = self.discard_drops();
        self.status = GameState::Ended;
        self.events.push(SessionEvent::RoundEnded {
            final_score: self.score,
            timed_out,
        });

        info!(score = self.score, discarded, timed_out, "Round ended");
    }

    fn discard_drops(&mut self) -> usize {
        self.drops.clear()
    }

    fn require_status(
        &self,
        status: GameState,
        action: &'static str,
    ) -> Result<(), SessionError> {
        if self.status == status {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn forbid_status(
        &self,
        status: GameState,
        action: &'static str,
    ) -> Result<(), SessionError> {
        if self.status == status {
            Err(self.invalid(action))
        } else {
            Ok(())
        }
    }

    const fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.status,
        }
    }
}
