use bevy::prelude::*;

use crate::drops::DropId;

/// Session status. The session owns it and Bevy's state machine mirrors it for presentation.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Requests coming from buttons, keyboard shortcuts and Ribbit.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Reset,
    SelectDifficulty(String),
}

/// A drop landed in the catcher.
#[derive(Event, Clone, Copy, Debug)]
pub struct DropCaught {
    pub score: u32,
    /// Centre of the drop, in play-area space
    pub at: Vec2,
}

/// The score hit a configured milestone.
#[derive(Event, Clone, Copy, Debug)]
pub struct MilestoneReached {
    pub score: u32,
    pub message: &'static str,
}

/// The round is over.
#[derive(Event, Clone, Copy, Debug)]
pub struct RoundEnded {
    pub final_score: u32,
    /// False when the round was cut short by Ribbit rather than by the countdown
    pub timed_out: bool,
}

/// Marker for the catcher sprite
#[derive(Component)]
pub struct CatcherSprite;

/// Sprite of a drop that is still falling
#[derive(Component)]
pub struct DropSprite(pub DropId);

/// Game configuration constants
pub mod config {
    use core::time::Duration;

    use bevy::prelude::Vec2;

    // Catcher configuration
    pub const CATCHER_SIZE: Vec2 = Vec2::new(80.0, 40.0);
    pub const CATCHER_FLOOR_GAP: f32 = 10.0; // Space between the catcher and the bottom edge
    pub const KEYBOARD_STEP: f32 = 30.0;

    // Drop configuration
    pub const DROP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const MISS_MARGIN: f32 = 20.0; // Drops whose top passes this far above the bottom are lost
    pub const FALL_TICK: Duration = Duration::from_millis(20);

    // Session clock
    pub const CLOCK_TICK: Duration = Duration::from_secs(1);

    // Effects
    pub const DING_COOLDOWN: Duration = Duration::from_millis(80);
    pub const DING_FREQUENCY: f32 = 880.0;
    pub const DING_LENGTH: Duration = Duration::from_millis(400);
    pub const DING_VOLUME: f32 = 0.12;
    pub const CATCH_POPUP: Duration = Duration::from_millis(600);
    pub const MILESTONE_BANNER: Duration = Duration::from_secs(3);
    pub const GAME_OVER_BANNER: Duration = Duration::from_millis(2500);
}
