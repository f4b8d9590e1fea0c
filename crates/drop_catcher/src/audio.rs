use core::time::Duration;

use bevy::audio::{Pitch, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::core::DropCaught;
use crate::core::config::{DING_COOLDOWN, DING_FREQUENCY, DING_LENGTH, DING_VOLUME};
use crate::gameplay::SessionSystems;

/// Keeps catch dings from stacking up when drops land in quick succession.
#[derive(Resource, Debug)]
pub struct DingLimiter {
    cooldown: Duration,
    last_ding: Option<Duration>,
}

impl DingLimiter {
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_ding: None,
        }
    }

    /// Records a ding at `now` unless the previous one is more recent than the cooldown.
    pub fn try_ding(&mut self, now: Duration) -> bool {
        let cooling_down = self
            .last_ding
            .is_some_and(|last| now.saturating_sub(last) < self.cooldown);
        if cooling_down {
            return false;
        }

        self.last_ding = Some(now);
        true
    }
}

#[derive(Resource)]
struct DingSound(Handle<Pitch>);

pub struct CatchAudioPlugin;

impl Plugin for CatchAudioPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DingLimiter::new(DING_COOLDOWN))
            .add_systems(Startup, create_ding)
            .add_systems(Update, play_catch_ding.after(SessionSystems));
    }
}

fn create_ding(mut commands: Commands, mut pitches: ResMut<Assets<Pitch>>) {
    let handle = pitches.add(Pitch::new(DING_FREQUENCY, DING_LENGTH));
    commands.insert_resource(DingSound(handle));
}

fn play_catch_ding(
    mut commands: Commands,
    mut drop_caught: EventReader<DropCaught>,
    time: Res<Time<Real>>,
    sound: Res<DingSound>,
    mut limiter: ResMut<DingLimiter>,
) {
    for _ in drop_caught.read() {
        if limiter.try_ding(time.elapsed()) {
            commands.spawn((
                AudioPlayer(sound.0.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::new(DING_VOLUME)),
            ));
        }
    }
}
