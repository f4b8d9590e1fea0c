use bevy::prelude::*;
use bevy::utils::HashSet;
use bits_helpers::play_area::{PLAY_AREA, rect_center_in_world};

use crate::core::config::{CATCHER_SIZE, DROP_SIZE};
use crate::core::{
    CatcherSprite, DropCaught, DropSprite, GameState, MilestoneReached, RoundEnded,
    SessionCommand,
};
use crate::session::{Session, SessionEvent};

const BACKGROUND_COLOR: Color = Color::srgb(0.53, 0.81, 0.92);
const CATCHER_COLOR: Color = Color::srgb(1.0, 0.79, 0.03);
const DROP_COLOR: Color = Color::srgb(0.0, 0.45, 0.85);

/// Systems that move the session forward. Input runs before, presentation after.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSystems;

/// Owns the [`Session`] and bridges it to Bevy events and states. Needs no window.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<Session>()
            .add_event::<SessionCommand>()
            .add_event::<DropCaught>()
            .add_event::<MilestoneReached>()
            .add_event::<RoundEnded>()
            .add_systems(
                Update,
                (
                    apply_session_commands,
                    advance_session,
                    publish_session_events,
                    mirror_session_state,
                )
                    .chain()
                    .in_set(SessionSystems),
            );
    }
}

/// Sprites for the play area, the catcher and every falling drop.
pub struct PlayfieldPlugin;

impl Plugin for PlayfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_playfield).add_systems(
            Update,
            (sync_catcher_sprite, sync_drop_sprites).after(SessionSystems),
        );
    }
}

fn apply_session_commands(
    mut session_commands: EventReader<SessionCommand>,
    mut session: ResMut<Session>,
) {
    for command in session_commands.read() {
        let result = match command {
            SessionCommand::Start => session.start(),
            SessionCommand::Reset => {
                session.reset();
                Ok(())
            }
            SessionCommand::SelectDifficulty(name) => session.select_difficulty(name),
        };

        if let Err(err) = result {
            debug!("Ignored {command:?}: {err}");
        }
    }
}

fn advance_session(time: Res<Time>, mut session: ResMut<Session>) {
    session.advance(time.delta());
}

fn publish_session_events(
    mut session: ResMut<Session>,
    mut drop_caught: EventWriter<DropCaught>,
    mut milestone_reached: EventWriter<MilestoneReached>,
    mut round_ended: EventWriter<RoundEnded>,
) {
    for event in session.drain_events() {
        match event {
            SessionEvent::DropSpawned(id) => trace!("Drop {id} spawned"),
            SessionEvent::DropMissed(id) => debug!("Drop {id} missed"),
            SessionEvent::DropCaught { id, score, at } => {
                debug!("Drop {id} caught, score {score}");
                drop_caught.send(DropCaught { score, at });
            }
            SessionEvent::MilestoneReached { score, message } => {
                milestone_reached.send(MilestoneReached { score, message });
            }
            SessionEvent::RoundEnded {
                final_score,
                timed_out,
            } => {
                round_ended.send(RoundEnded {
                    final_score,
                    timed_out,
                });
            }
        }
    }
}

/// The session decides the status. Bevy's state follows it so screens can hook `OnEnter`.
fn mirror_session_state(
    session: Res<Session>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if *state.get() != session.status() {
        next_state.set(session.status());
    }
}

fn spawn_playfield(mut commands: Commands, session: Res<Session>) {
    commands.spawn(Camera2d);

    commands.spawn((
        Name::new("Play area"),
        Sprite::from_color(BACKGROUND_COLOR, PLAY_AREA),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    let position = rect_center_in_world(session.catcher().bounds());
    commands.spawn((
        Name::new("Catcher"),
        Sprite::from_color(CATCHER_COLOR, CATCHER_SIZE),
        Transform::from_translation(position.extend(1.0)),
        CatcherSprite,
    ));
}

fn sync_catcher_sprite(
    session: Res<Session>,
    mut catcher: Query<&mut Transform, With<CatcherSprite>>,
) {
    let position = rect_center_in_world(session.catcher().bounds());
    for mut transform in &mut catcher {
        transform.translation = position.extend(transform.translation.z);
    }
}

/// One sprite per falling drop. Sprites of drops that left the session go away the same frame.
fn sync_drop_sprites(
    mut commands: Commands,
    session: Res<Session>,
    mut sprites: Query<(Entity, &DropSprite, &mut Transform)>,
) {
    let mut shown = HashSet::default();

    for (entity, sprite, mut transform) in &mut sprites {
        match session.drops().get(sprite.0) {
            Some(drop) => {
                let position = rect_center_in_world(drop.bounds());
                transform.translation = position.extend(transform.translation.z);
                shown.insert(sprite.0);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for drop in session.drops().iter().filter(|drop| !shown.contains(&drop.id())) {
        let position = rect_center_in_world(drop.bounds());
        commands.spawn((
            Sprite::from_color(DROP_COLOR, DROP_SIZE),
            Transform::from_translation(position.extend(2.0)),
            DropSprite(drop.id()),
        ));
    }
}
