use bevy::prelude::*;
use bits_helpers::input::pointer_moved_world_position;
use bits_helpers::play_area::world_to_play_area;
use leafwing_input_manager::prelude::*;

use crate::catcher::Direction;
use crate::catcher::inputs::{Action, create_input_map};
use crate::core::SessionCommand;
use crate::gameplay::SessionSystems;
use crate::session::Session;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<Action>::default())
            .add_systems(Startup, spawn_controls)
            .add_systems(
                Update,
                (keyboard_controls, track_pointer).before(SessionSystems),
            );
    }
}

fn spawn_controls(mut commands: Commands) {
    commands.spawn((
        Name::new("Controls"),
        InputManagerBundle::<Action> {
            input_map: create_input_map(),
            ..default()
        },
    ));
}

/// Keyboard steps are honoured whatever the session status.
pub fn keyboard_controls(
    query: Query<&ActionState<Action>>,
    mut session: ResMut<Session>,
    mut session_commands: EventWriter<SessionCommand>,
) {
    for action_state in &query {
        if action_state.just_pressed(&Action::MoveLeft) {
            session.step_catcher(Direction::Left);
        }
        if action_state.just_pressed(&Action::MoveRight) {
            session.step_catcher(Direction::Right);
        }
        if action_state.just_pressed(&Action::Start) {
            session_commands.send(SessionCommand::Start);
        }
        if action_state.just_pressed(&Action::Reset) {
            session_commands.send(SessionCommand::Reset);
        }
    }
}

/// Pointer tracking only moves the catcher while a round is running.
pub fn track_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    touch_input: Res<Touches>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<Session>,
) {
    let Some(world_position) =
        pointer_moved_world_position(&mut cursor_moved, &touch_input, &camera_query)
    else {
        return;
    };

    if let Err(err) = session.track_pointer(world_to_play_area(world_position).x) {
        trace!("Pointer ignored: {err}");
    }
}
