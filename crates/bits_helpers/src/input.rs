use bevy::input::touch::Touch;
use bevy::prelude::*;

/// Latest pointer position in window coordinates, from either the mouse cursor or a touch.
///
/// Touches win over the mouse because mobile browsers also emit synthetic cursor events.
pub fn pointer_moved_screen_position(
    cursor_moved: &mut EventReader<CursorMoved>,
    touch_input: &Res<Touches>,
) -> Option<Vec2> {
    let cursor = cursor_moved.read().last().map(|event| event.position);

    let touch = touch_input
        .iter()
        .find(|touch| touch.delta() != Vec2::ZERO)
        .or_else(|| touch_input.iter_just_pressed().next())
        .map(Touch::position);

    touch.or(cursor)
}

/// Projects a window position onto the 2D world through the first camera.
pub fn screen_to_world_position(
    position: Vec2,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.iter().next()?;

    camera
        .viewport_to_world_2d(camera_transform, position)
        .ok()
}

/// Latest pointer position in world coordinates, if the pointer moved this frame.
pub fn pointer_moved_world_position(
    cursor_moved: &mut EventReader<CursorMoved>,
    touch_input: &Res<Touches>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = pointer_moved_screen_position(cursor_moved, touch_input)?;
    screen_to_world_position(position, camera)
}
