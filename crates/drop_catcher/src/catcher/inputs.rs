use bevy::prelude::{KeyCode, Reflect};
use leafwing_input_manager::prelude::*;

// Keyboard actions. Pointer tracking is read directly from cursor and touch events.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Start,
    Reset,
}

pub fn create_input_map() -> InputMap<Action> {
    let mut input_map = InputMap::default();

    input_map.insert(Action::MoveLeft, KeyCode::ArrowLeft);
    input_map.insert(Action::MoveLeft, KeyCode::KeyA);
    input_map.insert(Action::MoveRight, KeyCode::ArrowRight);
    input_map.insert(Action::MoveRight, KeyCode::KeyD);
    input_map.insert(Action::Start, KeyCode::Enter);
    input_map.insert(Action::Start, KeyCode::Space);
    input_map.insert(Action::Reset, KeyCode::KeyR);

    input_map
}
