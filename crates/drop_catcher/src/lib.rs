mod audio;
pub mod catcher;
pub mod collision;
pub mod core;
pub mod difficulty;
pub mod drops;
pub mod error;
pub mod gameplay;
pub mod milestones;
mod ribbit;
pub mod session;
mod ui;

use bevy::prelude::*;
use ribbit::DropCatcher;

pub use crate::error::SessionError;
pub use crate::session::{Session, SessionEvent};

pub fn run() {
    bits_helpers::get_default_app::<DropCatcher>(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
    .add_plugins(gameplay::SessionPlugin)
    .add_plugins(gameplay::PlayfieldPlugin)
    .add_plugins(catcher::controls::ControlsPlugin)
    .add_plugins(ui::UiPlugin)
    .add_plugins(audio::CatchAudioPlugin)
    .add_systems(
        Update,
        ribbit::report_round_end.after(gameplay::SessionSystems),
    )
    .run();
}
