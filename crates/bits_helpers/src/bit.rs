#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::{AssetMetaCheck, AssetPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{
    Backends, PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority,
};
use bevy::state::app::StatesPlugin;
use bevy::window::{PresentMode, WindowMode, WindowResolution};

use crate::{RibbitCommunicationPlugin, RibbitMessageHandler};

#[cfg(not(target_arch = "wasm32"))]
pub const FONT: &str = "../../bits_helpers/assets/fonts/FiraSans-Bold.ttf";
#[cfg(target_arch = "wasm32")]
pub const FONT: &str = concat!(
    "../../bits_helpers-",
    env!("CARGO_PKG_VERSION"),
    "/assets/fonts/FiraSans-Bold.ttf"
);

// typical smartphone screen ratio (9:16)
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

/// Creates a Bevy app with default settings to make Ribbit work.
/// Every bit starts from this app so the platform integration stays identical across bits.
#[allow(unused_variables, reason = "bit_version is used in wasm")]
pub fn get_default_app<T: RibbitMessageHandler>(bit_name: &str, bit_version: &str) -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin(bit_name, bit_version))
            .set(window_plugin(bit_name))
            .set(render_plugin()),
    );

    // This plugin is useful to preserve battery life on mobile.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(Color::BLACK));

    app.add_plugins(RibbitCommunicationPlugin::<T>::default());

    app
}

/// Creates a windowless app that only carries time, task pools and states.
///
/// Game logic plugins can be added on top of it and stepped with `App::update`.
pub fn get_headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app
}

#[allow(unused_variables, reason = "bit_name and bit_version are used in wasm")]
fn asset_plugin(bit_name: &str, bit_version: &str) -> AssetPlugin {
    AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,

        #[cfg(not(target_arch = "wasm32"))]
        file_path: "assets".to_string(),
        #[cfg(target_arch = "wasm32")]
        file_path: format!("bits/{bit_name}-{bit_version}/assets"),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    }
}

fn window_plugin(bit_name: &str) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: bit_name.to_string(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#bit".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }
}

fn render_plugin() -> RenderPlugin {
    RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            backends: Some(Backends::BROWSER_WEBGPU | Backends::GL),
            power_preference: PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    }
}
