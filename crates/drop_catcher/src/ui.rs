use bevy::color::palettes::css::{DEEP_SKY_BLUE, GOLD, HOT_PINK, LIME, ORANGE, RED, WHITE};
use bevy::prelude::*;
use bits_helpers::FONT;
use bits_helpers::buttons::{
    CleanupMarker, button_feedback, cleanup_marked_entities, pressed_buttons, spawn_text_button,
};
use bits_helpers::floating_text::{FloatingTextPlugin, spawn_floating_text};
use bits_helpers::play_area::play_area_to_world;
use strum::IntoEnumIterator;

use crate::core::config::{CATCH_POPUP, GAME_OVER_BANNER, MILESTONE_BANNER};
use crate::core::{DropCaught, GameState, MilestoneReached, RoundEnded, SessionCommand};
use crate::difficulty::Difficulty;
use crate::gameplay::SessionSystems;
use crate::session::Session;

const CONFETTI: [Srgba; 6] = [RED, GOLD, LIME, DEEP_SKY_BLUE, HOT_PINK, ORANGE];

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FloatingTextPlugin)
            .add_systems(Startup, (spawn_hud, spawn_menu))
            .add_systems(
                Update,
                (
                    button_feedback,
                    handle_menu_buttons.before(SessionSystems),
                    (
                        update_hud,
                        show_menu_buttons.run_if(state_changed::<GameState>),
                        catch_popups,
                        milestone_banners,
                        round_end_banners,
                    )
                        .after(SessionSystems),
                ),
            )
            .add_systems(OnEnter(GameState::Ended), spawn_game_over_overlay)
            .add_systems(OnExit(GameState::Ended), cleanup_marked_entities);
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
enum MenuButton {
    Start,
    Reset,
    Difficulty(Difficulty),
}

impl MenuButton {
    /// Start only before a round and reset only after one. Difficulty is locked during a round.
    const fn visible_in(self, state: GameState) -> bool {
        match self {
            Self::Start => matches!(state, GameState::Idle),
            Self::Reset => matches!(state, GameState::Ended),
            Self::Difficulty(_) => !matches!(state, GameState::Running),
        }
    }

    fn command(self) -> SessionCommand {
        match self {
            Self::Start => SessionCommand::Start,
            Self::Reset => SessionCommand::Reset,
            Self::Difficulty(difficulty) => {
                SessionCommand::SelectDifficulty(difficulty.to_string())
            }
        }
    }
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct TimeText;

#[derive(Component)]
struct DifficultyText;

fn text_bundle(
    asset_server: &AssetServer,
    text: &str,
    font_size: f32,
) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn spawn_hud(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::all(Val::Px(12.0)),
            ..default()
        })
        .with_children(|hud| {
            hud.spawn((text_bundle(&asset_server, "Score: 0", 24.0), ScoreText));
            hud.spawn((text_bundle(&asset_server, "Time: 0", 24.0), TimeText));
        });
}

fn spawn_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Px(56.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|menu| {
            menu.spawn(Node::default()).with_children(|row| {
                spawn_text_button(row, &asset_server, "Start", MenuButton::Start);
                spawn_text_button(row, &asset_server, "Reset", MenuButton::Reset);
            });

            menu.spawn((text_bundle(&asset_server, "", 18.0), DifficultyText));

            menu.spawn(Node::default()).with_children(|row| {
                for difficulty in Difficulty::iter() {
                    let label: &'static str = difficulty.into();
                    let button = MenuButton::Difficulty(difficulty);
                    spawn_text_button(row, &asset_server, label, button);
                }
            });
        });
}

fn handle_menu_buttons(
    buttons: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    mut session_commands: EventWriter<SessionCommand>,
) {
    for button in pressed_buttons(&buttons) {
        session_commands.send(button.command());
    }
}

fn show_menu_buttons(
    state: Res<State<GameState>>,
    mut buttons: Query<(&MenuButton, &mut Node)>,
) {
    for (button, mut node) in &mut buttons {
        node.display = if button.visible_in(*state.get()) {
            Display::Flex
        } else {
            Display::None
        };
    }
}

fn update_hud(
    session: Res<Session>,
    mut score_text: Query<&mut Text, With<ScoreText>>,
    mut time_text: Query<&mut Text, (With<TimeText>, Without<ScoreText>)>,
    mut difficulty_text: Query<
        &mut Text,
        (With<DifficultyText>, Without<ScoreText>, Without<TimeText>),
    >,
) {
    if !session.is_changed() {
        return;
    }

    for mut text in &mut score_text {
        text.0 = format!("Score: {}", session.score());
    }
    for mut text in &mut time_text {
        text.0 = format!("Time: {}", session.time_remaining());
    }
    for mut text in &mut difficulty_text {
        text.0 = format!("Difficulty: {}", session.profile().name());
    }
}

fn catch_popups(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut drop_caught: EventReader<DropCaught>,
) {
    for caught in drop_caught.read() {
        spawn_floating_text(
            &mut commands,
            &asset_server,
            play_area_to_world(caught.at),
            "+1",
            WHITE,
            CATCH_POPUP,
        );
    }
}

fn milestone_banners(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut milestone_reached: EventReader<MilestoneReached>,
) {
    for milestone in milestone_reached.read() {
        info!("Milestone {}: {}", milestone.score, milestone.message);
        spawn_floating_text(
            &mut commands,
            &asset_server,
            Vec2::new(0.0, 80.0),
            milestone.message,
            GOLD,
            MILESTONE_BANNER,
        );
    }
}

fn round_end_banners(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut round_ended: EventReader<RoundEnded>,
) {
    for ended in round_ended.read() {
        for (i, color) in CONFETTI.into_iter().enumerate() {
            let x = (i as f32 - 2.5) * 50.0;
            spawn_floating_text(
                &mut commands,
                &asset_server,
                Vec2::new(x, 200.0),
                "*",
                color,
                GAME_OVER_BANNER,
            );
        }

        spawn_floating_text(
            &mut commands,
            &asset_server,
            Vec2::new(0.0, 150.0),
            &format!("Game Over! Your Score: {}", ended.final_score),
            WHITE,
            GAME_OVER_BANNER,
        );
    }
}

fn spawn_game_over_overlay(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    session: Res<Session>,
) {
    commands
        .spawn((
            CleanupMarker,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                bottom: Val::Px(120.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|overlay| {
            overlay.spawn(text_bundle(&asset_server, "Game Over!", 40.0));
            overlay.spawn(text_bundle(
                &asset_server,
                &format!("Final Score: {}", session.score()),
                28.0,
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_hidden_while_running_and_after_the_round() {
        let start = MenuButton::Start;
        assert!(start.visible_in(GameState::Idle), "offered before a round");
        assert!(!start.visible_in(GameState::Running), "hidden during a round");
        assert!(!start.visible_in(GameState::Ended), "reset comes first");
    }

    #[test]
    fn reset_only_after_the_round() {
        let reset = MenuButton::Reset;
        assert!(!reset.visible_in(GameState::Idle), "nothing to reset yet");
        assert!(!reset.visible_in(GameState::Running), "hidden during a round");
        assert!(reset.visible_in(GameState::Ended), "offered once the round is over");
    }

    #[test]
    fn difficulty_locked_during_a_round() {
        for difficulty in Difficulty::iter() {
            let button = MenuButton::Difficulty(difficulty);
            assert!(button.visible_in(GameState::Idle), "{difficulty} while idle");
            assert!(!button.visible_in(GameState::Running), "no {difficulty} while running");
            assert!(button.visible_in(GameState::Ended), "{difficulty} after the round");
        }
    }

    #[test]
    fn difficulty_buttons_send_their_name() {
        assert_eq!(
            MenuButton::Difficulty(Difficulty::Hard).command(),
            SessionCommand::SelectDifficulty("hard".to_owned()),
            "names round-trip through the session lookup"
        );
    }
}
