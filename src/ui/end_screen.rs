//! End screen — win/lose banner, final tally, top-5 scoreboard, name
//! entry for a qualifying won run, and replay/quit buttons.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::input::NameEntry;
use crate::scores::ScoreBoard;
use crate::session::GameSession;
use crate::shared::*;

#[derive(Component)]
pub struct EndScreenRoot;

#[derive(Component)]
pub struct NameEntryText;

#[derive(Component)]
pub struct SaveStatusText;

#[derive(Component)]
pub struct ScoreboardText;

#[derive(Component)]
pub struct ReplayButton;

#[derive(Component)]
pub struct QuitButton;

pub fn spawn_end_screen(
    mut commands: Commands,
    session: Res<GameSession>,
    scoreboard: Res<ScoreBoard>,
) {
    let won = session.outcome() == GameOutcome::Won;
    let (banner, banner_color) = if won {
        ("YOU WIN!", Color::srgb(1.0, 0.85, 0.2))
    } else {
        ("GAME OVER", Color::srgb(0.9, 0.2, 0.2))
    };
    let detail = if won {
        format!("Final score: {} coins", session.wallet.coins)
    } else {
        format!(
            "Day {} quota was {} coins, you had {}",
            session.day.current_day + 1,
            session.day.quota(),
            session.wallet.coins
        )
    };

    commands
        .spawn((
            EndScreenRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.88)),
            GlobalZIndex(20),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(banner),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(banner_color),
                PickingBehavior::IGNORE,
            ));
            root.spawn((
                Text::new(detail),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));

            if scoreboard.can_enter_name() {
                root.spawn((
                    Text::new("New high score! Type your name, Enter to save:"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.9, 1.0)),
                    PickingBehavior::IGNORE,
                ));
                root.spawn((
                    NameEntryText,
                    Text::new("_"),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    PickingBehavior::IGNORE,
                ));
            }

            root.spawn((
                SaveStatusText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                PickingBehavior::IGNORE,
            ));

            root.spawn((
                ScoreboardText,
                Text::new(scoreboard_lines(&scoreboard)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(16.0),
                margin: UiRect::top(Val::Px(12.0)),
                ..default()
            })
            .with_children(|row| {
                spawn_button(row, ReplayButton, "Replay (R)");
                spawn_button(row, QuitButton, "Quit (Q)");
            });
        });
}

fn spawn_button(parent: &mut ChildBuilder, marker: impl Component, label: &str) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(super::SHOP_BG),
            BorderColor(super::PANEL_BROWN),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::BLACK),
                PickingBehavior::IGNORE,
            ));
        });
}

fn scoreboard_lines(scoreboard: &ScoreBoard) -> String {
    let mut text = String::from("TOP SCORES\n");
    let top = scoreboard.top();
    if top.is_empty() {
        text.push_str("(none yet)");
    }
    for (i, entry) in top.iter().enumerate() {
        text.push_str(&format!("{}. {} - {}\n", i + 1, entry.name, entry.score));
    }
    text
}

pub fn despawn_end_screen(mut commands: Commands, roots: Query<Entity, With<EndScreenRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
}

/// Mirror the typed buffer, with a cursor underscore while entry is open.
pub fn update_name_entry_text(
    entry: Res<NameEntry>,
    scoreboard: Res<ScoreBoard>,
    mut query: Query<&mut Text, With<NameEntryText>>,
) {
    for mut text in &mut query {
        **text = if scoreboard.can_enter_name() {
            format!("{}_", entry.buffer)
        } else {
            entry.buffer.clone()
        };
    }
}

pub fn update_save_status_text(
    scoreboard: Res<ScoreBoard>,
    mut query: Query<&mut Text, With<SaveStatusText>>,
) {
    for mut text in &mut query {
        **text = if let Some(rank) = scoreboard.saved_rank {
            format!("Saved at rank #{}", rank)
        } else if scoreboard.save_error.is_some() {
            "Score not saved (write failed). Press Enter to retry.".to_string()
        } else {
            String::new()
        };
    }
}

/// Refresh the board after a save lands.
pub fn update_scoreboard_text(
    scoreboard: Res<ScoreBoard>,
    mut query: Query<&mut Text, With<ScoreboardText>>,
) {
    if !scoreboard.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = scoreboard_lines(&scoreboard);
    }
}

pub fn handle_end_buttons(
    replay: Query<&Interaction, (Changed<Interaction>, With<ReplayButton>)>,
    quit: Query<&Interaction, (Changed<Interaction>, With<QuitButton>)>,
    mut reset_events: EventWriter<ResetCommand>,
    mut exit_events: EventWriter<AppExit>,
) {
    for interaction in &replay {
        if *interaction == Interaction::Pressed {
            reset_events.send(ResetCommand);
        }
    }
    for interaction in &quit {
        if *interaction == Interaction::Pressed {
            exit_events.send(AppExit::Success);
        }
    }
}
