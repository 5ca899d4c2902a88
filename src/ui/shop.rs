//! Shop bar — one button per seed kind plus pause and help buttons.

use bevy::prelude::*;

use crate::session::{GameSession, HelpVisible};
use crate::shared::*;

#[derive(Component)]
pub struct ShopRoot;

/// A buy button for one seed kind.
#[derive(Component)]
pub struct SeedButton(pub CropKind);

/// The owned-count label inside a seed button.
#[derive(Component)]
pub struct SeedCountText(pub CropKind);

#[derive(Component)]
pub struct PauseButton;

#[derive(Component)]
pub struct PauseButtonLabel;

#[derive(Component)]
pub struct HelpButton;

pub fn spawn_shop_bar(mut commands: Commands) {
    commands
        .spawn((
            ShopRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(30.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(64.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(super::SHOP_BG),
        ))
        .with_children(|bar| {
            for kind in CropKind::ALL {
                bar.spawn((
                    SeedButton(kind),
                    Button,
                    Node {
                        width: Val::Px(92.0),
                        height: Val::Px(54.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(super::SHOP_BG),
                    BorderColor(super::PANEL_BROWN),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(kind.name()),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::BLACK),
                        PickingBehavior::IGNORE,
                    ));
                    button.spawn((
                        Text::new(format!("${}", kind.seed_cost())),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.0, 0.6, 0.0)),
                        PickingBehavior::IGNORE,
                    ));
                    button.spawn((
                        SeedCountText(kind),
                        Text::new("0"),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.4, 0.4)),
                        PickingBehavior::IGNORE,
                    ));
                });
            }

            bar.spawn((
                PauseButton,
                Button,
                Node {
                    width: Val::Px(44.0),
                    height: Val::Px(40.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(super::SHOP_BG),
                BorderColor(super::PANEL_BROWN),
            ))
            .with_children(|button| {
                button.spawn((
                    PauseButtonLabel,
                    Text::new("||"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    PickingBehavior::IGNORE,
                ));
            });

            bar.spawn((
                HelpButton,
                Button,
                Node {
                    width: Val::Px(36.0),
                    height: Val::Px(40.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(super::SHOP_BG),
                BorderColor(super::PANEL_BROWN),
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new("?"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    PickingBehavior::IGNORE,
                ));
            });
        });
}

pub fn update_seed_counts(
    session: Res<GameSession>,
    mut query: Query<(&SeedCountText, &mut Text)>,
) {
    for (counter, mut text) in &mut query {
        **text = session.wallet.seed_count(counter.0).to_string();
    }
}

pub fn update_pause_button_label(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<PauseButtonLabel>>,
) {
    for mut text in &mut query {
        **text = if session.clock.is_paused() { ">" } else { "||" }.to_string();
    }
}

pub fn handle_seed_buttons(
    interactions: Query<(&Interaction, &SeedButton), Changed<Interaction>>,
    mut buy_events: EventWriter<BuySeedCommand>,
) {
    for (interaction, button) in &interactions {
        if *interaction == Interaction::Pressed {
            buy_events.send(BuySeedCommand { kind: button.0 });
        }
    }
}

pub fn handle_pause_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<PauseButton>)>,
    mut pause_events: EventWriter<TogglePauseCommand>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            pause_events.send(TogglePauseCommand);
        }
    }
}

pub fn handle_help_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<HelpButton>)>,
    mut help: ResMut<HelpVisible>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            help.0 = !help.0;
        }
    }
}

/// Hover feedback for every shop-bar button.
pub fn update_button_hover(
    mut interactions: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in &mut interactions {
        *background = match interaction {
            Interaction::Hovered | Interaction::Pressed => BackgroundColor(super::SHOP_HOVER),
            Interaction::None => BackgroundColor(super::SHOP_BG),
        };
    }
}
