//! Instructions overlay. While it is open the session tick is gated off,
//! so the day timer and crops freeze without touching the pause flag.

use bevy::prelude::*;

use crate::session::HelpVisible;
use crate::shared::CropKind;

#[derive(Component)]
pub struct HelpOverlay;

#[derive(Component)]
pub struct HelpCloseButton;

const HELP_LINES: [&str; 8] = [
    "HOW TO PLAY",
    "",
    "Buy seeds from the shop bar, then click an empty tile to plant",
    "the cheapest seed you own. Crops grow Seed -> Sprout -> Ready.",
    "Click a Ready crop to harvest it for coins.",
    "Reach each day's coin quota before the 90-second day ends.",
    "Survive all 8 days to win. P pauses, H toggles this screen.",
    "Purchases are disabled while paused.",
];

/// Spawn or despawn the overlay to match the HelpVisible flag.
pub fn sync_help_overlay(
    mut commands: Commands,
    help: Res<HelpVisible>,
    overlays: Query<Entity, With<HelpOverlay>>,
) {
    if !help.is_changed() {
        return;
    }
    if help.0 && overlays.is_empty() {
        spawn_overlay(&mut commands);
    } else if !help.0 {
        for entity in &overlays {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn spawn_overlay(commands: &mut Commands) {
    commands
        .spawn((
            HelpOverlay,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            GlobalZIndex(10),
        ))
        .with_children(|overlay| {
            for line in HELP_LINES {
                overlay.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    PickingBehavior::IGNORE,
                ));
            }
            for kind in CropKind::ALL {
                overlay.spawn((
                    Text::new(format!(
                        "{}: ${} seed, {:.0}s to ready, sells for ${}",
                        kind.name(),
                        kind.seed_cost(),
                        kind.sprout_to_ready_secs(),
                        kind.harvest_reward()
                    )),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.9, 0.8)),
                    PickingBehavior::IGNORE,
                ));
            }
            overlay
                .spawn((
                    HelpCloseButton,
                    Button,
                    Node {
                        margin: UiRect::top(Val::Px(16.0)),
                        padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(super::SHOP_BG),
                    BorderColor(super::PANEL_BROWN),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Close"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::BLACK),
                        PickingBehavior::IGNORE,
                    ));
                });
        });
}

pub fn handle_close_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<HelpCloseButton>)>,
    mut help: ResMut<HelpVisible>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            help.0 = false;
        }
    }
}
