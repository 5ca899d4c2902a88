//! HUD readouts — coins, day, quota, day timer, earned-today, seed total.
//! One marker component and one polling update system per field.

use bevy::prelude::*;

use crate::session::GameSession;
use crate::shared::*;

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudCoinsText;

#[derive(Component)]
pub struct HudDayText;

#[derive(Component)]
pub struct HudQuotaText;

#[derive(Component)]
pub struct HudTimerText;

#[derive(Component)]
pub struct HudEarnedText;

#[derive(Component)]
pub struct HudSeedsText;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(30.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(18.0),
                padding: UiRect::horizontal(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(super::SHOP_BG),
            PickingBehavior::IGNORE,
        ))
        .with_children(|bar| {
            let field = |text: &str| {
                (
                    Text::new(text),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    PickingBehavior::IGNORE,
                )
            };
            bar.spawn((HudCoinsText, field("Coins:15")));
            bar.spawn((HudDayText, field("Day:1")));
            bar.spawn((HudQuotaText, field("Q:20")));
            bar.spawn((HudTimerText, field("1:30")));
            bar.spawn((HudEarnedText, field("E:0")));
            bar.spawn((HudSeedsText, field("Seeds:0")));
        });
}

pub fn update_coins_text(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<HudCoinsText>>,
) {
    for mut text in &mut query {
        **text = format!("Coins:{}", session.wallet.coins);
    }
}

pub fn update_day_text(session: Res<GameSession>, mut query: Query<&mut Text, With<HudDayText>>) {
    for mut text in &mut query {
        // 1-based for display.
        **text = format!("Day:{}/{}", session.day.current_day + 1, TOTAL_DAYS);
    }
}

pub fn update_quota_text(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<HudQuotaText>>,
) {
    for mut text in &mut query {
        **text = format!("Q:{}", session.day.quota());
    }
}

/// Time remaining in the day, or the PAUSED sentinel while the clock is
/// frozen.
pub fn update_timer_text(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<HudTimerText>>,
) {
    for mut text in &mut query {
        if session.clock.is_paused() {
            **text = "PAUSED".to_string();
        } else {
            let left = session.day.time_left(session.clock.now()) as u64;
            **text = format!("{}:{:02}", left / 60, left % 60);
        }
    }
}

pub fn update_earned_text(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<HudEarnedText>>,
) {
    for mut text in &mut query {
        **text = format!("E:{}", session.earned_today());
    }
}

pub fn update_seeds_text(
    session: Res<GameSession>,
    mut query: Query<&mut Text, With<HudSeedsText>>,
) {
    for mut text in &mut query {
        **text = format!("Seeds:{}", session.wallet.total_seeds());
    }
}
