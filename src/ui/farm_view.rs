//! Farm rendering — the tile grid plus one sprite and countdown label per
//! planted crop, kept in sync with the session grid every frame.

use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::farm::growth;
use crate::input::cell_to_world;
use crate::session::GameSession;
use crate::shared::*;

/// Sprite entity for each occupied cell. Labels are children of their
/// sprite, so despawning the sprite takes the label with it.
#[derive(Resource, Debug, Default)]
pub struct CropSprites {
    pub by_cell: HashMap<(usize, usize), Entity>,
}

#[derive(Component)]
pub struct CropSpriteMarker;

/// Countdown/reward label over one cell's crop.
#[derive(Component)]
pub struct CropLabel {
    pub row: usize,
    pub col: usize,
}

fn stage_size(stage: CropStage) -> f32 {
    match stage {
        CropStage::Seed => 20.0,
        CropStage::Sprout => 34.0,
        CropStage::Ready => 48.0,
    }
}

/// Static scene: dirt backdrop and the 7x7 grass tiles. Spawned once and
/// never despawned; resets only change what grows on top.
pub fn spawn_field(mut commands: Commands) {
    let field_span = GRID_SIZE as f32 * TILE_SIZE;
    commands.spawn((
        Sprite {
            color: super::PANEL_BROWN,
            custom_size: Some(Vec2::splat(field_span + 16.0)),
            ..default()
        },
        Transform::from_xyz(0.0, FARM_Y_OFFSET, -2.0),
    ));

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let pos = cell_to_world(row, col);
            commands.spawn((
                Sprite {
                    color: super::GRASS_GREEN,
                    custom_size: Some(Vec2::splat(TILE_SIZE - 4.0)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, -1.0),
            ));
        }
    }
}

/// Reconcile crop sprites with the session grid: despawn sprites for
/// harvested cells, spawn for new plantings, recolor and resize for
/// stage changes.
pub fn sync_crop_sprites(
    mut commands: Commands,
    session: Res<GameSession>,
    mut sprites: ResMut<CropSprites>,
    mut sprite_query: Query<&mut Sprite, With<CropSpriteMarker>>,
) {
    sprites.by_cell.retain(|&(row, col), &mut entity| {
        if session.farm.get(row, col).is_some() {
            true
        } else {
            commands.entity(entity).despawn_recursive();
            false
        }
    });

    for (row, col, crop) in session.farm.iter_crops() {
        match sprites.by_cell.get(&(row, col)) {
            Some(&entity) => {
                if let Ok(mut sprite) = sprite_query.get_mut(entity) {
                    sprite.color = super::crop_color(crop.kind, crop.stage);
                    sprite.custom_size = Some(Vec2::splat(stage_size(crop.stage)));
                }
            }
            None => {
                let pos = cell_to_world(row, col);
                let entity = commands
                    .spawn((
                        CropSpriteMarker,
                        Sprite {
                            color: super::crop_color(crop.kind, crop.stage),
                            custom_size: Some(Vec2::splat(stage_size(crop.stage))),
                            ..default()
                        },
                        Transform::from_xyz(pos.x, pos.y, 0.0),
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            CropLabel { row, col },
                            Text2d::new(String::new()),
                            TextFont {
                                font_size: 13.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                            Transform::from_xyz(0.0, TILE_SIZE * 0.5 - 6.0, 1.0),
                        ));
                    })
                    .id();
                sprites.by_cell.insert((row, col), entity);
            }
        }
    }
}

/// Per-crop label: countdown to the next stage, or the reward once Ready.
/// Hidden while paused, since the countdown would be lying.
pub fn sync_crop_labels(
    session: Res<GameSession>,
    mut labels: Query<(&CropLabel, &mut Text2d, &mut Visibility)>,
) {
    let now = session.clock.now();
    for (label, mut text, mut visibility) in &mut labels {
        let Some(crop) = session.farm.get(label.row, label.col) else {
            continue; // sprite despawn is already queued
        };
        *visibility = if session.clock.is_paused() {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        **text = match growth::secs_to_next_stage(crop, now) {
            Some(secs) => {
                let tag = match crop.stage {
                    CropStage::Seed => "S",
                    _ => "R",
                };
                format!("{}:{}s", tag, secs.ceil() as u64)
            }
            None => format!("${}", crop.kind.harvest_reward()),
        };
    }
}
