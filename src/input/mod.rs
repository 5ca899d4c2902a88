//! Input — the single point where hardware input becomes game commands.
//!
//! Pointer clicks over the farm become tile commands; keyboard shortcuts
//! become pause/help/replay/quit; on the win screen keystrokes feed the
//! name-entry buffer instead. Shop buttons are Bevy UI buttons handled by
//! the presentation layer, which emits the same shared command events.

use bevy::app::AppExit;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::scores::ScoreBoard;
use crate::session::HelpVisible;
use crate::shared::*;

/// Name being typed on the win screen. Read by the end-screen UI.
#[derive(Resource, Debug, Default)]
pub struct NameEntry {
    pub buffer: String,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NameEntry>()
            .add_systems(
                PreUpdate,
                (grid_click_input, playing_keys).run_if(in_state(Screen::Playing)),
            )
            .add_systems(
                PreUpdate,
                (name_entry_keys, game_over_keys).chain().run_if(in_state(Screen::GameOver)),
            )
            .add_systems(PreUpdate, quit_key)
            .add_systems(OnEnter(Screen::GameOver), clear_name_entry);
    }
}

// ─── Grid coordinate mapping ─────────────────────────────────────────────────

/// World-space centre of a farm tile. Row 0 is the top row.
pub fn cell_to_world(row: usize, col: usize) -> Vec2 {
    let half = (GRID_SIZE as f32 - 1.0) / 2.0;
    Vec2::new(
        (col as f32 - half) * TILE_SIZE,
        (half - row as f32) * TILE_SIZE + FARM_Y_OFFSET,
    )
}

/// Inverse of `cell_to_world`: which tile a world point falls on, if any.
pub fn world_to_cell(pos: Vec2) -> Option<(usize, usize)> {
    let half = (GRID_SIZE as f32 - 1.0) / 2.0;
    let col = (pos.x / TILE_SIZE + half + 0.5).floor();
    let row = (half - (pos.y - FARM_Y_OFFSET) / TILE_SIZE + 0.5).floor();
    if col < 0.0 || row < 0.0 || col >= GRID_SIZE as f32 || row >= GRID_SIZE as f32 {
        return None;
    }
    Some((row as usize, col as usize))
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Left click over the farm rectangle → TileInteractCommand. Clicks that
/// miss the grid (shop bar, margins) are simply not farm clicks.
fn grid_click_input(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    help: Res<HelpVisible>,
    mut tile_events: EventWriter<TileInteractCommand>,
) {
    if !mouse.just_pressed(MouseButton::Left) || help.0 {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };
    if let Some((row, col)) = world_to_cell(world_pos) {
        tile_events.send(TileInteractCommand { row, col });
    }
}

fn playing_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut help: ResMut<HelpVisible>,
    mut pause_events: EventWriter<TogglePauseCommand>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        pause_events.send(TogglePauseCommand);
    }
    if keys.just_pressed(KeyCode::KeyH) {
        help.0 = !help.0;
    }
}

/// Collect typed characters into the name buffer while name entry is
/// open. Enter submits; Backspace deletes. Length is capped here so the
/// buffer always shows what would be saved.
fn name_entry_keys(
    mut key_events: EventReader<KeyboardInput>,
    scoreboard: Res<ScoreBoard>,
    mut entry: ResMut<NameEntry>,
    mut submit_events: EventWriter<SubmitNameCommand>,
) {
    if !scoreboard.can_enter_name() {
        key_events.clear();
        return;
    }
    for ev in key_events.read() {
        if !ev.state.is_pressed() {
            continue;
        }
        match &ev.logical_key {
            Key::Character(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    if entry.buffer.chars().count() < MAX_NAME_LEN {
                        entry.buffer.push(c);
                    }
                }
            }
            Key::Space => {
                if entry.buffer.chars().count() < MAX_NAME_LEN {
                    entry.buffer.push(' ');
                }
            }
            Key::Backspace => {
                entry.buffer.pop();
            }
            Key::Enter => {
                submit_events.send(SubmitNameCommand {
                    text: entry.buffer.clone(),
                });
            }
            _ => {}
        }
    }
}

/// Replay/quit shortcuts on the end screen. Suppressed while the player
/// is typing a name, so R and Q stay typeable.
fn game_over_keys(
    keys: Res<ButtonInput<KeyCode>>,
    scoreboard: Res<ScoreBoard>,
    mut reset_events: EventWriter<ResetCommand>,
    mut exit_events: EventWriter<AppExit>,
) {
    if scoreboard.can_enter_name() {
        return;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reset_events.send(ResetCommand);
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        exit_events.send(AppExit::Success);
    }
}

fn quit_key(keys: Res<ButtonInput<KeyCode>>, mut exit_events: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit_events.send(AppExit::Success);
    }
}

fn clear_name_entry(mut entry: ResMut<NameEntry>) {
    entry.buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_world_round_trip() {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = cell_to_world(row, col);
                assert_eq!(world_to_cell(pos), Some((row, col)));
            }
        }
    }

    #[test]
    fn test_world_to_cell_rejects_points_off_grid() {
        let outside_x = cell_to_world(0, 0) - Vec2::new(TILE_SIZE, 0.0);
        assert_eq!(world_to_cell(outside_x), None);
        let outside_y = cell_to_world(6, 6) - Vec2::new(0.0, TILE_SIZE);
        assert_eq!(world_to_cell(outside_y), None);
    }

    #[test]
    fn test_click_anywhere_on_tile_maps_to_it() {
        let centre = cell_to_world(2, 4);
        let near_edge = centre + Vec2::new(TILE_SIZE * 0.49, -TILE_SIZE * 0.49);
        assert_eq!(world_to_cell(near_edge), Some((2, 4)));
    }
}
