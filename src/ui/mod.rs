//! Presentation layer — reads session state every frame, renders the
//! shop bar, HUD readouts, farm grid, overlays, and plays audio. Emits
//! the same shared command events as the keyboard input path.

mod audio;
mod end_screen;
mod farm_view;
mod hud;
mod instructions;
mod shop;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<farm_view::CropSprites>()
            // ─── STATIC SCENE — spawned once, survives resets ───
            .add_systems(
                Startup,
                (
                    audio::start_background_music,
                    farm_view::spawn_field,
                    hud::spawn_hud,
                    shop::spawn_shop_bar,
                ),
            )
            // ─── PER-FRAME READOUTS — visible during Playing ───
            .add_systems(
                Update,
                (
                    hud::update_coins_text,
                    hud::update_day_text,
                    hud::update_quota_text,
                    hud::update_timer_text,
                    hud::update_earned_text,
                    hud::update_seeds_text,
                    shop::update_seed_counts,
                    shop::update_pause_button_label,
                    shop::handle_seed_buttons,
                    shop::handle_pause_button,
                    shop::handle_help_button,
                    shop::update_button_hover,
                    instructions::sync_help_overlay,
                    instructions::handle_close_button,
                )
                    .run_if(in_state(Screen::Playing)),
            )
            .add_systems(Update, (audio::play_harvest_sfx, audio::play_game_end_sfx))
            // ─── FARM SPRITES — sync after all state mutations ───
            .add_systems(
                PostUpdate,
                (farm_view::sync_crop_sprites, farm_view::sync_crop_labels).chain(),
            )
            // ─── END SCREEN ───
            .add_systems(OnEnter(Screen::GameOver), end_screen::spawn_end_screen)
            .add_systems(OnExit(Screen::GameOver), end_screen::despawn_end_screen)
            .add_systems(
                Update,
                (
                    end_screen::update_name_entry_text,
                    end_screen::update_save_status_text,
                    end_screen::update_scoreboard_text,
                    end_screen::handle_end_buttons,
                    shop::update_button_hover,
                )
                    .run_if(in_state(Screen::GameOver)),
            );
    }
}

// ─── Shared palette ──────────────────────────────────────────────────────────

pub const SHOP_BG: Color = Color::srgb(0.78, 0.71, 0.55);
pub const SHOP_HOVER: Color = Color::srgb(0.86, 0.78, 0.63);
pub const PANEL_BROWN: Color = Color::srgb(0.55, 0.27, 0.07);
pub const GRASS_GREEN: Color = Color::srgb(0.13, 0.55, 0.13);

/// Fill colour for a crop sprite at a given stage.
pub fn crop_color(kind: CropKind, stage: CropStage) -> Color {
    let (r, g, b) = match (kind, stage) {
        (CropKind::Corn, CropStage::Seed) => (139, 69, 19),
        (CropKind::Corn, CropStage::Sprout) => (0, 150, 0),
        (CropKind::Corn, CropStage::Ready) => (255, 235, 59),
        (CropKind::Watermelon, CropStage::Seed) => (80, 40, 20),
        (CropKind::Watermelon, CropStage::Sprout) => (6, 87, 15),
        (CropKind::Watermelon, CropStage::Ready) => (200, 0, 50),
        (CropKind::Pumpkin, CropStage::Seed) => (100, 60, 20),
        (CropKind::Pumpkin, CropStage::Sprout) => (20, 140, 0),
        (CropKind::Pumpkin, CropStage::Ready) => (255, 140, 0),
        (CropKind::Tomato, CropStage::Seed) => (120, 70, 30),
        (CropKind::Tomato, CropStage::Sprout) => (0, 130, 20),
        (CropKind::Tomato, CropStage::Ready) => (220, 20, 60),
        (CropKind::Grape, CropStage::Seed) => (60, 30, 10),
        (CropKind::Grape, CropStage::Sprout) => (10, 120, 10),
        (CropKind::Grape, CropStage::Ready) => (128, 0, 128),
        (CropKind::Super, CropStage::Seed) => (100, 100, 100),
        (CropKind::Super, CropStage::Sprout) => (100, 200, 255),
        (CropKind::Super, CropStage::Ready) => (255, 255, 0),
    };
    Color::srgb_u8(r, g, b)
}
