mod shared;
mod clock;
mod farm;
mod economy;
mod quota;
mod session;
mod scores;
mod input;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Harvest Rush".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        // Screen state
        .init_state::<Screen>()
        // Command events
        .add_event::<BuySeedCommand>()
        .add_event::<TileInteractCommand>()
        .add_event::<TogglePauseCommand>()
        .add_event::<ResetCommand>()
        .add_event::<SubmitNameCommand>()
        // Feedback events
        .add_event::<CropHarvestedEvent>()
        .add_event::<DayAdvancedEvent>()
        .add_event::<GameEndedEvent>()
        // Domain plugins
        .add_plugins(session::SessionPlugin)
        .add_plugins(scores::ScoresPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
