//! Headless integration tests for Harvest Rush.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins (skipping all rendering/UI), and verify that the
//! command pipeline and day loop work correctly. Simulated time is driven
//! by advancing the session clock directly, so every test is deterministic.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::path::PathBuf;

use harvest_rush::scores::{load_scores, ScoreBoard, ScoresPlugin};
use harvest_rush::session::{GameSession, SessionPlugin};
use harvest_rush::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

fn temp_score_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "harvest_rush_headless_{}_{}.txt",
        tag,
        std::process::id()
    ))
}

/// Builds a minimal Bevy app with the simulation and score plugins but NO
/// rendering, windowing, input devices, or asset loading. The scoreboard
/// is pointed at a per-test temp file.
fn build_test_app(score_path: PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    app.init_state::<Screen>();

    app.add_event::<BuySeedCommand>()
        .add_event::<TileInteractCommand>()
        .add_event::<TogglePauseCommand>()
        .add_event::<ResetCommand>()
        .add_event::<SubmitNameCommand>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<DayAdvancedEvent>()
        .add_event::<GameEndedEvent>();

    // Inserted before ScoresPlugin so init_resource keeps this one.
    app.insert_resource(ScoreBoard::at_path(score_path));
    app.add_plugins(SessionPlugin);
    app.add_plugins(ScoresPlugin);

    // First update applies the initial state transition.
    app.update();
    app
}

fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

/// Jump the simulated clock forward, then tick the app so the session
/// systems observe the new time.
fn skip_time(app: &mut App, secs: f64) {
    app.world_mut()
        .resource_mut::<GameSession>()
        .clock
        .advance(secs);
    app.update();
}

fn screen(app: &App) -> Screen {
    *app.world().resource::<State<Screen>>().get()
}

// ─────────────────────────────────────────────────────────────────────────────
// Command pipeline
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_buy_plant_grow_harvest_cycle() {
    let mut app = build_test_app(temp_score_path("cycle"));

    app.world_mut().send_event(BuySeedCommand {
        kind: CropKind::Corn,
    });
    app.update();
    assert_eq!(session(&app).wallet.coins, STARTING_COINS - 5);
    assert_eq!(session(&app).wallet.seed_count(CropKind::Corn), 1);

    app.world_mut()
        .send_event(TileInteractCommand { row: 3, col: 3 });
    app.update();
    assert_eq!(session(&app).wallet.seed_count(CropKind::Corn), 0);
    assert_eq!(
        session(&app).farm.get(3, 3).unwrap().stage,
        CropStage::Seed
    );

    // Corn needs two ticks past its 8s threshold to reach Ready.
    skip_time(&mut app, 8.5);
    skip_time(&mut app, 0.5);
    assert_eq!(
        session(&app).farm.get(3, 3).unwrap().stage,
        CropStage::Ready
    );

    app.world_mut()
        .send_event(TileInteractCommand { row: 3, col: 3 });
    app.update();
    assert_eq!(session(&app).wallet.coins, STARTING_COINS - 5 + 6);
    assert!(session(&app).farm.is_empty(3, 3));
}

#[test]
fn test_clicking_growing_crop_is_a_no_op() {
    let mut app = build_test_app(temp_score_path("noop"));

    app.world_mut().send_event(BuySeedCommand {
        kind: CropKind::Corn,
    });
    app.world_mut()
        .send_event(TileInteractCommand { row: 0, col: 0 });
    app.update();
    let coins_after_plant = session(&app).wallet.coins;

    // Still a Seed: the click neither harvests nor double-plants.
    app.world_mut()
        .send_event(TileInteractCommand { row: 0, col: 0 });
    app.update();
    assert_eq!(session(&app).wallet.coins, coins_after_plant);
    assert_eq!(session(&app).farm.get(0, 0).unwrap().stage, CropStage::Seed);
}

#[test]
fn test_pause_blocks_purchases_and_freezes_time() {
    let mut app = build_test_app(temp_score_path("pause"));

    app.world_mut().send_event(TogglePauseCommand);
    app.update();
    assert!(session(&app).clock.is_paused());

    app.world_mut().send_event(BuySeedCommand {
        kind: CropKind::Corn,
    });
    app.update();
    assert_eq!(
        session(&app).wallet.coins,
        STARTING_COINS,
        "paused purchase must be refused"
    );

    // Ticks while paused never move the clock or fire a boundary.
    let before = session(&app).clock.now();
    for _ in 0..20 {
        app.update();
    }
    assert_eq!(session(&app).clock.now(), before);
    assert_eq!(screen(&app), Screen::Playing);

    app.world_mut().send_event(TogglePauseCommand);
    app.update();
    app.world_mut().send_event(BuySeedCommand {
        kind: CropKind::Corn,
    });
    app.update();
    assert_eq!(session(&app).wallet.coins, STARTING_COINS - 5);
}

// ─────────────────────────────────────────────────────────────────────────────
// Day loop and outcomes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_failed_quota_ends_run_in_game_over() {
    let mut app = build_test_app(temp_score_path("loss"));

    // Day 0 ends with only the starting 15 coins against a 20 quota.
    skip_time(&mut app, DAY_DURATION_SECS + 1.0);
    app.update(); // apply the state transition

    assert_eq!(session(&app).outcome(), GameOutcome::Lost);
    assert_eq!(screen(&app), Screen::GameOver);

    // Further time cannot resurrect a terminal run.
    skip_time(&mut app, 500.0);
    assert_eq!(session(&app).outcome(), GameOutcome::Lost);
}

#[test]
fn test_met_quota_advances_day_and_emits_event() {
    let mut app = build_test_app(temp_score_path("advance"));

    app.world_mut().resource_mut::<GameSession>().wallet.credit(50);
    skip_time(&mut app, DAY_DURATION_SECS + 1.0);

    let s = session(&app);
    assert_eq!(s.day.current_day, 1);
    assert_eq!(s.outcome(), GameOutcome::InProgress);
    assert_eq!(s.earned_today(), 0, "snapshot resets earned-today");
    assert_eq!(screen(&app), Screen::Playing);
    assert!(
        !app.world()
            .resource::<Events<DayAdvancedEvent>>()
            .is_empty(),
        "day advance must be announced"
    );
}

#[test]
fn test_final_day_win_reaches_game_over_won() {
    let mut app = build_test_app(temp_score_path("win"));

    {
        let mut s = app.world_mut().resource_mut::<GameSession>();
        s.day.current_day = TOTAL_DAYS - 1;
        s.wallet.credit(400);
    }
    skip_time(&mut app, TOTAL_DAYS as f64 * DAY_DURATION_SECS + 1.0);
    app.update();

    assert_eq!(session(&app).outcome(), GameOutcome::Won);
    assert_eq!(screen(&app), Screen::GameOver);
}

#[test]
fn test_reset_starts_a_fresh_run() {
    let mut app = build_test_app(temp_score_path("reset"));

    skip_time(&mut app, DAY_DURATION_SECS + 1.0);
    app.update();
    assert_eq!(screen(&app), Screen::GameOver);

    app.world_mut().send_event(ResetCommand);
    app.update(); // apply_reset runs in GameOver
    app.update(); // state transition back to Playing

    assert_eq!(screen(&app), Screen::Playing);
    let s = session(&app);
    assert_eq!(s.outcome(), GameOutcome::InProgress);
    assert_eq!(s.wallet.coins, STARTING_COINS);
    assert_eq!(s.day.current_day, 0);
    // Only real frame time has passed since the reset.
    assert!(s.clock.now() < 1.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scores
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_won_run_saves_score_through_the_event_pipeline() {
    let path = temp_score_path("save");
    let _ = std::fs::remove_file(&path);
    let mut app = build_test_app(path.clone());

    {
        let mut s = app.world_mut().resource_mut::<GameSession>();
        s.day.current_day = TOTAL_DAYS - 1;
        s.wallet.credit(400);
    }
    skip_time(&mut app, TOTAL_DAYS as f64 * DAY_DURATION_SECS + 1.0);
    app.update();

    let final_score = session(&app).wallet.coins;
    assert!(app.world().resource::<ScoreBoard>().can_enter_name());

    app.world_mut().send_event(SubmitNameCommand {
        text: "ABC".to_string(),
    });
    app.update();

    let board = app.world().resource::<ScoreBoard>();
    assert_eq!(board.saved_rank, Some(1));
    assert!(!board.can_enter_name(), "a second save must be blocked");

    let entries = load_scores(&path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "ABC");
    assert_eq!(entries[0].score, final_score);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_lost_run_never_opens_name_entry() {
    let path = temp_score_path("lost_no_entry");
    let _ = std::fs::remove_file(&path);
    let mut app = build_test_app(path.clone());

    skip_time(&mut app, DAY_DURATION_SECS + 1.0);
    app.update();
    assert_eq!(session(&app).outcome(), GameOutcome::Lost);
    assert!(!app.world().resource::<ScoreBoard>().can_enter_name());

    // A stray submit on the loss screen does nothing.
    app.world_mut().send_event(SubmitNameCommand {
        text: "ABC".to_string(),
    });
    app.update();
    assert!(load_scores(&path).is_empty());
    let _ = std::fs::remove_file(&path);
}
