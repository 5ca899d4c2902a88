//! Shared components, resources, events, and states for Harvest Rush.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly; the simulation
//! internals (clock, farm, economy, quota) are composed by the session.

use bevy::prelude::*;

// ═══════════════════════════════════════════════════════════════════════
// SCREEN STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum Screen {
    #[default]
    Playing,
    GameOver,
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS
// ═══════════════════════════════════════════════════════════════════════

/// The six plantable crop kinds, ordered cheapest to most expensive.
/// That order is the canonical iteration order everywhere: shop layout,
/// seed counters, and the cheapest-first auto-plant policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropKind {
    Corn,
    Watermelon,
    Pumpkin,
    Tomato,
    Grape,
    Super,
}

impl CropKind {
    pub const ALL: [CropKind; 6] = [
        CropKind::Corn,
        CropKind::Watermelon,
        CropKind::Pumpkin,
        CropKind::Tomato,
        CropKind::Grape,
        CropKind::Super,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            CropKind::Corn => 0,
            CropKind::Watermelon => 1,
            CropKind::Pumpkin => 2,
            CropKind::Tomato => 3,
            CropKind::Grape => 4,
            CropKind::Super => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CropKind::Corn => "Corn",
            CropKind::Watermelon => "Watermelon",
            CropKind::Pumpkin => "Pumpkin",
            CropKind::Tomato => "Tomato",
            CropKind::Grape => "Grape",
            CropKind::Super => "Super",
        }
    }

    /// One-letter tag for the compact seed counters in the HUD.
    pub fn letter(self) -> &'static str {
        match self {
            CropKind::Corn => "C",
            CropKind::Watermelon => "W",
            CropKind::Pumpkin => "P",
            CropKind::Tomato => "T",
            CropKind::Grape => "G",
            CropKind::Super => "S",
        }
    }

    pub fn seed_cost(self) -> u32 {
        match self {
            CropKind::Corn => 5,
            CropKind::Watermelon => 7,
            CropKind::Pumpkin => 8,
            CropKind::Tomato => 10,
            CropKind::Grape => 12,
            CropKind::Super => 20,
        }
    }

    /// Seconds since planting after which a Seed becomes a Sprout.
    pub fn seed_to_sprout_secs(self) -> f64 {
        match self {
            CropKind::Corn => 8.0,
            CropKind::Watermelon => 11.0,
            CropKind::Pumpkin => 14.0,
            CropKind::Tomato => 12.0,
            CropKind::Grape => 17.0,
            CropKind::Super => 20.0,
        }
    }

    /// Seconds since planting after which a Sprout becomes Ready.
    /// Compared against TOTAL elapsed time, not time spent in the stage.
    pub fn sprout_to_ready_secs(self) -> f64 {
        match self {
            CropKind::Corn => 8.0,
            CropKind::Watermelon => 11.0,
            CropKind::Pumpkin => 14.0,
            CropKind::Tomato => 12.0,
            CropKind::Grape => 17.0,
            CropKind::Super => 20.0,
        }
    }

    pub fn harvest_reward(self) -> u32 {
        match self {
            CropKind::Corn => 6,
            CropKind::Watermelon => 12,
            CropKind::Pumpkin => 15,
            CropKind::Tomato => 18,
            CropKind::Grape => 20,
            CropKind::Super => 50,
        }
    }
}

/// Growth phase of a planted crop. Only ever advances forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CropStage {
    Seed,
    Sprout,
    Ready,
}

/// One crop occupying one grid cell. Destroyed on harvest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantedCrop {
    pub kind: CropKind,
    pub stage: CropStage,
    /// Simulated-clock reading at planting time.
    pub planted_at: f64,
}

// ═══════════════════════════════════════════════════════════════════════
// OUTCOME & VERDICTS
// ═══════════════════════════════════════════════════════════════════════

/// Run outcome. Terminal once Won or Lost; only the day-boundary check
/// ever moves it off InProgress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Result of a day-boundary evaluation that actually fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayVerdict {
    /// Quota met, not the last day. Carries the new day index.
    Advanced { new_day: usize },
    /// Quota met on the last day.
    Won,
    /// Quota missed on any day.
    Lost,
}

// ═══════════════════════════════════════════════════════════════════════
// COMMAND ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Every way a simulation command can be refused. All are local,
/// recoverable, user-visible-as-no-op conditions; none are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The target cell already holds a crop.
    OccupiedCell,
    /// The target cell holds no crop.
    EmptyCell,
    /// The crop is not Ready yet.
    NotReady,
    /// No seed of the requested kind (or of any kind, for auto-plant).
    OutOfStock,
    /// Not enough coins for the purchase.
    InsufficientFunds,
    /// Purchases are blocked while the simulation is paused.
    Paused,
    /// Score name empty after trimming, too long, or unprintable.
    InvalidName,
}

// ═══════════════════════════════════════════════════════════════════════
// SCORES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// COMMAND EVENTS — input layer → session
// ═══════════════════════════════════════════════════════════════════════

/// Buy one seed of the given kind from the shop.
#[derive(Event, Debug, Clone)]
pub struct BuySeedCommand {
    pub kind: CropKind,
}

/// Player clicked a farm tile: harvest if Ready, otherwise plant the
/// cheapest in-stock seed if the cell is empty.
#[derive(Event, Debug, Clone)]
pub struct TileInteractCommand {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone)]
pub struct TogglePauseCommand;

/// Reset the whole run to its initial state (replay).
#[derive(Event, Debug, Clone)]
pub struct ResetCommand;

/// Submit a name for the just-won run's score.
#[derive(Event, Debug, Clone)]
pub struct SubmitNameCommand {
    pub text: String,
}

// ═══════════════════════════════════════════════════════════════════════
// FEEDBACK EVENTS — session → presentation/audio
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub kind: CropKind,
    pub reward: u32,
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone)]
pub struct DayAdvancedEvent {
    pub new_day: usize,
}

#[derive(Event, Debug, Clone)]
pub struct GameEndedEvent {
    pub won: bool,
    pub final_score: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GRID_SIZE: usize = 7;
pub const TILE_SIZE: f32 = 64.0;

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 700.0;

/// Vertical offset of the farm centre, leaving room for the shop bar.
pub const FARM_Y_OFFSET: f32 = -60.0;

pub const DAY_DURATION_SECS: f64 = 90.0;
pub const TOTAL_DAYS: usize = 8;
/// Minimum TOTAL coin balance required at each day's end.
pub const DAILY_QUOTAS: [u32; TOTAL_DAYS] = [20, 30, 50, 80, 120, 170, 230, 300];

pub const STARTING_COINS: u32 = 15;

pub const MAX_NAME_LEN: usize = 12;
/// Only the top N scores are displayed and rank-eligible.
pub const SCOREBOARD_DISPLAY: usize = 5;
