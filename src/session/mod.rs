//! Game session — the single owner of all simulation state.
//!
//! The session composes the clock, farm grid, wallet, and day board into
//! one tick/command API. Input systems translate events into session
//! method calls; the presentation layer reads session state every frame.
//! Nothing else mutates simulation state, which keeps runs isolated and
//! directly testable without an `App`.

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::economy::Wallet;
use crate::farm::FarmGrid;
use crate::quota::DayBoard;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct GameSession {
    pub clock: SimClock,
    pub farm: FarmGrid,
    pub wallet: Wallet,
    pub day: DayBoard,
}

impl GameSession {
    pub fn outcome(&self) -> GameOutcome {
        self.day.outcome
    }

    /// Coins earned since the current day started. Display only — the
    /// quota check uses the total balance.
    pub fn earned_today(&self) -> i64 {
        self.wallet.coins as i64 - self.day.coins_at_day_start as i64
    }

    /// Buy one seed from the shop. Blocked while paused.
    pub fn buy_seed(&mut self, kind: CropKind) -> Result<(), CommandError> {
        if self.clock.is_paused() {
            return Err(CommandError::Paused);
        }
        self.wallet.buy_seed(kind)
    }

    /// Plant the cheapest in-stock seed at (row, col). Occupancy is
    /// checked before stock, so clicking a full cell with an empty
    /// inventory reports OccupiedCell.
    pub fn plant_cheapest_at(&mut self, row: usize, col: usize) -> Result<CropKind, CommandError> {
        if !self.farm.is_empty(row, col) {
            return Err(CommandError::OccupiedCell);
        }
        let kind = self
            .wallet
            .cheapest_in_stock()
            .ok_or(CommandError::OutOfStock)?;
        self.wallet.take_seed(kind)?;
        self.farm.plant(row, col, kind, self.clock.now())?;
        Ok(kind)
    }

    /// Harvest a Ready crop at (row, col) and credit its reward.
    pub fn harvest_at(&mut self, row: usize, col: usize) -> Result<(CropKind, u32), CommandError> {
        let (kind, reward) = self.farm.harvest(row, col)?;
        self.wallet.credit(reward);
        Ok((kind, reward))
    }

    /// Flip the pause flag. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.clock.is_paused();
        self.clock.set_paused(paused);
        paused
    }

    /// Reinitialize the whole run atomically: clock, farm, wallet, and
    /// day state back to their starting values, terminal outcome cleared.
    pub fn reset(&mut self) {
        *self = GameSession::default();
    }

    /// One simulation step: feed real delta-seconds to the clock, advance
    /// crop growth, and evaluate the day boundary. Safe to call while
    /// paused — the clock simply doesn't move, so nothing advances.
    /// Returns the day verdict if a boundary fired.
    pub fn advance(&mut self, dt: f64) -> Option<DayVerdict> {
        self.clock.advance(dt);
        if self.day.outcome != GameOutcome::InProgress {
            return None;
        }
        let now = self.clock.now();
        self.farm.tick(now);
        self.day.check_boundary(now, self.wallet.coins)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN — wires command events to the session
// ═══════════════════════════════════════════════════════════════════════

/// Whether the instructions overlay is open. While open, the session tick
/// is gated so simulated time freezes without touching the pause flag.
#[derive(Resource, Debug, Default)]
pub struct HelpVisible(pub bool);

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .init_resource::<HelpVisible>()
            // Within one tick: commands apply first, then time advances,
            // so a harvest in this tick counts for this tick's quota check.
            .add_systems(
                Update,
                (
                    apply_buy_seed,
                    apply_tile_interact,
                    apply_toggle_pause,
                    tick_session.run_if(help_closed),
                )
                    .chain()
                    .run_if(in_state(Screen::Playing)),
            )
            .add_systems(
                Update,
                apply_reset.run_if(in_state(Screen::GameOver)),
            );
    }
}

fn help_closed(help: Res<HelpVisible>) -> bool {
    !help.0
}

fn tick_session(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut day_events: EventWriter<DayAdvancedEvent>,
    mut end_events: EventWriter<GameEndedEvent>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let verdict = session.advance(time.delta_secs_f64());
    match verdict {
        Some(DayVerdict::Advanced { new_day }) => {
            day_events.send(DayAdvancedEvent { new_day });
        }
        Some(DayVerdict::Won) => {
            info!("[Session] Run won with {} coins", session.wallet.coins);
            end_events.send(GameEndedEvent {
                won: true,
                final_score: session.wallet.coins,
            });
            next_screen.set(Screen::GameOver);
        }
        Some(DayVerdict::Lost) => {
            info!("[Session] Run lost on day {}", session.day.current_day);
            end_events.send(GameEndedEvent {
                won: false,
                final_score: session.wallet.coins,
            });
            next_screen.set(Screen::GameOver);
        }
        None => {}
    }
}

fn apply_buy_seed(mut events: EventReader<BuySeedCommand>, mut session: ResMut<GameSession>) {
    for ev in events.read() {
        match session.buy_seed(ev.kind) {
            Ok(()) => info!(
                "[Session] Bought {} seed. Coins: {}",
                ev.kind.name(),
                session.wallet.coins
            ),
            // Failed commands are user-visible no-ops, never fatal.
            Err(err) => debug!("[Session] Buy {} refused: {:?}", ev.kind.name(), err),
        }
    }
}

/// A tile click harvests a Ready crop, or plants the cheapest in-stock
/// seed into an empty cell. A growing crop is a no-op.
fn apply_tile_interact(
    mut events: EventReader<TileInteractCommand>,
    mut session: ResMut<GameSession>,
    mut harvested: EventWriter<CropHarvestedEvent>,
) {
    for ev in events.read() {
        match session.harvest_at(ev.row, ev.col) {
            Ok((kind, reward)) => {
                info!(
                    "[Session] Harvested {} at ({}, {}) for {} coins",
                    kind.name(),
                    ev.row,
                    ev.col,
                    reward
                );
                harvested.send(CropHarvestedEvent {
                    kind,
                    reward,
                    row: ev.row,
                    col: ev.col,
                });
            }
            Err(CommandError::EmptyCell) => match session.plant_cheapest_at(ev.row, ev.col) {
                Ok(kind) => info!("[Session] Planted {} at ({}, {})", kind.name(), ev.row, ev.col),
                Err(err) => debug!("[Session] Plant at ({}, {}) refused: {:?}", ev.row, ev.col, err),
            },
            Err(err) => debug!("[Session] Harvest at ({}, {}) refused: {:?}", ev.row, ev.col, err),
        }
    }
}

fn apply_toggle_pause(
    mut events: EventReader<TogglePauseCommand>,
    mut session: ResMut<GameSession>,
) {
    for _ in events.read() {
        let paused = session.toggle_pause();
        info!("[Session] {}", if paused { "Paused" } else { "Resumed" });
    }
}

fn apply_reset(
    mut events: EventReader<ResetCommand>,
    mut session: ResMut<GameSession>,
    mut help: ResMut<HelpVisible>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if events.read().next().is_some() {
        session.reset();
        help.0 = false;
        next_screen.set(Screen::Playing);
        info!("[Session] Run reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_seed_blocked_while_paused() {
        let mut session = GameSession::default();
        session.toggle_pause();
        assert_eq!(session.buy_seed(CropKind::Corn), Err(CommandError::Paused));
        session.toggle_pause();
        assert!(session.buy_seed(CropKind::Corn).is_ok());
    }

    #[test]
    fn test_plant_cheapest_prefers_cheapest_and_checks_occupancy_first() {
        let mut session = GameSession::default();
        session.wallet.credit(100);
        session.buy_seed(CropKind::Grape).unwrap();
        session.buy_seed(CropKind::Corn).unwrap();

        assert_eq!(session.plant_cheapest_at(0, 0), Ok(CropKind::Corn));
        assert_eq!(session.plant_cheapest_at(0, 0), Err(CommandError::OccupiedCell));
        assert_eq!(session.plant_cheapest_at(0, 1), Ok(CropKind::Grape));
        assert_eq!(session.plant_cheapest_at(0, 2), Err(CommandError::OutOfStock));
    }

    #[test]
    fn test_harvest_credits_exact_reward_once() {
        let mut session = GameSession::default();
        session.buy_seed(CropKind::Corn).unwrap();
        session.plant_cheapest_at(3, 3).unwrap();
        let coins_after_buy = session.wallet.coins;

        // Two stage transitions need two ticks past the 8s threshold.
        session.advance(8.5);
        session.advance(0.5);
        assert_eq!(session.harvest_at(3, 3), Ok((CropKind::Corn, 6)));
        assert_eq!(session.wallet.coins, coins_after_buy + 6);
        assert_eq!(session.harvest_at(3, 3), Err(CommandError::EmptyCell));
    }

    #[test]
    fn test_growth_frozen_while_paused() {
        let mut session = GameSession::default();
        session.buy_seed(CropKind::Corn).unwrap();
        session.plant_cheapest_at(0, 0).unwrap();
        session.toggle_pause();

        // Far more wall time than seed_to_sprout passes, all paused.
        for _ in 0..100 {
            session.advance(1.0);
        }
        assert_eq!(
            session.farm.get(0, 0).unwrap().stage,
            CropStage::Seed,
            "paused time must not grow crops"
        );

        session.toggle_pause();
        session.advance(8.5);
        assert_eq!(session.farm.get(0, 0).unwrap().stage, CropStage::Sprout);
    }

    #[test]
    fn test_day_timer_frozen_while_paused() {
        let mut session = GameSession::default();
        session.advance(30.0);
        session.toggle_pause();
        for _ in 0..10 {
            assert_eq!(session.advance(60.0), None, "no boundary can fire while paused");
        }
        assert_eq!(session.day.time_left(session.clock.now()), 60.0);
        assert_eq!(session.day.current_day, 0);
    }

    #[test]
    fn test_reset_reinitializes_everything() {
        let mut session = GameSession::default();
        session.buy_seed(CropKind::Corn).unwrap();
        session.plant_cheapest_at(1, 1).unwrap();
        session.advance(200.0); // past day 0 boundary with < 20 coins → Lost
        assert_eq!(session.outcome(), GameOutcome::Lost);

        session.reset();
        assert_eq!(session.outcome(), GameOutcome::InProgress);
        assert_eq!(session.wallet.coins, STARTING_COINS);
        assert_eq!(session.day.current_day, 0);
        assert_eq!(session.clock.now(), 0.0);
        assert!(session.farm.is_empty(1, 1));
    }
}
