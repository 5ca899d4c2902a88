//! Day/quota engine — the state machine that decides the run.
//!
//! Days advance on elapsed simulated time; each boundary crossing compares
//! the TOTAL coin balance against that day's quota. `coins_at_day_start` is
//! kept only so the HUD can show coins earned today — it plays no part in
//! the pass/fail decision.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Debug, Clone)]
pub struct DayBoard {
    /// 0-indexed, bounded [0, TOTAL_DAYS).
    pub current_day: usize,
    /// Simulated-clock reading when the run (day 0) started.
    pub day_start: f64,
    /// Balance snapshot at the start of the current day. Display only.
    pub coins_at_day_start: u32,
    pub outcome: GameOutcome,
}

impl Default for DayBoard {
    fn default() -> Self {
        Self::new(0.0, STARTING_COINS)
    }
}

impl DayBoard {
    pub fn new(now: f64, starting_coins: u32) -> Self {
        Self {
            current_day: 0,
            day_start: now,
            coins_at_day_start: starting_coins,
            outcome: GameOutcome::InProgress,
        }
    }

    /// Quota for the current day.
    pub fn quota(&self) -> u32 {
        DAILY_QUOTAS[self.current_day]
    }

    /// Seconds left in the current day window, for the HUD timer.
    pub fn time_left(&self, now: f64) -> f64 {
        (DAY_DURATION_SECS - (now - self.day_start) % DAY_DURATION_SECS).max(0.0)
    }

    /// Evaluate the day boundary. Returns Some(verdict) only when a
    /// boundary actually fired this call; terminal outcomes never fire.
    ///
    /// Fires when `floor(elapsed / day_length) > current_day`, and advances
    /// at most ONE day per call. If several day-lengths elapsed at once the
    /// skipped days collapse into a single evaluation against the current
    /// day's quota. That is the intended policy, not an oversight.
    pub fn check_boundary(&mut self, now: f64, coins: u32) -> Option<DayVerdict> {
        if self.outcome != GameOutcome::InProgress {
            return None;
        }

        let elapsed = now - self.day_start;
        let days_passed = (elapsed / DAY_DURATION_SECS).floor() as usize;
        if days_passed <= self.current_day {
            return None;
        }

        let required = self.quota();
        if coins >= required {
            if self.current_day == TOTAL_DAYS - 1 {
                info!(
                    "[Quota] Day {} passed ({} >= {}) — final day, run won",
                    self.current_day, coins, required
                );
                self.outcome = GameOutcome::Won;
                Some(DayVerdict::Won)
            } else {
                self.current_day += 1;
                self.coins_at_day_start = coins;
                info!(
                    "[Quota] Day {} passed ({} >= {}) — advancing to day {}",
                    self.current_day - 1,
                    coins,
                    required,
                    self.current_day
                );
                Some(DayVerdict::Advanced {
                    new_day: self.current_day,
                })
            }
        } else {
            info!(
                "[Quota] Day {} failed ({} < {}) — run lost",
                self.current_day, coins, required
            );
            self.outcome = GameOutcome::Lost;
            Some(DayVerdict::Lost)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fire_before_boundary() {
        let mut board = DayBoard::new(0.0, 15);
        assert_eq!(board.check_boundary(89.9, 100), None);
        assert_eq!(board.current_day, 0);
    }

    #[test]
    fn test_pass_advances_one_day_and_snapshots_coins() {
        let mut board = DayBoard::new(0.0, 15);
        let verdict = board.check_boundary(90.5, 25);
        assert_eq!(verdict, Some(DayVerdict::Advanced { new_day: 1 }));
        assert_eq!(board.coins_at_day_start, 25);
        assert_eq!(board.outcome, GameOutcome::InProgress);
        // Same instant again: days_passed == current_day now, no re-fire.
        assert_eq!(board.check_boundary(90.5, 25), None);
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut board = DayBoard::new(0.0, 15);
        assert_eq!(board.check_boundary(90.5, 19), Some(DayVerdict::Lost));
        assert_eq!(board.outcome, GameOutcome::Lost);
        // Terminal: later boundaries never re-evaluate.
        assert_eq!(board.check_boundary(500.0, 1000), None);
    }

    #[test]
    fn test_quota_uses_total_balance_not_earned_delta() {
        // Earned nothing today, but the total balance clears the quota.
        let mut board = DayBoard::new(0.0, 15);
        board.coins_at_day_start = 20;
        assert_eq!(
            board.check_boundary(91.0, 20),
            Some(DayVerdict::Advanced { new_day: 1 })
        );
    }

    #[test]
    fn test_skipped_days_collapse_into_one_evaluation() {
        // Three day-lengths elapse in one call: only day 0's quota is
        // checked and only one day is advanced.
        let mut board = DayBoard::new(0.0, 15);
        let verdict = board.check_boundary(3.0 * DAY_DURATION_SECS + 1.0, 25);
        assert_eq!(verdict, Some(DayVerdict::Advanced { new_day: 1 }));
        assert_eq!(board.current_day, 1);
    }

    #[test]
    fn test_final_day_pass_wins() {
        let mut board = DayBoard::new(0.0, 15);
        board.current_day = TOTAL_DAYS - 1;
        let boundary = (TOTAL_DAYS as f64) * DAY_DURATION_SECS + 1.0;
        assert_eq!(board.check_boundary(boundary, 300), Some(DayVerdict::Won));
        assert_eq!(board.outcome, GameOutcome::Won);
        assert_eq!(board.check_boundary(boundary + 90.0, 300), None);
    }

    #[test]
    fn test_time_left_wraps_within_day_window() {
        let board = DayBoard::new(0.0, 15);
        assert_eq!(board.time_left(10.0), 80.0);
        assert_eq!(board.time_left(100.0), 80.0);
    }
}
