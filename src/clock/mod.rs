//! Simulated time source.
//!
//! The clock is an accumulator, not a wall-clock wrapper: `advance` adds
//! real delta-seconds only while unpaused, so `now()` is frozen for every
//! consumer during a pause. Callers never need to skip their own elapsed
//! computations — a paused clock simply stops moving.

/// Pause-aware simulated clock. All timestamps in the simulation
/// (crop planting times, the day start) are readings of this clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    elapsed: f64,
    paused: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            paused: false,
        }
    }
}

impl SimClock {
    /// Current simulated time in seconds since session start.
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Feed real delta-seconds into the clock. No-op while paused.
    pub fn advance(&mut self, dt: f64) {
        if !self.paused && dt > 0.0 {
            self.elapsed += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates_while_running() {
        let mut clock = SimClock::default();
        clock.advance(1.5);
        clock.advance(0.5);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn test_clock_frozen_while_paused() {
        let mut clock = SimClock::default();
        clock.advance(3.0);
        clock.set_paused(true);
        clock.advance(100.0);
        assert_eq!(clock.now(), 3.0, "paused clock must not advance");
        clock.set_paused(false);
        clock.advance(1.0);
        assert_eq!(clock.now(), 4.0);
    }

    #[test]
    fn test_clock_ignores_negative_delta() {
        let mut clock = SimClock::default();
        clock.advance(2.0);
        clock.advance(-5.0);
        assert_eq!(clock.now(), 2.0);
    }
}
