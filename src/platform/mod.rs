//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator, shared by every target)
//! - Canvas drawing and asset loading (`web`, wasm only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

/// Converts display-refresh timestamps into a count of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms); returns how many ticks to run now
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= TICK_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= TICK_MS;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog rather than fast-forwarding later
            self.accumulator = self.accumulator.min(TICK_MS);
        }
        steps
    }

    /// Forget timing history (restart, tab refocus)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5000.0), 0);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(34.0), 2);
        assert_eq!(clock.advance(40.0), 0);
    }

    #[test]
    fn test_long_frames_are_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_SUBSTEPS);
        // Backlog does not leak into the next frame
        assert!(clock.advance(10_001.0) <= 1);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert_eq!(clock.advance(500.0), 0);
        assert_eq!(clock.advance(534.0), 2);
    }

    #[test]
    fn test_reset_drops_partial_tick() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // 16 ms banked, just short of one tick
        assert_eq!(clock.advance(16.0), 0);
        clock.reset();
        clock.advance(100.0);
        // Without the banked time 10 ms is not enough for a tick
        assert_eq!(clock.advance(110.0), 0);
        assert_eq!(clock.advance(127.0), 1);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(1000.0), 0);
    }
}
