//! Interval-driven spawning of enemies and coins
//!
//! Two repeating timers advanced by elapsed wall-clock time. Both are owned by
//! the game state: starting a session arms them, game over disarms them, and
//! a restart disarms then rearms so no time carries over between sessions.

/// A repeating timer that reports how many intervals elapsed
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval_ms: f64,
    elapsed_ms: f64,
    armed: bool,
}

impl RepeatingTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
            armed: false,
        }
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0.0;
    }

    /// Stop and forget accumulated time. Safe to call repeatedly.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt_ms`, returning the number of completed intervals
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.armed || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let fired = (self.elapsed_ms / self.interval_ms).floor();
        self.elapsed_ms -= fired * self.interval_ms;
        fired as u32
    }
}

/// What the spawner asks the world to create this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRequest {
    pub enemies: u32,
    pub collectibles: u32,
}

/// The enemy and coin schedules
#[derive(Debug, Clone)]
pub struct Spawner {
    enemy: RepeatingTimer,
    collectible: RepeatingTimer,
}

impl Spawner {
    pub fn new(enemy_interval_ms: f64, collectible_interval_ms: f64) -> Self {
        Self {
            enemy: RepeatingTimer::new(enemy_interval_ms),
            collectible: RepeatingTimer::new(collectible_interval_ms),
        }
    }

    pub fn arm(&mut self) {
        self.enemy.arm();
        self.collectible.arm();
    }

    pub fn disarm(&mut self) {
        self.enemy.disarm();
        self.collectible.disarm();
    }

    /// Disarm then arm: a clean schedule with no leftover time
    pub fn rearm(&mut self) {
        self.disarm();
        self.arm();
    }

    pub fn is_armed(&self) -> bool {
        self.enemy.is_armed() && self.collectible.is_armed()
    }

    pub fn advance(&mut self, dt_ms: f64) -> SpawnRequest {
        SpawnRequest {
            enemies: self.enemy.advance(dt_ms),
            collectibles: self.collectible.advance(dt_ms),
        }
    }
}
