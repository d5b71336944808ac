//! Game state and lifecycle
//!
//! One `GameState` owns the whole world: entities, score, lives, spawn
//! schedules and the RNG. Construction opens a session on the title screen,
//! `start` begins play, `restart` resets everything in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Collectible, Direction, Enemy, Player, Projectile};
use super::spawner::Spawner;
use crate::Viewport;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start action
    Title,
    /// Active gameplay
    Running,
    /// Player ran out of lives; waiting for restart
    GameOver,
}

/// Things that happened during a tick, for sound and other effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemyDestroyed,
    BossSpawned,
    BossHit,
    BossDestroyed,
    PlayerHit,
    CoinCollected,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Canvas size and scale used for new entities
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    /// Score at which the next boss appears
    pub boss_threshold: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub collectibles: Vec<Collectible>,
    pub spawner: Spawner,
    /// Effects queued since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session on the title screen
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&viewport, &tuning),
            spawner: Spawner::new(
                tuning.enemy_spawn_interval_ms,
                tuning.collectible_spawn_interval_ms,
            ),
            boss_threshold: tuning.boss_threshold_start,
            tuning,
            viewport,
            phase: GamePhase::Title,
            score: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            collectibles: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Leave the title screen. No-op once a session is under way.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Title {
            return;
        }
        self.phase = GamePhase::Running;
        self.spawner.arm();
        log::info!("Game started (seed {})", self.seed);
    }

    /// Reset the world and begin a fresh run
    pub fn restart(&mut self) {
        self.player = Player::new(&self.viewport, &self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.collectibles.clear();
        self.events.clear();
        self.score = 0;
        self.boss_threshold = self.tuning.boss_threshold_start;
        self.time_ticks = 0;
        self.spawner.rearm();
        self.phase = GamePhase::Running;
        log::info!("Game restarted");
    }

    /// Adopt a new canvas size. Live entities keep their baked sizes.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "Viewport resized to {}x{} (scale {:.3}, {:.3})",
            viewport.width,
            viewport.height,
            viewport.scale.x,
            viewport.scale.y
        );
        self.viewport = viewport;
    }

    /// Running -> GameOver. Stops the spawn schedules.
    pub fn enter_game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.spawner.disarm();
        self.events.push(GameEvent::GameOver);
        log::info!("Game over, final score {}", self.score);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Canvas extent entities are clamped and culled against
    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.viewport.width, self.viewport.height)
    }

    /// Feed elapsed wall-clock time to the spawn schedules
    pub fn advance_clock(&mut self, dt_ms: f64) {
        if !self.is_running() {
            return;
        }
        let request = self.spawner.advance(dt_ms);

        for _ in 0..request.enemies {
            let enemy = Enemy::spawn_basic(&mut self.rng, &self.viewport, &self.tuning);
            log::debug!("Spawned enemy at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
            self.enemies.push(enemy);
        }
        for _ in 0..request.collectibles {
            let coin = Collectible::spawn(&mut self.rng, &self.viewport);
            log::debug!("Spawned coin at ({:.0}, {:.0})", coin.pos.x, coin.pos.y);
            self.collectibles.push(coin);
        }
    }

    /// Move the player one step; ignored unless running
    pub fn move_player(&mut self, direction: Direction) {
        if !self.is_running() {
            return;
        }
        let canvas = self.canvas();
        self.player.step(direction, canvas);
    }

    /// Drag the player by a pointer delta; ignored unless running
    pub fn drag_player(&mut self, delta: Vec2) {
        if !self.is_running() || delta == Vec2::ZERO {
            return;
        }
        let canvas = self.canvas();
        self.player.drag(delta, canvas);
    }

    /// Fire if the cooldown allows; ignored unless running
    pub fn player_shoot(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(shot) = self.player.shoot(self.viewport.scale) {
            self.projectiles.push(shot);
        }
    }

    /// Spawn a boss once the score reaches the threshold.
    ///
    /// At most one boss per call; the threshold then moves up one step.
    pub fn spawn_boss_if_due(&mut self) -> bool {
        if !self.is_running() || self.score < self.boss_threshold {
            return false;
        }
        let boss = Enemy::spawn_boss(&mut self.rng, &self.viewport, &self.tuning);
        self.enemies.push(boss);
        self.boss_threshold = self
            .boss_threshold
            .saturating_add(self.tuning.boss_threshold_step);
        self.events.push(GameEvent::BossSpawned);
        log::info!(
            "Boss spawned at score {}, next threshold {}",
            self.score,
            self.boss_threshold
        );
        true
    }

    /// Take all queued effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(42, Viewport::base(), Tuning::default())
    }

    #[test]
    fn test_new_session_waits_on_title() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Title);
        assert!(!state.spawner.is_armed());
        assert_eq!(state.boss_threshold, 100);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_title_ignores_clock_and_input() {
        let mut state = new_state();
        let pos = state.player.pos;
        state.advance_clock(60_000.0);
        state.move_player(Direction::Up);
        state.player_shoot();
        assert!(state.enemies.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = new_state();
        state.start();
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.spawner.is_armed());
    }

    #[test]
    fn test_clock_spawns_on_schedule() {
        let mut state = new_state();
        state.start();
        state.advance_clock(1999.0);
        assert!(state.enemies.is_empty());
        state.advance_clock(1.0);
        assert_eq!(state.enemies.len(), 1);
        state.advance_clock(3000.0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.collectibles.len(), 1);
    }

    #[test]
    fn test_game_over_stops_spawning_and_input() {
        let mut state = new_state();
        state.start();
        state.enter_game_over();
        let pos = state.player.pos;

        state.advance_clock(20_000.0);
        state.move_player(Direction::Down);
        state.drag_player(Vec2::new(30.0, 0.0));
        state.player_shoot();

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.pos, pos);
        assert!(!state.spawner.is_armed());
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = new_state();
        state.start();
        state.advance_clock(10_000.0);
        state.score = 230;
        state.boss_threshold = 300;
        state.player.lives = 0;
        state.enter_game_over();

        state.restart();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.boss_threshold, 100);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.events.is_empty());
        assert!(state.spawner.is_armed());
    }

    #[test]
    fn test_restart_twice_matches_once() {
        let mut once = new_state();
        once.start();
        once.score = 70;
        once.restart();

        let mut twice = once.clone();
        twice.restart();

        assert_eq!(once.phase, twice.phase);
        assert_eq!(once.score, twice.score);
        assert_eq!(once.boss_threshold, twice.boss_threshold);
        assert_eq!(once.player.lives, twice.player.lives);
        assert_eq!(once.player.pos, twice.player.pos);
        assert_eq!(once.enemies.len(), twice.enemies.len());
        assert_eq!(once.spawner.is_armed(), twice.spawner.is_armed());
    }

    #[test]
    fn test_restart_leaves_no_pending_spawn_time() {
        let mut state = new_state();
        state.start();
        state.advance_clock(1900.0);
        state.restart();
        state.advance_clock(200.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_boss_spawns_at_threshold_and_raises_it() {
        let mut state = new_state();
        state.start();
        state.score = 99;
        assert!(!state.spawn_boss_if_due());

        state.score = 100;
        assert!(state.spawn_boss_if_due());
        assert_eq!(state.boss_threshold, 200);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].is_boss());
        assert_eq!(state.enemies[0].health(), Some(5));

        assert!(!state.spawn_boss_if_due());
    }

    #[test]
    fn test_resize_does_not_rescale_live_entities() {
        let mut state = new_state();
        state.start();
        let size = state.player.size;
        state.resize(Viewport::from_size(400.0, 300.0));
        assert_eq!(state.player.size, size);

        state.restart();
        assert_eq!(state.player.size, Vec2::splat(25.0));
    }
}
