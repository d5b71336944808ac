//! Game entities and their per-tick update rules
//!
//! Sizes and speeds are scaled once, at construction. A later viewport resize
//! leaves live entities untouched.

use glam::Vec2;
use rand::Rng;

use super::collision::Aabb;
use crate::assets::AssetId;
use crate::consts::*;
use crate::renderer::Frame;
use crate::tuning::Tuning;
use crate::{Scale, Viewport};

/// Movement intents for the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Clamp a box position so the whole box stays within `[0, bounds]`
fn clamp_into(pos: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    let max = (bounds - size).max(Vec2::ZERO);
    pos.clamp(Vec2::ZERO, max)
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub lives: u8,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub max_cooldown: u32,
}

impl Player {
    /// Spawn at the left side, centred vertically
    pub fn new(viewport: &Viewport, tuning: &Tuning) -> Self {
        let scale = viewport.scale;
        let size = scale.size(PLAYER_SIZE, PLAYER_SIZE);
        Self {
            pos: Vec2::new(
                PLAYER_START_X * scale.x,
                (viewport.height - size.y) / 2.0,
            ),
            size,
            speed: PLAYER_SPEED * scale.x,
            lives: tuning.player_lives,
            shoot_cooldown: 0,
            max_cooldown: tuning.player_max_cooldown,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    /// Step one `speed` along an axis, then clamp into the canvas
    pub fn step(&mut self, direction: Direction, canvas: Vec2) {
        let delta = match direction {
            Direction::Left => Vec2::new(-self.speed, 0.0),
            Direction::Right => Vec2::new(self.speed, 0.0),
            Direction::Up => Vec2::new(0.0, -self.speed),
            Direction::Down => Vec2::new(0.0, self.speed),
        };
        self.pos = clamp_into(self.pos + delta, self.size, canvas);
    }

    /// Follow a pointer drag, then clamp into the canvas
    pub fn drag(&mut self, delta: Vec2, canvas: Vec2) {
        self.pos = clamp_into(self.pos + delta, self.size, canvas);
    }

    /// Fire from the nose if the cooldown has elapsed
    pub fn shoot(&mut self, scale: Scale) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = self.max_cooldown;
        let muzzle = Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0);
        Some(Projectile::new(Owner::Player, muzzle, scale))
    }

    pub fn update(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        frame.blit(AssetId::Player, self.bounds());
    }
}

/// Enemy variants; the boss carries its own hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Boss { health: u8 },
}

/// A hostile ship advancing from the right edge
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Ticks until the next shot
    pub shoot_timer: f32,
}

impl Enemy {
    /// Random off-screen position just past the right edge
    fn spawn_pos(rng: &mut impl Rng, viewport: &Viewport, size: Vec2) -> Vec2 {
        let jitter = rng.random::<f32>() * SPAWN_X_JITTER * viewport.scale.x;
        let y = rng.random::<f32>() * (viewport.height - size.y).max(0.0);
        Vec2::new(viewport.width + jitter, y)
    }

    /// A regular enemy with random lane, speed and fire delay
    pub fn spawn_basic(rng: &mut impl Rng, viewport: &Viewport, tuning: &Tuning) -> Self {
        let scale = viewport.scale;
        let size = scale.size(ENEMY_SIZE, ENEMY_SIZE);
        let pos = Self::spawn_pos(rng, viewport, size);
        let speed = rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED) * scale.x;
        let shoot_timer = rng.random::<f32>() * tuning.enemy_initial_fire_max;
        Self {
            kind: EnemyKind::Basic,
            pos,
            size,
            speed,
            shoot_timer,
        }
    }

    /// A boss: slow, large, multi-hit
    pub fn spawn_boss(rng: &mut impl Rng, viewport: &Viewport, tuning: &Tuning) -> Self {
        let scale = viewport.scale;
        let size = scale.size(BOSS_SIZE, BOSS_SIZE);
        let pos = Self::spawn_pos(rng, viewport, size);
        Self {
            kind: EnemyKind::Boss {
                health: tuning.boss_health,
            },
            pos,
            size,
            speed: BOSS_SPEED * scale.x,
            shoot_timer: tuning.boss_fire_interval,
        }
    }

    /// A basic enemy at a fixed position (base speed range minimum)
    pub fn basic_at(pos: Vec2, scale: Scale, shoot_timer: f32) -> Self {
        Self {
            kind: EnemyKind::Basic,
            pos,
            size: scale.size(ENEMY_SIZE, ENEMY_SIZE),
            speed: ENEMY_MIN_SPEED * scale.x,
            shoot_timer,
        }
    }

    /// A boss at a fixed position
    pub fn boss_at(pos: Vec2, scale: Scale, health: u8, shoot_timer: f32) -> Self {
        Self {
            kind: EnemyKind::Boss { health },
            pos,
            size: scale.size(BOSS_SIZE, BOSS_SIZE),
            speed: BOSS_SPEED * scale.x,
            shoot_timer,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss { .. })
    }

    pub fn health(&self) -> Option<u8> {
        match self.kind {
            EnemyKind::Boss { health } => Some(health),
            EnemyKind::Basic => None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    /// Advance left and count down to the next shot.
    ///
    /// Returns the projectile fired this tick, if any.
    pub fn update(&mut self, rng: &mut impl Rng, tuning: &Tuning, scale: Scale) -> Option<Projectile> {
        self.pos.x -= self.speed;
        self.shoot_timer -= 1.0;
        if self.shoot_timer > 0.0 {
            return None;
        }

        self.shoot_timer = match self.kind {
            EnemyKind::Basic => tuning.enemy_fire_base + rng.random::<f32>() * tuning.enemy_fire_jitter,
            EnemyKind::Boss { .. } => tuning.boss_fire_interval,
        };
        let muzzle = Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0);
        Some(Projectile::new(Owner::Enemy, muzzle, scale))
    }

    /// Register a player hit. Returns `true` on the hit that destroys it.
    ///
    /// Basic enemies go down in one hit. A boss loses one health per hit and
    /// reports destruction only on the transition to zero; further hits on a
    /// dead boss change nothing.
    pub fn hit(&mut self) -> bool {
        match &mut self.kind {
            EnemyKind::Basic => true,
            EnemyKind::Boss { health } => {
                if *health == 0 {
                    return false;
                }
                *health -= 1;
                *health == 0
            }
        }
    }

    /// Fully past the left edge
    pub fn is_gone(&self) -> bool {
        self.pos.x < -self.size.x
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let image = match self.kind {
            EnemyKind::Basic => AssetId::Enemy,
            EnemyKind::Boss { .. } => AssetId::Boss,
        };
        frame.blit(image, self.bounds());
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

/// A shot; the sign of `speed` is its direction
#[derive(Debug, Clone)]
pub struct Projectile {
    pub owner: Owner,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Projectile {
    pub fn new(owner: Owner, pos: Vec2, scale: Scale) -> Self {
        let speed = match owner {
            Owner::Player => PLAYER_PROJECTILE_SPEED,
            Owner::Enemy => ENEMY_PROJECTILE_SPEED,
        };
        Self {
            owner,
            pos,
            size: scale.size(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed: speed * scale.x,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Outside either horizontal edge
    pub fn is_gone(&self, canvas_width: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > canvas_width
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let image = match self.owner {
            Owner::Player => AssetId::PlayerProjectile,
            Owner::Enemy => AssetId::EnemyProjectile,
        };
        frame.blit(image, self.bounds());
    }
}

/// A coin drifting left
#[derive(Debug, Clone)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Collectible {
    pub fn spawn(rng: &mut impl Rng, viewport: &Viewport) -> Self {
        let scale = viewport.scale;
        let size = scale.size(COIN_SIZE, COIN_SIZE);
        let jitter = rng.random::<f32>() * SPAWN_X_JITTER * scale.x;
        let y = rng.random::<f32>() * (viewport.height - size.y).max(0.0);
        Self {
            pos: Vec2::new(viewport.width + jitter, y),
            size,
            speed: COIN_SPEED * scale.x,
        }
    }

    pub fn at(pos: Vec2, scale: Scale) -> Self {
        Self {
            pos,
            size: scale.size(COIN_SIZE, COIN_SIZE),
            speed: COIN_SPEED * scale.x,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn is_gone(&self) -> bool {
        self.pos.x < -self.size.x
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        frame.blit(AssetId::Coin, self.bounds());
    }
}
