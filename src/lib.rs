//! Orange Dynasty - a side-scrolling canvas shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `renderer`: Canvas render pass over an abstract drawing sink
//! - `input`: Keyboard/touch/pointer events folded into a per-tick control state
//! - `assets`: Asset catalogue and load-state tracking
//! - `platform`: Browser glue (canvas, image/audio loading)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants, expressed at the base resolution
pub mod consts {
    /// Logical base resolution every size and speed is authored against
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Fraction of the browser window the canvas may occupy
    pub const VIEWPORT_FILL: f32 = 0.9;

    /// Fixed simulation timestep (ms)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (tab switches, breakpoints)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Basic enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_MIN_SPEED: f32 = 3.0;
    pub const ENEMY_MAX_SPEED: f32 = 5.0;
    /// Horizontal jitter for off-screen spawns
    pub const SPAWN_X_JITTER: f32 = 100.0;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 100.0;
    pub const BOSS_SPEED: f32 = 1.0;

    /// Projectile defaults (speed sign encodes direction)
    pub const PROJECTILE_WIDTH: f32 = 20.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 7.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = -5.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 30.0;
    pub const COIN_SPEED: f32 = 2.0;

    /// Background scroll per rendered frame
    pub const BACKGROUND_SCROLL: f32 = 1.0;
}

/// Per-axis scale from the base resolution to the current canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Scale a base-resolution size
    #[inline]
    pub fn size(&self, w: f32, h: f32) -> Vec2 {
        Vec2::new(w * self.x, h * self.y)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Drawable canvas area and the scale it implies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: Scale,
}

impl Viewport {
    /// A viewport at exactly the base resolution
    pub fn base() -> Self {
        Self::from_size(consts::BASE_WIDTH, consts::BASE_HEIGHT)
    }

    /// A viewport of the given canvas size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: Scale {
                x: width / consts::BASE_WIDTH,
                y: height / consts::BASE_HEIGHT,
            },
        }
    }

    /// Fit the canvas into a browser window.
    ///
    /// Uses 90% of the window, preserves the base aspect ratio and never grows
    /// past the base resolution. The size is rounded to whole canvas pixels.
    pub fn fit(window_width: f32, window_height: f32) -> Self {
        use consts::*;

        let aspect = BASE_WIDTH / BASE_HEIGHT;
        let mut width = window_width * VIEWPORT_FILL;
        let mut height = window_height * VIEWPORT_FILL;
        if height <= 0.0 || width <= 0.0 {
            return Self::base();
        }

        if width / height > aspect {
            height = height.min(BASE_HEIGHT);
            width = height * aspect;
        } else {
            width = width.min(BASE_WIDTH);
            height = width / aspect;
        }
        Self::from_size(width.round(), height.round())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::base()
    }
}
