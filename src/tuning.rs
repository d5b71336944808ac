//! Data-driven game balance
//!
//! Every gameplay number that is not a geometry constant lives here so it can
//! be overridden from JSON without a rebuild. Missing fields keep defaults.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Upper bound on starting lives
pub const MAX_LIVES: u8 = 3;
/// Upper bound on boss hit points
pub const MAX_BOSS_HEALTH: u8 = 5;
/// Largest single score award
pub const MAX_AWARD: u64 = 1_000_000;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives the player starts each session with
    pub player_lives: u8,
    /// Ticks between player shots
    pub player_max_cooldown: u32,

    /// Wall-clock interval between basic enemy spawns (ms)
    pub enemy_spawn_interval_ms: f64,
    /// Wall-clock interval between coin spawns (ms)
    pub collectible_spawn_interval_ms: f64,

    /// Basic enemy fire delay after a shot is `base + U[0, jitter]` ticks
    pub enemy_fire_base: f32,
    pub enemy_fire_jitter: f32,
    /// Upper bound of the random initial enemy fire delay
    pub enemy_initial_fire_max: f32,

    /// Boss hit points
    pub boss_health: u8,
    /// Ticks between boss shots
    pub boss_fire_interval: f32,
    /// Score at which the first boss appears
    pub boss_threshold_start: u64,
    /// Added to the threshold each time a boss spawns
    pub boss_threshold_step: u64,

    /// Score for destroying a basic enemy
    pub enemy_score: u64,
    /// Score for destroying a boss
    pub boss_bonus: u64,
    /// Score for picking up a coin
    pub coin_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_lives: 3,
            player_max_cooldown: 20,

            enemy_spawn_interval_ms: 2000.0,
            collectible_spawn_interval_ms: 5000.0,

            enemy_fire_base: 100.0,
            enemy_fire_jitter: 100.0,
            enemy_initial_fire_max: 100.0,

            boss_health: 5,
            boss_fire_interval: 50.0,
            boss_threshold_start: 100,
            boss_threshold_step: 100,

            enemy_score: 10,
            boss_bonus: 50,
            coin_score: 20,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning overrides
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_lives == 0 || self.player_lives > MAX_LIVES {
            return Err(GameError::TuningValue {
                field: "player_lives",
                reason: "must be between 1 and 3",
            });
        }
        if self.enemy_spawn_interval_ms <= 0.0 || !self.enemy_spawn_interval_ms.is_finite() {
            return Err(GameError::TuningValue {
                field: "enemy_spawn_interval_ms",
                reason: "must be positive",
            });
        }
        if self.collectible_spawn_interval_ms <= 0.0
            || !self.collectible_spawn_interval_ms.is_finite()
        {
            return Err(GameError::TuningValue {
                field: "collectible_spawn_interval_ms",
                reason: "must be positive",
            });
        }
        if !self.enemy_fire_base.is_finite()
            || !self.enemy_fire_jitter.is_finite()
            || self.enemy_fire_base <= 0.0
            || self.enemy_fire_jitter < 0.0
        {
            return Err(GameError::TuningValue {
                field: "enemy_fire_base",
                reason: "base must be positive and jitter non-negative",
            });
        }
        if !self.enemy_initial_fire_max.is_finite() || self.enemy_initial_fire_max < 0.0 {
            return Err(GameError::TuningValue {
                field: "enemy_initial_fire_max",
                reason: "must be non-negative",
            });
        }
        if self.boss_health == 0 || self.boss_health > MAX_BOSS_HEALTH {
            return Err(GameError::TuningValue {
                field: "boss_health",
                reason: "must be between 1 and 5",
            });
        }
        if !self.boss_fire_interval.is_finite() || self.boss_fire_interval <= 0.0 {
            return Err(GameError::TuningValue {
                field: "boss_fire_interval",
                reason: "must be positive",
            });
        }
        if self.boss_threshold_step == 0 {
            return Err(GameError::TuningValue {
                field: "boss_threshold_step",
                reason: "must be positive",
            });
        }
        let awards = [
            ("enemy_score", self.enemy_score),
            ("boss_bonus", self.boss_bonus),
            ("coin_score", self.coin_score),
        ];
        for (field, award) in awards {
            if award > MAX_AWARD {
                return Err(GameError::TuningValue {
                    field,
                    reason: "must be at most 1000000",
                });
            }
        }
        Ok(())
    }

    /// Parse overrides, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                Self::default()
            }
        }
    }

    /// Read overrides from an inline `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
