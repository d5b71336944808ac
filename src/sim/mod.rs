//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per tick, positions in canvas pixels
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies beyond the `Frame` draw hooks

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, is_colliding, resolve_collisions};
pub use entity::{Collectible, Direction, Enemy, EnemyKind, Owner, Player, Projectile};
pub use spawner::{RepeatingTimer, SpawnRequest, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
