//! Collision detection and resolution
//!
//! Overlap is strict AABB intersection; boxes that only share an edge do not
//! collide. Resolution runs three independent passes over the post-move
//! collections. Removals are marked during a read-only scan and applied once
//! per pass with `retain`, so every live entity is visited exactly once.

use glam::Vec2;

use super::entity::{EnemyKind, Owner};
use super::state::{GameEvent, GameState};

/// Axis-aligned box covering `[min.x, min.x+size.x) x [min.y, min.y+size.y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Strict overlap test
#[inline]
pub fn is_colliding(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.min.x + b.size.x
        && a.min.x + a.size.x > b.min.x
        && a.min.y < b.min.y + b.size.y
        && a.min.y + a.size.y > b.min.y
}

/// Run all collision passes for one tick
pub fn resolve_collisions(state: &mut GameState) {
    player_shots_vs_enemies(state);
    enemy_shots_vs_player(state);
    player_vs_collectibles(state);
}

/// Keep the items whose flag is unset
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Pass 1: each player shot is spent on the first live enemy it overlaps
fn player_shots_vs_enemies(state: &mut GameState) {
    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.enemies.len()];

    for (pi, proj) in state.projectiles.iter().enumerate() {
        if proj.owner != Owner::Player {
            continue;
        }
        let shot = proj.bounds();

        for (ei, enemy) in state.enemies.iter_mut().enumerate() {
            if destroyed[ei] || !is_colliding(&shot, &enemy.bounds()) {
                continue;
            }
            spent[pi] = true;

            match enemy.kind {
                EnemyKind::Boss { .. } => {
                    if enemy.hit() {
                        destroyed[ei] = true;
                        state.score = state.score.saturating_add(state.tuning.boss_bonus);
                        state.events.push(GameEvent::BossDestroyed);
                        log::info!("Boss destroyed, score {}", state.score);
                    } else {
                        state.events.push(GameEvent::BossHit);
                    }
                }
                EnemyKind::Basic => {
                    destroyed[ei] = true;
                    state.score = state.score.saturating_add(state.tuning.enemy_score);
                    state.events.push(GameEvent::EnemyDestroyed);
                }
            }
            break;
        }
    }

    retain_unmarked(&mut state.projectiles, &spent);
    retain_unmarked(&mut state.enemies, &destroyed);
}

/// Pass 2: enemy shots cost the player a life each
fn enemy_shots_vs_player(state: &mut GameState) {
    let target = state.player.bounds();
    let spent: Vec<bool> = state
        .projectiles
        .iter()
        .map(|proj| proj.owner == Owner::Enemy && is_colliding(&proj.bounds(), &target))
        .collect();

    for _ in spent.iter().filter(|hit| **hit) {
        // Checked before decrementing: lives never go below zero
        if state.player.lives == 0 {
            break;
        }
        state.player.lives -= 1;
        state.events.push(GameEvent::PlayerHit);

        if state.player.lives == 0 {
            state.enter_game_over();
        }
    }

    retain_unmarked(&mut state.projectiles, &spent);
}

/// Pass 3: coins touched by the player are collected
fn player_vs_collectibles(state: &mut GameState) {
    let collector = state.player.bounds();
    let before = state.collectibles.len();

    state
        .collectibles
        .retain(|coin| !is_colliding(&collector, &coin.bounds()));

    let picked = (before - state.collectibles.len()) as u64;
    if picked > 0 {
        state.score = state
            .score
            .saturating_add(picked.saturating_mul(state.tuning.coin_score));
        for _ in 0..picked {
            state.events.push(GameEvent::CoinCollected);
        }
    }
}
