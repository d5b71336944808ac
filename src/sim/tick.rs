//! Fixed-cadence simulation tick
//!
//! Order matters: input, then movement, then culling, then collisions, then
//! the boss threshold. Colliding against stale positions changes outcomes.

use super::collision::resolve_collisions;
use super::entity::Direction;
use super::state::{GamePhase, GameState};
use crate::input::ControlState;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &ControlState) {
    // Title and game over freeze the world; only rendering continues
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    // Input-driven player actions
    let moves = [
        (input.left, Direction::Left),
        (input.right, Direction::Right),
        (input.up, Direction::Up),
        (input.down, Direction::Down),
    ];
    for (held, direction) in moves {
        if held {
            state.move_player(direction);
        }
    }
    state.drag_player(input.drag);
    if input.shoot {
        state.player_shoot();
    }

    state.player.update();

    // Enemies move and may fire
    let scale = state.viewport.scale;
    for enemy in &mut state.enemies {
        if let Some(shot) = enemy.update(&mut state.rng, &state.tuning, scale) {
            state.projectiles.push(shot);
        }
    }
    state.enemies.retain(|e| !e.is_gone());

    let canvas_width = state.viewport.width;
    for proj in &mut state.projectiles {
        proj.update();
    }
    state.projectiles.retain(|p| !p.is_gone(canvas_width));

    for coin in &mut state.collectibles {
        coin.update();
    }
    state.collectibles.retain(|c| !c.is_gone());

    resolve_collisions(state);

    // A run that just ended spawns nothing more
    state.spawn_boss_if_due();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Collectible, Enemy, Owner, Projectile};
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use crate::{Scale, Viewport};
    use glam::Vec2;
    use rand::Rng;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Viewport::base(), Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_title_tick_is_noop() {
        let mut state = GameState::new(1, Viewport::base(), Tuning::default());
        let input = ControlState {
            right: true,
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.time_ticks, 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_held_controls_move_and_shoot() {
        let mut state = running_state();
        let start = state.player.pos;
        let input = ControlState {
            right: true,
            down: true,
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.player.pos, start + Vec2::new(5.0, 5.0));
        assert_eq!(state.projectiles.len(), 1);
        // Fired, moved once, cooldown ticked once
        assert_eq!(state.projectiles[0].pos.x, 155.0 + 7.0);
        assert_eq!(state.player.shoot_cooldown, 19);

        // Holding fire does not queue shots during cooldown
        tick(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_opposite_controls_cancel() {
        let mut state = running_state();
        let start = state.player.pos;
        let input = ControlState {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_culls_off_screen_entities() {
        let mut state = running_state();
        state
            .enemies
            .push(Enemy::basic_at(Vec2::new(-49.0, 10.0), Scale::ONE, 500.0));
        state
            .collectibles
            .push(Collectible::at(Vec2::new(-29.0, 10.0), Scale::ONE));
        state.projectiles.push(Projectile::new(
            Owner::Player,
            Vec2::new(799.0, 10.0),
            Scale::ONE,
        ));
        state.projectiles.push(Projectile::new(
            Owner::Enemy,
            Vec2::new(3.0, 10.0),
            Scale::ONE,
        ));

        tick(&mut state, &ControlState::default());

        assert!(state.enemies.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_collision_uses_post_move_positions() {
        let mut state = running_state();
        // Coin just right of the player; one step of drift makes them overlap
        let p = state.player.pos;
        let coin_x = p.x + state.player.size.x + 1.0;
        state
            .collectibles
            .push(Collectible::at(Vec2::new(coin_x, p.y), Scale::ONE));

        tick(&mut state, &ControlState::default());

        assert_eq!(state.score, 20);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_ten_kills_summon_a_boss_next_check() {
        let mut state = running_state();
        for i in 0..10 {
            // Parked far from the player so the only interaction is the shot
            let y = 20.0 + i as f32 * 55.0;
            state
                .enemies
                .push(Enemy::basic_at(Vec2::new(600.0, y), Scale::ONE, 1000.0));
            state.projectiles.push(Projectile::new(
                Owner::Player,
                Vec2::new(590.0, y + 10.0),
                Scale::ONE,
            ));
        }

        tick(&mut state, &ControlState::default());

        assert_eq!(state.score, 100);
        assert_eq!(state.boss_threshold, 200);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].is_boss());
        assert!(state.events.contains(&GameEvent::BossSpawned));
    }

    #[test]
    fn test_last_life_ends_game_same_tick() {
        let mut state = running_state();
        state.player.lives = 1;
        let p = state.player.pos;
        // Enemy shot moves 5 left this tick and lands inside the player
        state.projectiles.push(Projectile::new(
            Owner::Enemy,
            Vec2::new(p.x + 20.0, p.y + 20.0),
            Scale::ONE,
        ));

        tick(&mut state, &ControlState::default());

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen afterwards
        let pos = state.player.pos;
        let ticks = state.time_ticks;
        tick(
            &mut state,
            &ControlState {
                up: true,
                shoot: true,
                ..Default::default()
            },
        );
        state.advance_clock(10_000.0);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_game_over_tick_skips_boss_spawn() {
        let mut state = running_state();
        state.player.lives = 1;
        state.score = 170;
        state.boss_threshold = 200;
        let p = state.player.pos;
        state
            .collectibles
            .push(Collectible::at(p + Vec2::splat(5.0), Scale::ONE));
        state
            .collectibles
            .push(Collectible::at(p + Vec2::splat(6.0), Scale::ONE));
        state.projectiles.push(Projectile::new(
            Owner::Enemy,
            Vec2::new(p.x + 20.0, p.y + 20.0),
            Scale::ONE,
        ));

        tick(&mut state, &ControlState::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 210);
        assert_eq!(state.boss_threshold, 200);
        assert!(state.enemies.iter().all(|e| !e.is_boss()));
    }

    #[test]
    fn test_lives_and_score_invariants_under_random_play() {
        let mut state = running_state();
        let mut script = rand_pcg::Pcg32::new(0xcafe, 0xf00d);
        let mut lives = state.player.lives;
        let mut score = state.score;

        for _ in 0..20_000 {
            let input = ControlState {
                left: script.random_bool(0.3),
                right: script.random_bool(0.3),
                up: script.random_bool(0.3),
                down: script.random_bool(0.3),
                shoot: script.random_bool(0.5),
                drag: Vec2::ZERO,
            };
            state.advance_clock(crate::consts::TICK_MS);
            tick(&mut state, &input);

            assert!(state.player.lives <= lives);
            assert!(state.score >= score);
            assert!(state.enemies.iter().all(|e| e.health().unwrap_or(1) > 0));
            lives = state.player.lives;
            score = state.score;

            if state.phase == GamePhase::GameOver {
                assert_eq!(state.player.lives, 0);
                assert!(!state.spawner.is_armed());
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state();
        let mut b = running_state();
        let inputs = [
            ControlState {
                up: true,
                shoot: true,
                ..Default::default()
            },
            ControlState::default(),
            ControlState {
                right: true,
                ..Default::default()
            },
        ];

        for step in 0..600 {
            let input = &inputs[step % inputs.len()];
            for state in [&mut a, &mut b] {
                state.advance_clock(crate::consts::TICK_MS);
                tick(state, input);
            }
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
