//! Frame driver
//!
//! Advances the session by one variable-length frame. The order is fixed:
//! clocks, player and escorts, shots, enemies, power-ups, explosions,
//! collisions, spawns, the boss clock and finally the pending clear.

use glam::Vec2;
use rand::Rng;

use super::boss::ClockStatus;
use super::collision::{defeat_enemy, resolve_collisions};
use super::spawn::run_spawns;
use super::state::GameState;
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in arena space; takes priority over the keys
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Unnormalized direction from the four keys
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Sanitize a frame delta: non-finite or negative becomes 0, long frames
/// are capped
pub fn clamp_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(MAX_FRAME_DT)
}

/// Advance the game state by one frame
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut R) {
    if !state.is_running() {
        return;
    }
    let dt = clamp_dt(dt);
    let arena = state.arena;

    state.elapsed += dt;
    state.background_offset =
        (state.background_offset + BACKGROUND_SCROLL_SPEED * dt) % arena.width;

    state.player.update(dt, input, &arena);

    for shot in &mut state.shots {
        shot.update(dt);
    }
    state.shots.retain(|s| !s.is_offscreen(&arena));

    update_enemies(state, dt, rng);

    for item in &mut state.power_ups {
        item.update(dt, &arena);
    }
    state.power_ups.retain(|p| !p.is_offscreen());

    for boom in &mut state.explosions {
        boom.update(dt);
    }
    state.explosions.retain(|e| !e.is_done());

    resolve_collisions(state, rng);
    run_spawns(state, dt, rng);

    if state.boss.advance(dt) == ClockStatus::TimedOut {
        state.trigger_boss_timeout();
    }

    if let Some(timer) = state.pending_clear {
        if state.is_running() {
            let timer = timer - dt;
            if timer <= 0.0 {
                state.trigger_victory();
            } else {
                state.pending_clear = Some(timer);
            }
        }
    }
}

fn update_enemies<R: Rng>(state: &mut GameState, dt: f32, rng: &mut R) {
    let arena = state.arena;
    let mut i = 0;
    while i < state.enemies.len() {
        if let Some(shot) = state.enemies[i].update(dt, &arena, rng) {
            state.shots.push(shot);
        }

        let enemy = &state.enemies[i];
        if enemy.is_dead() {
            let enemy = state.enemies.remove(i);
            defeat_enemy(state, enemy, rng);
        } else if enemy.is_offscreen() {
            let enemy = state.enemies.remove(i);
            if enemy.is_boss() {
                state.boss.on_escape();
                log::info!("Boss left the arena at t={:.1}s", state.elapsed);
            }
        } else {
            i += 1;
        }
    }
}
