//! Spawn director: independent countdowns for every kind of arrival

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::pickup::PowerUp;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Countdown timers (seconds until the next spawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub grunt: f32,
    pub mid_boss: f32,
    /// One-shot; `None` once the boss has been sent in
    pub boss: Option<f32>,
    pub power_up: f32,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            grunt: 1.2,
            mid_boss: 12.0,
            boss: Some(BOSS_INITIAL_SPAWN_TIME),
            power_up: 6.0,
        }
    }
}

/// Grunt spawn interval, shrinking with session time down to a floor
pub fn grunt_interval(elapsed: f32) -> f32 {
    (2.1 - elapsed * 0.008).max(0.9)
}

/// Run every spawn countdown for one frame
pub fn run_spawns<R: Rng>(state: &mut GameState, dt: f32, rng: &mut R) {
    if state.pending_clear.is_some() {
        return;
    }

    let interval = grunt_interval(state.elapsed);
    state.timers.grunt -= dt;
    if state.timers.grunt <= 0.0 {
        spawn_enemy(state, EnemyKind::Grunt, rng);
        state.timers.grunt = interval;
    }

    state.timers.mid_boss -= dt;
    if state.timers.mid_boss <= 0.0 && state.count_alive(EnemyKind::MidBoss) == 0 {
        spawn_enemy(state, EnemyKind::MidBoss, rng);
        state.timers.mid_boss = rng.random_range(10.0..16.0);
    }

    if let Some(timer) = state.timers.boss {
        let timer = timer - dt;
        state.timers.boss = Some(timer);
        if timer <= 0.0 && !state.boss.present && !state.boss.defeated {
            state.timers.boss = None;
            spawn_enemy(state, EnemyKind::Boss, rng);
        }
    }

    state.timers.power_up -= dt;
    if state.timers.power_up <= 0.0 {
        let y = rng.random::<f32>() * (state.arena.height - 120.0) + 60.0;
        state
            .power_ups
            .push(PowerUp::basic(Vec2::new(state.arena.width + 80.0, y)));
        state.timers.power_up = rng.random_range(8.0..14.0);
    }
}

/// Create an enemy of `kind` past the right edge
pub fn spawn_enemy<R: Rng>(state: &mut GameState, kind: EnemyKind, rng: &mut R) {
    let enemy = Enemy::spawn(kind, &state.arena, rng);
    log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, enemy.pos.x, enemy.pos.y);
    state.enemies.push(enemy);
    if kind == EnemyKind::Boss {
        state.boss.on_spawn();
        log::info!("Boss incoming at t={:.1}s", state.elapsed);
        state.push_event(GameEvent::BossSpawned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, GamePhase};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running() -> GameState {
        let mut state = GameState::new(Arena::default());
        state.phase = GamePhase::Ready;
        state.start();
        state
    }

    #[test]
    fn test_grunt_interval_floor() {
        assert!((grunt_interval(0.0) - 2.1).abs() < 1e-6);
        assert!((grunt_interval(100.0) - 1.3).abs() < 1e-5);
        assert_eq!(grunt_interval(150.0), 0.9);
        assert_eq!(grunt_interval(10_000.0), 0.9);
    }

    #[test]
    fn test_first_grunt_after_initial_delay() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(5);
        run_spawns(&mut state, 1.0, &mut rng);
        assert!(state.enemies.is_empty());
        run_spawns(&mut state, 0.25, &mut rng);
        assert_eq!(state.count_alive(EnemyKind::Grunt), 1);
        assert!((state.timers.grunt - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_mid_boss_waits_for_previous() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(5);
        state.timers.mid_boss = 0.0;
        run_spawns(&mut state, 0.01, &mut rng);
        assert_eq!(state.count_alive(EnemyKind::MidBoss), 1);
        assert!((10.0..16.0).contains(&state.timers.mid_boss));

        state.timers.mid_boss = 0.0;
        run_spawns(&mut state, 0.01, &mut rng);
        assert_eq!(state.count_alive(EnemyKind::MidBoss), 1);
        assert!(state.timers.mid_boss < 0.0);
    }

    #[test]
    fn test_boss_spawns_once() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut t = 0.0;
        while t < BOSS_INITIAL_SPAWN_TIME + 0.1 {
            run_spawns(&mut state, 0.05, &mut rng);
            t += 0.05;
        }
        assert_eq!(state.count_alive(EnemyKind::Boss), 1);
        assert!(state.boss.present);
        assert_eq!(state.timers.boss, None);
        assert!(state.events.contains(&GameEvent::BossSpawned));

        // Even if the boss leaves, it never comes back
        state.enemies.retain(|e| !e.is_boss());
        state.boss.on_escape();
        for _ in 0..1000 {
            run_spawns(&mut state, 0.05, &mut rng);
        }
        assert_eq!(state.count_alive(EnemyKind::Boss), 0);
    }

    #[test]
    fn test_roaming_power_up() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(9);
        state.timers.power_up = 0.0;
        run_spawns(&mut state, 0.01, &mut rng);
        assert_eq!(state.power_ups.len(), 1);
        let item = &state.power_ups[0];
        assert_eq!(item.pos.x, state.arena.width + 80.0);
        assert!(item.pos.y >= 60.0 && item.pos.y < state.arena.height - 60.0);
        assert!((8.0..14.0).contains(&state.timers.power_up));
    }

    #[test]
    fn test_paused_during_pending_clear() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(9);
        state.pending_clear = Some(1.0);
        state.timers.grunt = 0.0;
        run_spawns(&mut state, 0.05, &mut rng);
        assert!(state.enemies.is_empty());
        assert_eq!(state.timers.grunt, 0.0);
    }
}
