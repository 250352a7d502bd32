//! Collision detection and resolution
//!
//! One pass per frame, after everything has moved, in a fixed order:
//! enemies against escorts then the player body, enemy shots against
//! escorts then the player body, and finally power-ups against the player.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use super::explosion::{Explosion, ExplosionKind};
use super::pickup::{POWER_UP_SIZE, PowerUp};
use super::player::Upgrade;
use super::rect::Hitbox;
use super::state::{GameEvent, GameState};
use crate::clamp;
use crate::consts::*;

/// Resolve every contact for this frame
pub fn resolve_collisions<R: Rng>(state: &mut GameState, rng: &mut R) {
    if state.pending_clear.is_some() {
        return;
    }
    enemies_vs_player(state, rng);
    shots_vs_player(state);
    power_ups_vs_player(state);
}

fn enemies_vs_player<R: Rng>(state: &mut GameState, rng: &mut R) {
    let arena = state.arena;
    let player_box = state.player.hitbox();

    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy_box = state.enemies[i].hitbox();

        // Escorts are checked back to front; the first one touching handles it
        let support_hit = state
            .player
            .supports
            .iter()
            .rposition(|s| s.hitbox().overlaps(&enemy_box));

        if let Some(s) = support_hit {
            let enemy = &mut state.enemies[i];
            if !enemy.is_dead() {
                enemy.take_damage(1);
            }
            if enemy.is_dead() {
                let enemy = state.enemies.remove(i);
                defeat_enemy(state, enemy, rng);
                continue;
            }

            if !state.player.is_invincible() {
                let support_center = state.player.supports[s].center();
                let min_side = enemy.size.min_element();
                let destroyed = state.player.supports[s].absorb_hit();
                let size = if destroyed {
                    min_side.max(96.0)
                } else {
                    min_side.max(60.0)
                };
                state.explosions.push(Explosion::new(support_center, size));

                if !enemy.is_boss() {
                    let away = (enemy.center() - support_center).normalize_or_zero();
                    let pushed = enemy.pos + away * SUPPORT_PUSH_DISTANCE;
                    enemy.pos.x = clamp(pushed.x, -enemy.size.x, arena.width);
                    enemy.pos.y = clamp(pushed.y, -enemy.size.y, arena.height - enemy.size.y);
                }

                if destroyed {
                    lose_support(state, s);
                }
            }
            continue;
        }

        if !player_box.overlaps(&enemy_box) {
            continue;
        }

        if state.player.attack_cooldown <= 0.0 {
            let damage = state.player.attack_damage();
            if damage > 0 {
                let enemy = &mut state.enemies[i];
                enemy.take_damage(damage);
                if enemy.is_dead() {
                    let enemy = state.enemies.remove(i);
                    defeat_enemy(state, enemy, rng);
                } else {
                    let size = enemy.size.min_element().max(72.0);
                    let center = enemy.center();
                    state.explosions.push(Explosion::new(center, size));
                }
            }
            state.player.attack_cooldown = PLAYER_ATTACK_COOLDOWN;
        }

        state.player.shift_x(-PLAYER_CONTACT_SHIFT, &arena);
        state.player.apply_knockback(PLAYER_CONTACT_KNOCKBACK);
        // Only one enemy can ram the player body per frame
        break;
    }
}

fn shots_vs_player(state: &mut GameState) {
    let player_box = state.player.hitbox();

    let mut i = state.shots.len();
    while i > 0 {
        i -= 1;
        let shot_box = state.shots[i].hitbox();

        let support_hit = state
            .player
            .supports
            .iter()
            .rposition(|s| s.hitbox().overlaps(&shot_box));

        if let Some(s) = support_hit {
            state.shots.remove(i);
            if !state.player.is_invincible() {
                let center = state.player.supports[s].center();
                let destroyed = state.player.supports[s].absorb_hit();
                let size = if destroyed { 96.0 } else { 64.0 };
                state.explosions.push(Explosion::new(center, size));
                if destroyed {
                    lose_support(state, s);
                }
            }
            continue;
        }

        if player_box.overlaps(&shot_box) {
            state.shots.remove(i);
            hit_player(state);
        }
    }
}

fn power_ups_vs_player(state: &mut GameState) {
    let arena = state.arena;

    let mut i = state.power_ups.len();
    while i > 0 {
        i -= 1;
        if !state.player.hits(&state.power_ups[i]) {
            continue;
        }
        let item = state.power_ups.remove(i);
        match state.player.upgrade_power(item.power_amount, &arena) {
            Upgrade::Applied { recruited } => {
                state.supports_recruited += recruited as u32;
                log::debug!(
                    "Power up to {} (+{} escorts)",
                    state.player.power_level,
                    recruited
                );
                state.push_event(GameEvent::PowerChanged {
                    level: state.player.power_level,
                });
            }
            Upgrade::AtMax => {
                state.score += MAX_POWER_BONUS_SCORE;
            }
        }
        let center = state.player.center();
        state
            .explosions
            .push(Explosion::with_kind(center, 80.0, ExplosionKind::Star));
    }
}

/// Escort `index` ran out of hit points
fn lose_support(state: &mut GameState, index: usize) {
    let arena = state.arena;
    if state.player.remove_support_at(index, &arena) {
        state.push_event(GameEvent::PowerChanged {
            level: state.player.power_level,
        });
    }
    state.push_event(GameEvent::SupportLost);
}

/// A shot reached the player body
pub fn hit_player(state: &mut GameState) {
    if state.player.is_invincible() {
        return;
    }
    let arena = state.arena;
    if state.player.decrease_power(&arena) {
        state.push_event(GameEvent::PowerChanged {
            level: state.player.power_level,
        });
    }
    let center = state.player.center();
    state.explosions.push(Explosion::new(center, 96.0));
    state.player.invincible_timer = PLAYER_HIT_INVINCIBILITY;
    state.player.attack_cooldown = 0.0;
    state.push_event(GameEvent::PlayerHit);
}

/// Score, explosion and loot for a killed enemy
pub fn defeat_enemy<R: Rng>(state: &mut GameState, enemy: Enemy, rng: &mut R) {
    let stats = enemy.stats();
    let kind = enemy.kind();
    state.score += stats.points;
    state
        .explosions
        .push(Explosion::new(enemy.center(), enemy.size.max_element()));
    log::debug!("{:?} defeated (+{})", kind, stats.points);
    state.push_event(GameEvent::EnemyDefeated {
        kind,
        points: stats.points,
    });

    if rng.random::<f32>() < stats.drop_rate {
        let arena = state.arena;
        let drop = Vec2::new(
            clamp(
                enemy.pos.x + enemy.size.x / 2.0 - POWER_UP_SIZE / 2.0,
                12.0,
                arena.width - POWER_UP_SIZE - 12.0,
            ),
            clamp(
                enemy.pos.y + enemy.size.y + 16.0,
                12.0,
                arena.height - POWER_UP_SIZE - 12.0,
            ),
        );
        state.power_ups.push(PowerUp::drop_for(kind, drop));
    }

    if enemy.is_boss() {
        state.boss.on_defeat();
        state.pending_clear = Some(GAME_CLEAR_DELAY);
        log::info!("Boss defeated at t={:.1}s", state.elapsed);
        state.push_event(GameEvent::BossDefeated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{EnemyBehavior, EnemyKind, EnemyShot};
    use crate::sim::pickup::PowerUpSprite;
    use crate::sim::state::{Arena, GamePhase};
    use crate::sim::test_support::FixedRng;

    fn running() -> GameState {
        let mut state = GameState::new(Arena::default());
        state.phase = GamePhase::Ready;
        state.start();
        state
    }

    /// Enemy of `kind` centered on `center`
    fn enemy_at(kind: EnemyKind, center: Vec2) -> Enemy {
        let behavior = match kind {
            EnemyKind::Grunt => EnemyBehavior::Grunt,
            EnemyKind::MidBoss => EnemyBehavior::MidBoss { fire_timer: 10.0 },
            EnemyKind::Boss => unreachable!("boss fixtures build their own brain"),
        };
        let size = kind.stats().size;
        Enemy::new(kind, center - size / 2.0, 0.0, behavior)
    }

    fn shot_at(center: Vec2) -> EnemyShot {
        EnemyShot::new(Vec2::new(center.x - 28.0, center.y), Vec2::new(-260.0, 0.0))
    }

    #[test]
    fn test_grunt_rammed_by_player() {
        let mut state = running();
        let center = state.player.center();
        state.enemies.push(enemy_at(EnemyKind::Grunt, center));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 120);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.explosions[0].center.distance(center) < 1e-3);
        assert_eq!(state.explosions[0].size, 102.0);
        // Low roll is under the 75% drop rate
        assert_eq!(state.power_ups.len(), 1);
        let drop = &state.power_ups[0];
        assert_eq!(drop.sprite, PowerUpSprite::Blue);
        assert!(drop.pos.y > center.y);
        assert_eq!(state.player.attack_cooldown, PLAYER_ATTACK_COOLDOWN);
        assert_eq!(state.player.knockback_vel_x, PLAYER_CONTACT_KNOCKBACK);
    }

    #[test]
    fn test_no_drop_on_high_roll() {
        let mut state = running();
        let center = state.player.center();
        state.enemies.push(enemy_at(EnemyKind::Grunt, center));
        resolve_collisions(&mut state, &mut FixedRng::high());
        assert_eq!(state.score, 120);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_ram_respects_cooldown() {
        let mut state = running();
        let center = state.player.center();
        state.enemies.push(enemy_at(EnemyKind::MidBoss, center));
        state.player.attack_cooldown = 0.1;
        let start_x = state.player.pos.x;

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert_eq!(state.enemies[0].hp, 3);
        assert_eq!(state.player.attack_cooldown, 0.1);
        assert_eq!(state.player.pos.x, start_x - PLAYER_CONTACT_SHIFT);
        assert_eq!(state.player.knockback_vel_x, PLAYER_CONTACT_KNOCKBACK);
    }

    #[test]
    fn test_ram_surviving_enemy() {
        let mut state = running();
        let center = state.player.center();
        state.enemies.push(enemy_at(EnemyKind::MidBoss, center));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert_eq!(state.enemies[0].hp, 2);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].size, 104.0);
        assert_eq!(state.player.attack_cooldown, PLAYER_ATTACK_COOLDOWN);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_support_absorbs_enemy_and_pushes_it() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(1, &arena);
        let support_center = state.player.supports[0].center();
        // Slightly right of the escort so the push direction is known
        let mut enemy = enemy_at(EnemyKind::MidBoss, support_center + Vec2::new(20.0, 0.0));
        enemy.hp = 5;
        let start_x = enemy.pos.x;
        state.enemies.push(enemy);

        resolve_collisions(&mut state, &mut FixedRng::low());

        let enemy = &state.enemies[0];
        assert_eq!(enemy.hp, 4);
        assert!((enemy.pos.x - (start_x + SUPPORT_PUSH_DISTANCE)).abs() < 1e-3);
        assert_eq!(state.player.supports[0].remaining_hits, SUPPORT_MAX_HITS - 1);
        assert_eq!(state.player.knockback_vel_x, 0.0);
    }

    #[test]
    fn test_support_kill_counts_as_kill() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(1, &arena);
        let support_center = state.player.supports[0].center();
        state.enemies.push(enemy_at(EnemyKind::Grunt, support_center));

        resolve_collisions(&mut state, &mut FixedRng::high());

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 120);
        assert_eq!(state.player.supports[0].remaining_hits, SUPPORT_MAX_HITS);
    }

    #[test]
    fn test_invincible_escorts_never_lose_hits() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(1, &arena);
        state.player.invincible_timer = 1.0;
        let support_center = state.player.supports[0].center();
        let mut enemy = enemy_at(EnemyKind::MidBoss, support_center);
        enemy.hp = 50;
        state.enemies.push(enemy);

        for _ in 0..20 {
            resolve_collisions(&mut state, &mut FixedRng::low());
            state.shots.push(shot_at(support_center));
            resolve_collisions(&mut state, &mut FixedRng::low());
        }
        assert_eq!(state.player.supports[0].remaining_hits, SUPPORT_MAX_HITS);
        assert!(state.shots.is_empty());
    }

    #[test]
    fn test_escort_destroyed_after_ten_shots() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(1, &arena);
        let support_center = state.player.supports[0].center();

        for _ in 0..9 {
            state.shots.push(shot_at(support_center));
            resolve_collisions(&mut state, &mut FixedRng::low());
            assert_eq!(state.player.supports.len(), 1);
        }
        state.shots.push(shot_at(support_center));
        resolve_collisions(&mut state, &mut FixedRng::low());

        assert!(state.player.supports.is_empty());
        assert_eq!(state.player.power_level, 1);
        assert!(state.events.contains(&GameEvent::SupportLost));
    }

    #[test]
    fn test_shot_hits_player_at_base_level() {
        let mut state = running();
        state.player.attack_cooldown = 0.2;
        let center = state.player.center();
        state.shots.push(shot_at(center));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert!(state.shots.is_empty());
        assert_eq!(state.player.power_level, 1);
        assert_eq!(state.player.invincible_timer, PLAYER_HIT_INVINCIBILITY);
        assert_eq!(state.player.attack_cooldown, 0.0);
        assert!(state.events.contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_shot_while_invincible_is_consumed() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(3, &arena);
        state.player.invincible_timer = 0.5;
        // Park escorts far away so only the body is hit
        for ship in &mut state.player.supports {
            ship.pos = Vec2::new(900.0, 500.0);
        }
        state.shots.push(shot_at(state.player.center()));

        resolve_collisions(&mut state, &mut FixedRng::low());
        assert!(state.shots.is_empty());
        assert_eq!(state.player.power_level, 4);
    }

    #[test]
    fn test_power_up_pickup() {
        let mut state = running();
        let center = state.player.center();
        state
            .power_ups
            .push(PowerUp::drop_for(EnemyKind::MidBoss, center - Vec2::splat(24.0)));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.power_level, 6);
        assert_eq!(state.player.supports.len(), 5);
        assert_eq!(state.supports_recruited, 5);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Star);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_power_up_at_max_awards_bonus() {
        let mut state = running();
        let arena = state.arena;
        state.player.upgrade_power(MAX_POWER_LEVEL, &arena);
        let center = state.player.center();
        state.power_ups.push(PowerUp::basic(center - Vec2::splat(24.0)));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert_eq!(state.score, MAX_POWER_BONUS_SCORE);
        assert_eq!(state.player.power_level, MAX_POWER_LEVEL);
        assert_eq!(state.player.supports.len(), MAX_SUPPORT_SHIPS);
    }

    #[test]
    fn test_frozen_while_clear_pending() {
        let mut state = running();
        state.pending_clear = Some(1.0);
        let center = state.player.center();
        state.enemies.push(enemy_at(EnemyKind::Grunt, center));
        state.shots.push(shot_at(center));

        resolve_collisions(&mut state, &mut FixedRng::low());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.shots.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_boss_kill_arms_clear() {
        let mut state = running();
        let mut rng = FixedRng::low();
        let mut boss = Enemy::spawn(EnemyKind::Boss, &state.arena, &mut rng);
        boss.hp = 0;
        state.boss.on_spawn();

        defeat_enemy(&mut state, boss, &mut rng);

        assert_eq!(state.score, 3200);
        assert!(state.boss.defeated);
        assert!(!state.boss.present);
        assert_eq!(state.pending_clear, Some(GAME_CLEAR_DELAY));
        assert_eq!(state.power_ups.len(), 1);
    }
}
