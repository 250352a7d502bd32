//! Autopilot for demo and headless runs
//!
//! Picks a pointer target each frame: dodge incoming shots first, then
//! chase the nearest power-up, then line up with the nearest small enemy
//! to ram it.

use glam::Vec2;

use crate::sim::{GameState, TickInput};

/// How far ahead (px) a shot counts as incoming
const DANGER_RANGE: f32 = 260.0;
/// Vertical band around the player where a shot is a threat
const DANGER_BAND: f32 = 70.0;
const DODGE_STEP: f32 = 140.0;

/// Input a simple player would give for this state
pub fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.center();

    let threat = state
        .shots
        .iter()
        .map(|s| s.pos + s.size / 2.0)
        .filter(|c| {
            let ahead = c.x - player.x;
            ahead > -20.0 && ahead < DANGER_RANGE && (c.y - player.y).abs() < DANGER_BAND
        })
        .min_by(|a, b| a.x.total_cmp(&b.x));

    let target = if let Some(shot) = threat {
        // Dodge away from the shot unless pinned against an edge
        let dir = if shot.y >= player.y { -1.0 } else { 1.0 };
        let room = if dir < 0.0 {
            player.y
        } else {
            state.arena.height - player.y
        };
        let dir = if room < state.player.size.y { -dir } else { dir };
        Vec2::new(player.x, player.y + dir * DODGE_STEP)
    } else if let Some(item) = nearest(player, state.power_ups.iter().map(|p| p.pos + p.size / 2.0)) {
        item
    } else if let Some(prey) = nearest(
        player,
        state
            .enemies
            .iter()
            .filter(|e| !e.is_boss())
            .map(|e| e.center()),
    ) {
        Vec2::new(player.x.max(prey.x - 200.0), prey.y)
    } else {
        Vec2::new(state.arena.width * 0.25, state.arena.height / 2.0)
    };

    TickInput {
        pointer: Some(target),
        ..Default::default()
    }
}

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, EnemyShot, GamePhase, PowerUp, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running() -> GameState {
        let mut state = GameState::new(Arena::default());
        state.phase = GamePhase::Ready;
        state.start();
        state
    }

    #[test]
    fn test_heads_for_power_up() {
        let mut state = running();
        state.power_ups.push(PowerUp::basic(Vec2::new(500.0, 100.0)));
        let input = autopilot(&state);
        assert_eq!(input.pointer, Some(Vec2::new(524.0, 124.0)));
    }

    #[test]
    fn test_dodges_incoming_shot() {
        let mut state = running();
        let center = state.player.center();
        state.power_ups.push(PowerUp::basic(Vec2::new(500.0, 100.0)));
        state.shots.push(EnemyShot::new(
            Vec2::new(center.x + 100.0, center.y + 10.0),
            Vec2::new(-260.0, 0.0),
        ));
        let target = autopilot(&state).pointer.unwrap();
        assert!(target.y < center.y);
        assert_eq!(target.x, center.x);
    }

    #[test]
    fn test_autopilot_collects_power() {
        let mut state = running();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..60 * 30 {
            let input = autopilot(&state);
            tick(&mut state, &input, 1.0 / 60.0, &mut rng);
            if !state.is_running() {
                break;
            }
        }
        assert!(state.supports_recruited > 0);
    }
}
