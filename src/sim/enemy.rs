//! Enemy fish and the shots they fire

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss::BossBrain;
use super::rect::{Hitbox, Rect};
use super::state::Arena;
use crate::clamp;
use crate::consts::*;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    MidBoss,
    Boss,
}

/// Static per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub points: u64,
    pub drop_rate: f32,
    pub fire_interval: Option<f32>,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Grunt => EnemyStats {
                size: Vec2::new(102.0, 84.0),
                speed: 230.0,
                hp: 1,
                points: 120,
                drop_rate: 0.75,
                fire_interval: None,
            },
            EnemyKind::MidBoss => EnemyStats {
                size: Vec2::new(128.0, 104.0),
                speed: 170.0,
                hp: 3,
                points: 620,
                drop_rate: 0.95,
                fire_interval: Some(2.4),
            },
            EnemyKind::Boss => EnemyStats {
                size: Vec2::new(440.0, 328.0),
                speed: 110.0,
                hp: 100,
                points: 3200,
                drop_rate: 1.0,
                fire_interval: None,
            },
        }
    }
}

/// Per-kind behaviour state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    Grunt,
    MidBoss { fire_timer: f32 },
    Boss(BossBrain),
}

impl EnemyBehavior {
    pub fn kind(&self) -> EnemyKind {
        match self {
            EnemyBehavior::Grunt => EnemyKind::Grunt,
            EnemyBehavior::MidBoss { .. } => EnemyKind::MidBoss,
            EnemyBehavior::Boss(_) => EnemyKind::Boss,
        }
    }
}

/// An enemy fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    /// Seconds alive
    pub time: f32,
    /// Random phase for the vertical sway
    pub seed: f32,
    pub damage_flash: f32,
    pub behavior: EnemyBehavior,
}

/// Mid-boss shot speed (pixels/s, leftward)
const SHOT_SPEED: f32 = 260.0;

impl Enemy {
    /// Spawn just past the right edge at a random height
    pub fn spawn<R: Rng>(kind: EnemyKind, arena: &Arena, rng: &mut R) -> Self {
        let stats = kind.stats();
        let x = arena.width + rng.random::<f32>() * 240.0;
        let y = clamp(
            rng.random::<f32>() * (arena.height - stats.size.y - 80.0) + 40.0,
            20.0,
            arena.height - stats.size.y - 20.0,
        );
        let seed = rng.random::<f32>() * std::f32::consts::TAU;
        let behavior = match kind {
            EnemyKind::Grunt => EnemyBehavior::Grunt,
            EnemyKind::MidBoss => {
                let interval = stats.fire_interval.unwrap_or_default();
                EnemyBehavior::MidBoss {
                    fire_timer: interval * (0.7 + rng.random::<f32>() * 0.6),
                }
            }
            EnemyKind::Boss => EnemyBehavior::Boss(BossBrain::new(arena.width, stats.size.x, rng)),
        };
        Self::new(kind, Vec2::new(x, y), seed, behavior)
    }

    /// Build an enemy at an exact position
    pub fn new(kind: EnemyKind, pos: Vec2, seed: f32, behavior: EnemyBehavior) -> Self {
        let stats = kind.stats();
        Self {
            pos,
            size: stats.size,
            hp: stats.hp,
            time: 0.0,
            seed,
            damage_flash: 0.0,
            behavior,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    pub fn stats(&self) -> EnemyStats {
        self.kind().stats()
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.behavior, EnemyBehavior::Boss(_))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move for one frame. Returns a shot if the enemy fired.
    pub fn update<R: Rng>(&mut self, dt: f32, arena: &Arena, rng: &mut R) -> Option<EnemyShot> {
        self.time += dt;
        if self.damage_flash > 0.0 {
            self.damage_flash = (self.damage_flash - dt).max(0.0);
        }
        let speed = self.stats().speed;
        let mut fired = false;

        match &mut self.behavior {
            EnemyBehavior::Grunt => {
                let drift = (self.time * 3.0 + self.seed).sin();
                self.pos.x -= speed * dt;
                self.pos.y += drift * 28.0 * dt;
            }
            EnemyBehavior::MidBoss { fire_timer } => {
                self.pos.x -= speed * dt;
                self.pos.y += (self.time * 2.0 + self.seed).sin() * 140.0 * dt;
                *fire_timer -= dt;
                if *fire_timer <= 0.0 {
                    let interval = EnemyKind::MidBoss.stats().fire_interval.unwrap_or_default();
                    *fire_timer = interval * (0.75 + rng.random::<f32>() * 0.7);
                    fired = true;
                }
            }
            EnemyBehavior::Boss(brain) => {
                brain.update(&mut self.pos, speed, self.time, self.seed, dt, rng);
            }
        }

        self.pos.y = clamp(self.pos.y, 12.0, arena.height - self.size.y - 12.0);

        fired.then(|| {
            EnemyShot::new(
                Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0),
                Vec2::new(-SHOT_SPEED, 0.0),
            )
        })
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
        self.damage_flash = self.damage_flash.max(DAMAGE_FLASH_DURATION);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Drifted past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < -260.0
    }
}

impl Hitbox for Enemy {
    fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset_fraction(0.12, 0.18)
    }
}

/// A shot fired by an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyShot {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl EnemyShot {
    /// Shot whose left edge is at `origin.x`, vertically centered on `origin.y`
    pub fn new(origin: Vec2, vel: Vec2) -> Self {
        let size = Vec2::new(56.0, 16.0);
        Self {
            pos: Vec2::new(origin.x, origin.y - size.y / 2.0),
            size,
            vel,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Heading in radians, for renderers
    pub fn angle(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    pub fn is_offscreen(&self, arena: &Arena) -> bool {
        const MARGIN: f32 = 120.0;
        self.pos.x + self.size.x < -MARGIN
            || self.pos.x - self.size.x > arena.width + MARGIN
            || self.pos.y > arena.height + MARGIN
            || self.pos.y + self.size.y < -MARGIN
    }
}

impl Hitbox for EnemyShot {
    fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset(6.0, 4.0)
    }
}
