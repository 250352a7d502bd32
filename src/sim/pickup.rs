//! Power-up fish that raise the player's power level

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::rect::{Hitbox, Rect};
use super::state::Arena;
use crate::clamp;

pub const POWER_UP_SIZE: f32 = 48.0;

/// Cosmetic variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpSprite {
    #[default]
    Blue,
    Gold,
}

/// A drifting power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub time: f32,
    pub sprite: PowerUpSprite,
    /// Power levels granted on pickup (at least 1)
    pub power_amount: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, sprite: PowerUpSprite, power_amount: u32) -> Self {
        Self {
            pos,
            size: Vec2::splat(POWER_UP_SIZE),
            time: 0.0,
            sprite,
            power_amount: power_amount.max(1),
        }
    }

    /// Ordinary single-level power-up
    pub fn basic(pos: Vec2) -> Self {
        Self::new(pos, PowerUpSprite::Blue, 1)
    }

    /// What a defeated enemy of `kind` drops
    pub fn drop_for(kind: EnemyKind, pos: Vec2) -> Self {
        match kind {
            EnemyKind::MidBoss => Self::new(pos, PowerUpSprite::Gold, 5),
            EnemyKind::Grunt | EnemyKind::Boss => Self::basic(pos),
        }
    }

    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.time += dt;
        self.pos.x -= 180.0 * dt;
        self.pos.y += (self.time * 3.0).sin() * 60.0 * dt;
        self.pos.y = clamp(self.pos.y, 12.0, arena.height - self.size.y - 12.0);
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < -120.0
    }
}

impl Hitbox for PowerUp {
    fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset(8.0, 8.0)
    }
}
