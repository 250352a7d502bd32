//! Purely visual explosion bursts

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPLOSION_DURATION: f32 = 0.55;

/// Visual variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExplosionKind {
    #[default]
    Burst,
    /// Sparkle shown when a power-up is collected
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vec2,
    pub size: f32,
    pub elapsed: f32,
    pub duration: f32,
    pub kind: ExplosionKind,
}

impl Explosion {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self::with_kind(center, size, ExplosionKind::Burst)
    }

    pub fn with_kind(center: Vec2, size: f32, kind: ExplosionKind) -> Self {
        Self {
            center,
            size,
            elapsed: 0.0,
            duration: DEFAULT_EXPLOSION_DURATION,
            kind,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// 0 at birth, 1 when finished
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Render scale: grows from 0.7x to 2.3x
    pub fn scale(&self) -> f32 {
        0.7 + self.progress() * 1.6
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime() {
        let mut boom = Explosion::new(Vec2::ZERO, 64.0);
        assert_eq!(boom.scale(), 0.7);
        assert_eq!(boom.alpha(), 1.0);
        boom.update(0.3);
        assert!(!boom.is_done());
        boom.update(0.3);
        assert!(boom.is_done());
        assert_eq!(boom.progress(), 1.0);
    }
}
