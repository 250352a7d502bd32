//! Boss movement phases and the boss encounter clock

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Boss movement sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Sliding in from the right edge toward home
    Approach,
    /// Hovering at home, counting down to the next charge
    Idle,
    /// Lunging left toward the charge target
    Charging,
    /// Backing off to home
    Retreat,
}

/// Movement brain carried only by the boss variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossBrain {
    pub phase: BossPhase,
    pub home_x: f32,
    pub charge_target_x: f32,
    pub cooldown: f32,
    pub charge_timer: f32,
}

fn idle_cooldown<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(BOSS_IDLE_INTERVAL_MIN..BOSS_IDLE_INTERVAL_MAX)
}

impl BossBrain {
    /// Brain for a boss of `width` in an arena `arena_width` wide
    pub fn new<R: Rng>(arena_width: f32, width: f32, rng: &mut R) -> Self {
        let home_x = (arena_width - width - BOSS_HOME_MARGIN).max(arena_width * 0.35);
        Self {
            phase: BossPhase::Approach,
            home_x,
            charge_target_x: (home_x - BOSS_CHARGE_REACH).max(BOSS_CHARGE_MIN_X),
            cooldown: idle_cooldown(rng),
            charge_timer: 0.0,
        }
    }

    /// Move the boss at `pos` for one frame. `time` and `seed` drive the
    /// vertical sway once it has arrived.
    pub fn update<R: Rng>(
        &mut self,
        pos: &mut Vec2,
        speed: f32,
        time: f32,
        seed: f32,
        dt: f32,
        rng: &mut R,
    ) {
        if self.phase == BossPhase::Approach {
            pos.x -= speed * dt * 0.7;
            if pos.x <= self.home_x {
                pos.x = self.home_x;
                self.phase = BossPhase::Idle;
                self.cooldown = idle_cooldown(rng);
                log::debug!("Boss arrived at x={:.0}", self.home_x);
            }
            return;
        }

        pos.y += (time * 1.6 + seed).sin() * 160.0 * dt;

        match self.phase {
            BossPhase::Idle => {
                pos.x += (self.home_x - pos.x) * (dt * 8.0).min(1.0);
                self.cooldown -= dt;
                if self.cooldown <= 0.0 {
                    self.phase = BossPhase::Charging;
                    self.charge_timer = BOSS_CHARGE_DURATION;
                }
            }
            BossPhase::Charging => {
                pos.x -= BOSS_CHARGE_SPEED * dt;
                self.charge_timer -= dt;
                if pos.x <= self.charge_target_x || self.charge_timer <= 0.0 {
                    self.phase = BossPhase::Retreat;
                }
            }
            BossPhase::Retreat => {
                pos.x += BOSS_RETREAT_SPEED * dt;
                if pos.x >= self.home_x {
                    pos.x = self.home_x;
                    self.phase = BossPhase::Idle;
                    self.cooldown = idle_cooldown(rng);
                }
            }
            BossPhase::Approach => {}
        }
    }
}

/// What the encounter clock reported this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Idle,
    Running,
    TimedOut,
}

/// Session-level boss bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BossEncounter {
    pub present: bool,
    pub defeated: bool,
    /// Seconds since the boss appeared
    pub clock: f32,
}

impl BossEncounter {
    pub fn on_spawn(&mut self) {
        self.present = true;
        self.clock = 0.0;
    }

    /// The boss slipped off the left edge without being killed
    pub fn on_escape(&mut self) {
        self.present = false;
        self.clock = 0.0;
    }

    pub fn on_defeat(&mut self) {
        self.present = false;
        self.defeated = true;
        self.clock = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.present && !self.defeated
    }

    /// Advance the clock. Reports `TimedOut` on the frame the limit is hit.
    pub fn advance(&mut self, dt: f32) -> ClockStatus {
        if !self.is_active() {
            return ClockStatus::Idle;
        }
        self.clock += dt;
        if self.clock >= BOSS_TIME_LIMIT {
            self.clock = BOSS_TIME_LIMIT;
            return ClockStatus::TimedOut;
        }
        ClockStatus::Running
    }

    /// Seconds left before timeout
    pub fn remaining(&self) -> f32 {
        (BOSS_TIME_LIMIT - self.clock).max(0.0)
    }
}
