//! The player fish and its escort formation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::formation::{self, Leader, Relayout, Slot};
use super::rect::{Hitbox, Rect};
use super::state::Arena;
use super::tick::TickInput;
use crate::consts::*;
use crate::{clamp, normalize_angle};

/// Where a follower aims: its leader's center and facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub center: Vec2,
    pub angle: f32,
}

/// Result of a power upgrade request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    /// Level went up; `recruited` escorts were created
    Applied { recruited: usize },
    /// Already at max level, nothing changed
    AtMax,
}

/// An escort ship trailing the player on a damped spring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportShip {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub stiffness: f32,
    pub damping: f32,
    pub slot: Slot,
    pub rest_distance: f32,
    pub lateral_offset: f32,
    pub leader: Option<Leader>,
    pub orientation: f32,
    pub remaining_hits: u32,
    pub damage_flash: f32,
}

impl SupportShip {
    /// New escort parked at the arena center
    pub fn new(arena: &Arena) -> Self {
        let size = Vec2::new(SUPPORT_WIDTH, SUPPORT_HEIGHT);
        let first = formation::slot_for_index(0);
        Self {
            pos: arena.center() - size / 2.0,
            size,
            vel: Vec2::ZERO,
            stiffness: SUPPORT_STIFFNESS,
            damping: SUPPORT_DAMPING,
            slot: first,
            rest_distance: first.rest_distance(),
            lateral_offset: first.lateral_offset(),
            leader: None,
            orientation: 0.0,
            remaining_hits: SUPPORT_MAX_HITS,
            damage_flash: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
        self.rest_distance = slot.rest_distance();
        self.lateral_offset = slot.lateral_offset();
    }

    /// Formation target: behind and to the side of the leader's facing
    pub fn target(&self, anchor: Anchor) -> Vec2 {
        let backward = Vec2::from_angle(anchor.angle + std::f32::consts::PI);
        let lateral = Vec2::from_angle(anchor.angle + std::f32::consts::FRAC_PI_2);
        anchor.center + backward * self.rest_distance + lateral * self.lateral_offset
    }

    /// Follow `leader` and jump straight onto the formation target
    pub fn align_to(&mut self, leader: Leader, anchor: Anchor, arena: &Arena) {
        self.leader = Some(leader);
        let target = self.target(anchor);
        self.pos = arena.clamp_box(target - self.size / 2.0, self.size);
        self.vel = Vec2::ZERO;
        self.orientation = anchor.angle;
    }

    pub fn set_leader(&mut self, leader: Leader) {
        self.leader = Some(leader);
    }

    /// Spring toward the target; `anchor` is None when the leader is gone
    pub fn update(&mut self, dt: f32, anchor: Option<Anchor>, arena: &Arena) {
        let Some(anchor) = anchor else {
            return;
        };
        if self.damage_flash > 0.0 {
            self.damage_flash = (self.damage_flash - dt).max(0.0);
        }

        let error = self.target(anchor) - self.center();
        self.vel += error * self.stiffness * dt;
        self.vel *= (-self.damping * dt).exp();
        self.pos = arena.clamp_box(self.pos + self.vel * dt, self.size);

        if self.vel.length() > 6.0 {
            self.orientation = self.vel.y.atan2(self.vel.x);
        } else {
            let diff = normalize_angle(anchor.angle - self.orientation);
            self.orientation += diff * (dt * 4.0).min(1.0);
        }
    }

    /// Take one hit. Returns true once the ship is out of hit points.
    pub fn absorb_hit(&mut self) -> bool {
        self.remaining_hits = self.remaining_hits.saturating_sub(1);
        self.damage_flash = self.damage_flash.max(DAMAGE_FLASH_DURATION);
        self.remaining_hits == 0
    }
}

impl Hitbox for SupportShip {
    fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset_fraction(0.2, 0.2)
    }
}

/// The player fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub power_level: u32,
    pub invincible_timer: f32,
    pub attack_cooldown: f32,
    pub knockback_vel_x: f32,
    /// Escorts in slot order
    pub supports: Vec<SupportShip>,
    /// Facing (radians), smoothed toward recent movement
    pub orientation: f32,
    last_move: Vec2,
    pub power_glow_phase: f32,
    pub power_glow_active: bool,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(PLAYER_START_X, arena.height / 2.0 - size.y / 2.0),
            size,
            speed: PLAYER_SPEED,
            power_level: 1,
            invincible_timer: 0.0,
            attack_cooldown: 0.0,
            knockback_vel_x: 0.0,
            supports: Vec::new(),
            orientation: 0.0,
            last_move: Vec2::ZERO,
            power_glow_phase: 0.0,
            power_glow_active: false,
        }
    }

    pub fn reset(&mut self, arena: &Arena) {
        *self = Self::new(arena);
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Contact damage dealt by the player body
    pub fn attack_damage(&self) -> i32 {
        self.power_level.min(MAX_POWER_LEVEL) as i32
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Resolve a leader link to its current center and facing
    pub fn anchor(&self, leader: Leader) -> Option<Anchor> {
        match leader {
            Leader::Player => Some(Anchor {
                center: self.center(),
                angle: self.orientation,
            }),
            Leader::Support(i) => self.supports.get(i).map(|s| Anchor {
                center: s.center(),
                angle: s.orientation,
            }),
        }
    }

    /// Raise power by `amount` (at least 1), clamped to the max level
    pub fn upgrade_power(&mut self, amount: u32, arena: &Arena) -> Upgrade {
        if self.power_level >= MAX_POWER_LEVEL {
            return Upgrade::AtMax;
        }
        self.power_level = (self.power_level + amount.max(1)).min(MAX_POWER_LEVEL);
        let recruited = self.recruit_supports(arena);
        self.power_glow_active = self.power_level > 1;
        self.power_glow_phase = 0.0;
        Upgrade::Applied { recruited }
    }

    /// Drop one power level (never below 1). The tail of the formation is
    /// trimmed and the remaining ships snap into place.
    pub fn decrease_power(&mut self, arena: &Arena) -> bool {
        let previous = self.power_level;
        self.power_level = self.power_level.saturating_sub(1).max(1);
        let desired = formation::support_count_for_level(self.power_level);
        if self.supports.len() > desired {
            self.supports.truncate(desired);
            self.relayout(Relayout::Snap, arena);
        }
        self.clear_glow_at_base_level();
        self.power_level != previous
    }

    /// Destroy the escort at `index`. Trailing ships are relinked and drift
    /// into their new slots. Out-of-range indices are a no-op.
    pub fn remove_support_at(&mut self, index: usize, arena: &Arena) -> bool {
        if index >= self.supports.len() {
            return false;
        }
        self.supports.remove(index);
        let previous = self.power_level;
        self.power_level = self.power_level.saturating_sub(1).max(1);
        let desired = formation::support_count_for_level(self.power_level);
        self.supports.truncate(desired);
        self.relayout(Relayout::Relink, arena);
        self.clear_glow_at_base_level();
        self.power_level != previous
    }

    /// Horizontal knockback; stronger leftward impulses win over weaker ones
    pub fn apply_knockback(&mut self, vel_x: f32) {
        if !vel_x.is_finite() {
            return;
        }
        if self.knockback_vel_x < 0.0 && vel_x < 0.0 {
            self.knockback_vel_x = self.knockback_vel_x.min(vel_x);
        } else {
            self.knockback_vel_x = vel_x;
        }
    }

    pub fn update(&mut self, dt: f32, input: &TickInput, arena: &Arena) {
        let previous = self.pos;

        self.invincible_timer = (self.invincible_timer - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if self.power_glow_active {
            self.power_glow_phase =
                (self.power_glow_phase + dt * POWER_GLOW_PULSE_SPEED) % std::f32::consts::TAU;
        } else {
            self.power_glow_phase = 0.0;
        }

        if let Some(pointer) = input.pointer {
            let target = arena.clamp_box(pointer - self.size / 2.0, self.size);
            let smoothing = (dt * 8.0).min(1.0);
            self.pos += (target - self.pos) * smoothing;
        } else {
            let dir = input.direction();
            if dir != Vec2::ZERO {
                self.pos += dir.normalize() * self.speed * dt;
            }
        }

        if self.knockback_vel_x != 0.0 {
            self.pos.x += self.knockback_vel_x * dt;
            self.knockback_vel_x *= (-6.0 * dt).exp();
            if self.knockback_vel_x.abs() < 8.0 {
                self.knockback_vel_x = 0.0;
            }
        }

        self.pos = arena.clamp_box(self.pos, self.size);

        self.update_orientation(self.pos - previous, dt);

        for i in 0..self.supports.len() {
            let anchor = self.supports[i].leader.and_then(|l| self.anchor(l));
            self.supports[i].update(dt, anchor, arena);
        }
    }

    /// Shove the player along x, clamped to the arena
    pub fn shift_x(&mut self, dx: f32, arena: &Arena) {
        self.pos.x = clamp(self.pos.x + dx, 0.0, arena.width - self.size.x);
        self.pos.y = clamp(self.pos.y, 0.0, arena.height - self.size.y);
    }

    fn update_orientation(&mut self, movement: Vec2, dt: f32) {
        const MOVE_THRESHOLD: f32 = 0.35;
        if movement.x.abs() > MOVE_THRESHOLD || movement.y.abs() > MOVE_THRESHOLD {
            self.last_move = movement;
        } else {
            self.last_move *= 0.8;
            if self.last_move.x.abs() < 0.05 {
                self.last_move.x = 0.0;
            }
            if self.last_move.y.abs() < 0.05 {
                self.last_move.y = 0.0;
            }
        }

        if self.last_move.length() > 0.05 {
            let target = self.last_move.y.atan2(self.last_move.x);
            let diff = normalize_angle(target - self.orientation);
            self.orientation += diff * (dt * 10.0).min(1.0);
        }
    }

    fn clear_glow_at_base_level(&mut self) {
        if self.power_level <= 1 {
            self.power_glow_active = false;
            self.power_glow_phase = 0.0;
        }
    }

    /// Create escorts up to the level's count; only the new ones snap
    fn recruit_supports(&mut self, arena: &Arena) -> usize {
        let desired = formation::support_count_for_level(self.power_level);
        let first_new = self.supports.len();
        while self.supports.len() < desired {
            self.supports.push(SupportShip::new(arena));
        }
        for index in first_new..self.supports.len() {
            self.configure_support_at(index, arena);
        }
        self.supports.len() - first_new
    }

    fn configure_support_at(&mut self, index: usize, arena: &Arena) {
        let slot = formation::slot_for_index(index);
        self.supports[index].set_slot(slot);
        let leader = if slot.row == 0 {
            Leader::Player
        } else {
            self.supports
                .iter()
                .enumerate()
                .position(|(i, s)| {
                    i != index && s.slot.column == slot.column && s.slot.row == slot.row - 1
                })
                .map(Leader::Support)
                .unwrap_or(Leader::Player)
        };
        self.snap_support(index, leader, arena);
    }

    /// Reassign every slot and leader from scratch
    pub fn relayout(&mut self, mode: Relayout, arena: &Arena) {
        let plan = formation::plan(self.supports.len());
        for (i, (slot, _)) in plan.iter().enumerate() {
            self.supports[i].set_slot(*slot);
        }
        // Leaders precede followers, so snapping in order sees settled targets
        for (i, (_, leader)) in plan.into_iter().enumerate() {
            match mode {
                Relayout::Snap => self.snap_support(i, leader, arena),
                Relayout::Relink => self.supports[i].set_leader(leader),
            }
        }
    }

    fn snap_support(&mut self, index: usize, leader: Leader, arena: &Arena) {
        match self.anchor(leader) {
            Some(anchor) => self.supports[index].align_to(leader, anchor, arena),
            None => self.supports[index].set_leader(leader),
        }
    }
}

impl Hitbox for Player {
    fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset_fraction(0.18, 0.18)
    }
}
