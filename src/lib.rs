//! Scroll Fish - A side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, spawns, boss, collisions)
//! - `game`: Session lifecycle shell driving the simulation from timestamps
//! - `platform`: Boundary traits for input, rendering, HUD and session notices
//! - `hud`: Display values derived from session state
//! - `settings`: Arena size, seed and debug flags
//! - `demo`: Autopilot input for headless runs
//! - `error`: Asset and settings errors

pub mod demo;
pub mod error;
pub mod game;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{AssetError, SettingsError};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 960.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 540.0;

    /// Background scroll speed (pixels/s)
    pub const BACKGROUND_SCROLL_SPEED: f32 = 90.0;

    /// Power levels
    pub const MAX_POWER_LEVEL: u32 = 16;
    pub const MAX_SUPPORT_SHIPS: usize = (MAX_POWER_LEVEL - 1) as usize;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 84.0;
    pub const PLAYER_HEIGHT: f32 = 72.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_START_X: f32 = 120.0;
    pub const PLAYER_ATTACK_COOLDOWN: f32 = 0.28;
    pub const PLAYER_HIT_INVINCIBILITY: f32 = 1.2;
    /// Immediate shove applied when the player body rams an enemy
    pub const PLAYER_CONTACT_SHIFT: f32 = 24.0;
    pub const PLAYER_CONTACT_KNOCKBACK: f32 = -320.0;
    /// Score awarded for a power-up collected at max level
    pub const MAX_POWER_BONUS_SCORE: u64 = 200;

    /// Support formation
    pub const SUPPORT_WIDTH: f32 = 56.0;
    pub const SUPPORT_HEIGHT: f32 = 48.0;
    pub const SUPPORT_MAX_HITS: u32 = 10;
    pub const SUPPORT_STIFFNESS: f32 = 18.0;
    pub const SUPPORT_DAMPING: f32 = 3.0;
    pub const SUPPORT_COLUMN_ORDER: [usize; 3] = [1, 0, 2];
    pub const SUPPORT_COLUMN_OFFSETS: [f32; 3] = [-70.0, 0.0, 70.0];
    pub const SUPPORT_BASE_REST_DISTANCE: f32 = 72.0;
    pub const SUPPORT_SEGMENT_SPACING: f32 = 58.0;
    /// Distance a non-boss enemy is shoved away from a support it rams
    pub const SUPPORT_PUSH_DISTANCE: f32 = 60.0;

    /// Boss encounter
    pub const BOSS_TIME_LIMIT: f32 = 60.0;
    pub const BOSS_INITIAL_SPAWN_TIME: f32 = 20.0;
    pub const BOSS_HOME_MARGIN: f32 = 120.0;
    pub const BOSS_CHARGE_MIN_X: f32 = 160.0;
    pub const BOSS_CHARGE_REACH: f32 = 420.0;
    pub const BOSS_CHARGE_SPEED: f32 = 420.0;
    pub const BOSS_RETREAT_SPEED: f32 = 320.0;
    pub const BOSS_CHARGE_DURATION: f32 = 1.15;
    pub const BOSS_IDLE_INTERVAL_MIN: f32 = 3.2;
    pub const BOSS_IDLE_INTERVAL_MAX: f32 = 5.2;
    /// Grace period between the boss kill and the victory transition
    pub const GAME_CLEAR_DELAY: f32 = 1.8;

    /// Power glow pulse (radians/s)
    pub const POWER_GLOW_PULSE_SPEED: f32 = 1.6;

    /// Shared damage-flash duration for enemies and supports
    pub const DAMAGE_FLASH_DURATION: f32 = 0.18;
}

/// Clamp without panicking when `min > max` (the upper bound wins).
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
