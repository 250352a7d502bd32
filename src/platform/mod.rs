//! Platform abstraction layer
//!
//! The simulation never talks to a screen, DOM or asset store directly.
//! Front-ends implement these traits and hand them to `Game`:
//! - Asset gate (one-time barrier before the first start)
//! - Rendering (read-only view of the frame)
//! - HUD text
//! - Session overlays

use crate::error::AssetError;
use crate::hud::{HudSnapshot, Notice};
use crate::settings::Settings;
use crate::sim::{
    Arena, Enemy, EnemyShot, Explosion, GameEvent, GameState, Hitbox, Player, PowerUp, Rect, SessionEvent,
};

/// Blink rate of the invincibility flicker (toggles per second)
const INVINCIBLE_BLINK_RATE: f32 = 12.0;

/// Loads whatever the front-end needs before play can start
pub trait AssetGate {
    fn load(&mut self) -> Result<(), AssetError>;
}

/// Draws a finished frame
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame<'_>);
}

/// Shows score, power and the boss countdown
pub trait HudSink {
    fn update_hud(&mut self, hud: &HudSnapshot);
}

/// Receives lifecycle transitions (ready, game over, timeout, victory,
/// asset failure)
pub trait SessionSink {
    fn on_transition(&mut self, event: &SessionEvent, notice: &Notice);

    /// Gameplay events (kills, hits, power changes) for sound or effects
    fn on_game_event(&mut self, _event: &GameEvent) {}
}

/// Borrowed view of the state, with collections in back-to-front draw order
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub arena: Arena,
    pub background_offset: f32,
    pub shots: &'a [EnemyShot],
    pub power_ups: &'a [PowerUp],
    pub enemies: &'a [Enemy],
    /// Player plus escorts
    pub player: &'a Player,
    pub explosions: &'a [Explosion],
    /// Player and escorts drawn translucent this frame
    pub player_blink: bool,
    pub show_hitboxes: bool,
}

impl<'a> RenderFrame<'a> {
    pub fn new(state: &'a GameState) -> Self {
        let timer = state.player.invincible_timer;
        let player_blink = timer > 0.0 && (timer * INVINCIBLE_BLINK_RATE).floor() as i64 % 2 == 0;
        Self {
            arena: state.arena,
            background_offset: state.background_offset,
            shots: &state.shots,
            power_ups: &state.power_ups,
            enemies: &state.enemies,
            player: &state.player,
            explosions: &state.explosions,
            player_blink,
            show_hitboxes: false,
        }
    }

    /// Apply the debug and accessibility flags
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.show_hitboxes = settings.show_hitboxes;
        if settings.reduced_motion {
            self.player_blink = false;
        }
        self
    }

    /// Every collision box in the frame, for debug overlays
    pub fn hitboxes(&self) -> Vec<Rect> {
        let mut boxes = Vec::new();
        boxes.extend(self.shots.iter().map(Hitbox::hitbox));
        boxes.extend(self.power_ups.iter().map(Hitbox::hitbox));
        boxes.extend(self.enemies.iter().map(Hitbox::hitbox));
        boxes.push(self.player.hitbox());
        boxes.extend(self.player.supports.iter().map(Hitbox::hitbox));
        boxes
    }
}
