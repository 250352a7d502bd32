//! Session state and core simulation types
//!
//! Everything a game session mutates lives in `GameState`, which is rebuilt
//! from scratch by `reset` at every (re)start.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::BossEncounter;
use super::enemy::{Enemy, EnemyKind, EnemyShot};
use super::explosion::Explosion;
use super::pickup::PowerUp;
use super::player::Player;
use super::spawn::SpawnTimers;
use crate::clamp;
use crate::consts::*;

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a top-left position so a box of `size` stays inside
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            clamp(pos.x, 0.0, self.width - size.x),
            clamp(pos.y, 0.0, self.height - size.y),
        )
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    GameOver,
    BossTimeout,
    Victory,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the asset gate
    Loading,
    /// Assets ready, waiting for the first start
    Ready,
    /// Active gameplay
    Running,
    /// Session over, waiting for a restart
    Ended(SessionEnd),
    /// Asset loading failed; nothing can start
    Failed,
}

/// Lifecycle transitions raised to the session sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    ReadyToStart,
    GameOver { score: u64 },
    BossTimeout { score: u64 },
    Victory { score: u64, rescued: u32, surviving: u32 },
    AssetsFailed { reason: String },
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDefeated { kind: EnemyKind, points: u64 },
    PowerChanged { level: u32 },
    SupportLost,
    PlayerHit,
    BossSpawned,
    BossDefeated,
    Session(SessionEvent),
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub arena: Arena,
    pub score: u64,
    /// Seconds since the session started
    pub elapsed: f32,
    /// Horizontal background scroll, wraps at the arena width
    pub background_offset: f32,
    pub timers: SpawnTimers,
    pub boss: BossEncounter,
    /// Countdown to the victory screen after the boss dies
    pub pending_clear: Option<f32>,
    /// Escorts recruited this session (end-screen stat)
    pub supports_recruited: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub shots: Vec<EnemyShot>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Outgoing events, drained by the session shell
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state in the `Loading` phase
    pub fn new(arena: Arena) -> Self {
        Self {
            phase: GamePhase::Loading,
            arena,
            score: 0,
            elapsed: 0.0,
            background_offset: 0.0,
            timers: SpawnTimers::default(),
            boss: BossEncounter::default(),
            pending_clear: None,
            supports_recruited: 0,
            player: Player::new(&arena),
            enemies: Vec::new(),
            shots: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Restore every session value to its initial state. The phase and
    /// arena are left alone.
    pub fn reset(&mut self) {
        let phase = self.phase;
        *self = Self::new(self.arena);
        self.phase = phase;
    }

    /// Reset and enter `Running`. Only valid from `Ready` or `Ended`.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Ready | GamePhase::Ended(_) => {
                self.reset();
                self.phase = GamePhase::Running;
                log::info!("Session started");
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(Enemy::is_boss)
    }

    pub fn count_alive(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Generic loss
    pub fn trigger_game_over(&mut self) {
        if !self.is_running() {
            return;
        }
        self.end(SessionEnd::GameOver);
        log::info!("Game over with score {}", self.score);
        self.push_event(GameEvent::Session(SessionEvent::GameOver { score: self.score }));
    }

    /// The boss outlasted the encounter clock
    pub fn trigger_boss_timeout(&mut self) {
        if !self.is_running() {
            return;
        }
        self.end(SessionEnd::BossTimeout);
        log::info!("Boss timer expired with score {}", self.score);
        self.push_event(GameEvent::Session(SessionEvent::BossTimeout { score: self.score }));
    }

    /// Boss defeated and the grace period is over
    pub fn trigger_victory(&mut self) {
        if !self.is_running() {
            return;
        }
        self.end(SessionEnd::Victory);
        self.pending_clear = None;
        let surviving = self.player.supports.len() as u32;
        log::info!(
            "Victory: score {}, {} escorts recruited, {} surviving",
            self.score,
            self.supports_recruited,
            surviving
        );
        self.push_event(GameEvent::Session(SessionEvent::Victory {
            score: self.score,
            rescued: self.supports_recruited,
            surviving,
        }));
    }

    fn end(&mut self, how: SessionEnd) {
        self.boss.present = false;
        self.boss.clock = 0.0;
        self.phase = GamePhase::Ended(how);
    }
}
