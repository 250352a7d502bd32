//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same frame deltas, inputs and
//! random draws it always produces the same state:
//! - RNG injected by the caller
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod enemy;
pub mod explosion;
pub mod formation;
pub mod pickup;
pub mod player;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use boss::{BossBrain, BossEncounter, BossPhase, ClockStatus};
pub use collision::{defeat_enemy, hit_player, resolve_collisions};
pub use enemy::{Enemy, EnemyBehavior, EnemyKind, EnemyShot, EnemyStats};
pub use explosion::{Explosion, ExplosionKind};
pub use formation::{Leader, Relayout, Slot};
pub use pickup::{PowerUp, PowerUpSprite};
pub use player::{Anchor, Player, SupportShip, Upgrade};
pub use rect::{Hitbox, Rect};
pub use spawn::{SpawnTimers, run_spawns, spawn_enemy};
pub use state::{Arena, GameEvent, GamePhase, GameState, SessionEnd, SessionEvent};
pub use tick::{TickInput, clamp_dt, tick};
