//! HUD values and end-of-session notices
//!
//! Everything here is plain text derived from `GameState`; the shell
//! decides how to show it.

use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_TIME_LIMIT, MAX_POWER_LEVEL};
use crate::sim::{GameState, SessionEvent};

/// Per-frame HUD contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Six zero-padded digits
    pub score: String,
    /// `ATTACK: n / 16`
    pub power: String,
    /// `TIME: x.x` while a boss fight is on the clock
    pub boss_timer: Option<String>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let boss_timer = (state.is_running() && state.boss.is_active())
            .then(|| format!("TIME: {:.1}", state.boss.remaining()));
        Self {
            score: format_score(state.score),
            power: format!("ATTACK: {} / {}", state.player.power_level, MAX_POWER_LEVEL),
            boss_timer,
        }
    }
}

pub fn format_score(score: u64) -> String {
    format!("{:06}", score)
}

/// Overlay text for a lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    /// One line per entry
    pub body: Vec<String>,
    /// Whether the start action is accepted while this is shown
    pub can_restart: bool,
}

const RESTART_HINT: &str = "Press Space or tap to play again";

impl Notice {
    pub fn for_event(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::ReadyToStart => Self {
                title: "Scroll Fish".into(),
                body: vec!["Press Space or tap to start".into()],
                can_restart: true,
            },
            SessionEvent::GameOver { score } => Self {
                title: "Systems Down".into(),
                body: vec![format!("SCORE: {}", format_score(*score)), RESTART_HINT.into()],
                can_restart: true,
            },
            SessionEvent::BossTimeout { score } => Self {
                title: "Time Up".into(),
                body: vec![
                    format!("SCORE: {}", format_score(*score)),
                    format!("The boss was not defeated within {} seconds.", BOSS_TIME_LIMIT),
                    RESTART_HINT.into(),
                ],
                can_restart: true,
            },
            SessionEvent::Victory {
                score,
                rescued,
                surviving,
            } => Self {
                title: "Boss Defeated!".into(),
                body: vec![
                    format!("SCORE: {}", format_score(*score)),
                    format!("Escorts rescued: {}", rescued),
                    format!("Escorts surviving: {}", surviving),
                    RESTART_HINT.into(),
                ],
                can_restart: true,
            },
            SessionEvent::AssetsFailed { reason } => Self {
                title: "Failed to load assets".into(),
                body: vec![reason.clone(), "Reload to try again".into()],
                can_restart: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, GamePhase};

    fn running() -> GameState {
        let mut state = GameState::new(Arena::default());
        state.phase = GamePhase::Ready;
        state.start();
        state
    }

    #[test]
    fn test_score_and_power_format() {
        let mut state = running();
        state.score = 4_560;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, "004560");
        assert_eq!(hud.power, "ATTACK: 1 / 16");
        assert_eq!(hud.boss_timer, None);

        assert_eq!(format_score(12_345_678), "12345678");
    }

    #[test]
    fn test_boss_timer_only_while_fighting() {
        let mut state = running();
        state.boss.on_spawn();
        state.boss.clock = 12.34;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.boss_timer.as_deref(), Some("TIME: 47.7"));

        state.trigger_game_over();
        assert_eq!(HudSnapshot::from_state(&state).boss_timer, None);

        let mut state = running();
        state.boss.on_defeat();
        assert_eq!(HudSnapshot::from_state(&state).boss_timer, None);
    }

    #[test]
    fn test_notices() {
        let notice = Notice::for_event(&SessionEvent::Victory {
            score: 9_000,
            rescued: 12,
            surviving: 4,
        });
        assert!(notice.can_restart);
        assert_eq!(notice.body[0], "SCORE: 009000");
        assert_eq!(notice.body[1], "Escorts rescued: 12");
        assert_eq!(notice.body[2], "Escorts surviving: 4");

        let notice = Notice::for_event(&SessionEvent::AssetsFailed {
            reason: "Missing asset: boss.png".into(),
        });
        assert!(!notice.can_restart);
    }
}
