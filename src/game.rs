//! Session shell
//!
//! Owns the state, RNG and input, turns host timestamps into clamped frame
//! deltas, and fans results out to the platform sinks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::AssetError;
use crate::hud::{HudSnapshot, Notice};
use crate::platform::{AssetGate, HudSink, RenderFrame, RenderSink, SessionSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, SessionEvent, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    /// Latest input; the host overwrites it between frames
    pub input: TickInput,
    settings: Settings,
    rng: Pcg32,
    seed: u64,
    last_time: Option<f64>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("New game with seed: {}", seed);
        Self {
            state: GameState::new(settings.arena()),
            input: TickInput::default(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            settings,
            last_time: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Run the asset gate once. Success moves to `Ready`; failure is final.
    pub fn boot<G, S>(&mut self, gate: &mut G, session: &mut S) -> Result<(), AssetError>
    where
        G: AssetGate + ?Sized,
        S: SessionSink + ?Sized,
    {
        if self.state.phase != GamePhase::Loading {
            return Ok(());
        }
        match gate.load() {
            Ok(()) => {
                self.state.phase = GamePhase::Ready;
                log::info!("Assets loaded");
                notify(session, SessionEvent::ReadyToStart);
                Ok(())
            }
            Err(err) => {
                self.state.phase = GamePhase::Failed;
                log::error!("Failed to load assets: {}", err);
                notify(
                    session,
                    SessionEvent::AssetsFailed {
                        reason: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    /// Start or restart a session. Ignored while loading or after a failure.
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        if started {
            self.last_time = None;
            self.input = TickInput::default();
        }
        started
    }

    /// Advance one host frame. Returns whether the loop should keep going.
    pub fn frame<R, H, S>(
        &mut self,
        timestamp_ms: f64,
        render: &mut R,
        hud: &mut H,
        session: &mut S,
    ) -> bool
    where
        R: RenderSink + ?Sized,
        H: HudSink + ?Sized,
        S: SessionSink + ?Sized,
    {
        if !self.state.is_running() {
            return false;
        }

        // The first frame after a start only records the clock
        let dt = match self.last_time {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);

        tick(&mut self.state, &self.input, dt, &mut self.rng);

        let frame = RenderFrame::new(&self.state).with_settings(&self.settings);
        render.render(&frame);
        hud.update_hud(&HudSnapshot::from_state(&self.state));

        for event in self.state.drain_events() {
            match event {
                GameEvent::Session(transition) => notify(session, transition),
                other => session.on_game_event(&other),
            }
        }

        self.state.is_running()
    }
}

fn notify<S: SessionSink + ?Sized>(session: &mut S, event: SessionEvent) {
    let notice = Notice::for_event(&event);
    session.on_transition(&event, &notice);
}
