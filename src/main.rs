//! Scroll Fish entry point
//!
//! Runs a headless autopilot session at a simulated 60 fps, logging
//! lifecycle transitions, then prints the final state as JSON.
//!
//! Usage: `scroll-fish [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use scroll_fish::demo::autopilot;
    use scroll_fish::hud::{HudSnapshot, Notice};
    use scroll_fish::platform::{AssetGate, HudSink, RenderFrame, RenderSink, SessionSink};
    use scroll_fish::sim::{GameEvent, SessionEvent};
    use scroll_fish::{AssetError, Game, Settings};

    /// Simulated frame period (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Headless front-end: nothing to load, nothing to draw
    #[derive(Default)]
    struct Console {
        frames: u64,
        last_hud: Option<HudSnapshot>,
    }

    impl AssetGate for Console {
        fn load(&mut self) -> Result<(), AssetError> {
            Ok(())
        }
    }

    impl RenderSink for Console {
        fn render(&mut self, _frame: &RenderFrame<'_>) {
            self.frames += 1;
        }
    }

    impl HudSink for Console {
        fn update_hud(&mut self, hud: &HudSnapshot) {
            if self.last_hud.as_ref() != Some(hud) {
                log::debug!("{} | {} | {:?}", hud.score, hud.power, hud.boss_timer);
                self.last_hud = Some(hud.clone());
            }
        }
    }

    impl SessionSink for Console {
        fn on_transition(&mut self, _event: &SessionEvent, notice: &Notice) {
            log::info!("== {} ==", notice.title);
            for line in &notice.body {
                log::info!("   {}", line);
            }
        }

        fn on_game_event(&mut self, event: &GameEvent) {
            log::trace!("{:?}", event);
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };

        let mut game = Game::new(settings);
        let mut console = Console::default();
        let mut gate = Console::default();
        game.boot(&mut gate, &mut console)?;
        game.start();

        let mut render = Console::default();
        let mut hud = Console::default();
        let mut timestamp = 0.0;
        loop {
            game.input = autopilot(&game.state);
            if !game.frame(timestamp, &mut render, &mut hud, &mut console) {
                break;
            }
            if render.frames >= MAX_FRAMES {
                log::warn!("Stopping after {} frames", render.frames);
                break;
            }
            timestamp += FRAME_MS;
        }

        log::info!(
            "Finished in {:.1}s (seed {}, {} frames)",
            game.state.elapsed,
            game.seed(),
            render.frames
        );
        if let Some(hud) = &hud.last_hud {
            println!("{}", serde_json::to_string_pretty(hud)?);
        }
        println!("{}", serde_json::to_string_pretty(&game.state)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Scroll Fish (headless) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a web front-end; there is no wasm binary
}
