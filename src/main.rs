//! Sky Hop entry point
//!
//! Headless native runner: plays one session on autopilot and prints the final
//! HUD as JSON.
//!
//! Usage: `sky-hop [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use sky_hop::consts::{MAX_SUBSTEPS, SIM_DT};
    use sky_hop::sim::{GameState, TickInput, tick};
    use sky_hop::{AudioManager, LogSink, Tuning};

    const DEFAULT_SEED: u64 = 0x5EED;
    /// Host frame rate fed into the accumulator
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Hard stop for a run that never ends
    const MAX_SECONDS: u32 = 600;

    /// Frame loop around the fixed-step simulation
    struct Runner {
        state: GameState,
        audio: AudioManager<LogSink>,
        accumulator: f32,
        input: TickInput,
        frames: u64,
    }

    impl Runner {
        fn new(seed: u64, tuning: Tuning) -> Self {
            let mut audio = AudioManager::default();
            audio.start_ambient();
            Self {
                state: GameState::with_tuning(seed, tuning),
                audio,
                accumulator: 0.0,
                input: TickInput {
                    idle_mode: true,
                    ..Default::default()
                },
                frames: 0,
            }
        }

        /// Run simulation ticks for one host frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let events = self.state.drain_events();
            self.audio.handle_events(&events);
            self.frames += 1;
        }

        fn run(&mut self) {
            let max_frames = (MAX_SECONDS as f32 / FRAME_DT) as u64;
            while !self.state.is_game_over() && self.frames < max_frames {
                self.update(FRAME_DT);
            }
            log::info!(
                "Run finished after {} frames ({} ticks, {} rows generated, seed {:#x})",
                self.frames,
                self.state.time_ticks,
                self.state.generator.rows_generated(),
                self.state.rng.seed()
            );
        }
    }

    fn parse_seed(arg: Option<&str>) -> Result<u64, String> {
        let Some(raw) = arg else {
            return Ok(DEFAULT_SEED);
        };
        let parsed = match raw.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => raw.parse(),
        };
        parsed.map_err(|e| format!("invalid seed `{}`: {}", raw, e))
    }

    pub fn main() {
        env_logger::init();
        log::info!("Sky Hop (native) starting...");

        let args: Vec<String> = std::env::args().collect();

        let seed = match parse_seed(args.get(1).map(String::as_str)) {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        };

        let tuning = match args.get(2) {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            None => Tuning::default(),
        };

        let mut runner = Runner::new(seed, tuning);
        runner.run();

        match serde_json::to_string_pretty(&runner.state.hud()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize HUD: {}", e);
                std::process::exit(1);
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven by an embedding page
}
