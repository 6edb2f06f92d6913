//! Game state and session lifecycle
//!
//! One [`GameState`] owns everything a run needs: tuning, RNG, the entity
//! registry, the generator's frontier, the camera, the countdown, and the
//! score. Restarting replaces all of it with a freshly built state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Player;
use super::generator::WorldGenerator;
use super::registry::Registry;
use super::rng::SimRng;
use super::timer::Countdown;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; waiting for a restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Countdown reached zero
    Timeout,
    /// Dropped below the bottom of the screen
    Fell,
    /// Touched a hazard without stomping it
    Hazard,
}

/// Things that happened during a tick, for audio and presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Bounce,
    FakeCollapsed,
    HazardStomped { bonus: u64 },
    BoostLaunched,
    TimerTick { remaining: u32 },
    GameOver { cause: GameOverCause, score: u64 },
    Restarted { seed: u64 },
}

/// Vertical scroll window
///
/// Only ever scrolls up; easing and shake belong to the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// World y at the top edge of the screen
    pub scroll_y: f32,
    pub view_height: f32,
}

impl Camera {
    pub fn new(view_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            view_height,
        }
    }

    /// Scroll up when the player climbs above `offset` from the top edge
    pub fn follow(&mut self, player_y: f32, offset: f32) {
        self.scroll_y = self.scroll_y.min(player_y - offset);
    }

    /// World y at the bottom edge of the screen
    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.view_height
    }
}

/// What a presentation layer shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub time_left: u32,
    pub game_over: bool,
    pub cause: Option<GameOverCause>,
    pub seed: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: SimRng,
    pub phase: GamePhase,
    pub cause: Option<GameOverCause>,
    /// Best of height score and bonuses; never decreases
    pub score: u64,
    /// Seconds left on the countdown
    pub time_left: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub registry: Registry,
    pub generator: WorldGenerator,
    pub camera: Camera,
    pub countdown: Countdown,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session: start platform, initial column, player, countdown
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = SimRng::new(seed);
        let mut registry = Registry::new();
        let mut generator = WorldGenerator::new(&tuning);

        generator.spawn_start_platform(&mut registry, &tuning);
        generator.generate_initial_column(&mut registry, &mut rng, &tuning, tuning.initial_rows);

        let player = Player::new(Vec2::new(tuning.player_start_x, tuning.player_start_y));
        let camera = Camera::new(tuning.view_height);

        log::info!(
            "Session started: seed={} rows={} time={}s",
            seed,
            registry.platforms.len(),
            tuning.time_limit
        );

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            cause: None,
            score: 0,
            time_left: tuning.time_limit,
            time_ticks: 0,
            player,
            registry,
            generator,
            camera,
            countdown: Countdown::new(1.0),
            events: Vec::new(),
            tuning,
        }
    }

    /// Throw the whole run away and start a fresh one
    ///
    /// The new seed is drawn from the current RNG so restarts are reproducible.
    pub fn restart(&mut self) {
        self.countdown.cancel();
        let seed = self.rng.next_seed();
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(seed, tuning);
        self.events.push(GameEvent::Restarted { seed });
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            time_left: self.time_left,
            game_over: self.is_game_over(),
            cause: self.cause,
            seed: self.seed,
        }
    }

    /// Anything below this y is reclaimed; the player falling past it dies
    pub fn destroy_threshold(&self) -> f32 {
        self.camera.bottom() + self.tuning.recycle_margin
    }

    /// Score from height climbed since spawn
    pub fn height_score(&self) -> u64 {
        let climbed = (self.tuning.player_start_y - self.player.pos.y) / self.tuning.score_divisor;
        climbed.floor().max(0.0) as u64
    }

    /// Raise the score to the current height score if that is higher
    pub fn update_score(&mut self) {
        self.score = self.score.max(self.height_score());
    }

    /// One countdown period elapsed
    pub fn on_timer_tick(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        self.events.push(GameEvent::TimerTick {
            remaining: self.time_left,
        });
        if self.time_left == 0 {
            self.game_over(GameOverCause::Timeout);
        }
    }

    /// Enter the terminal phase; later calls are ignored
    pub fn game_over(&mut self, cause: GameOverCause) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.cause = Some(cause);
        self.countdown.cancel();
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!(
            "Game over ({:?}): score={} time_left={}s",
            cause,
            self.score,
            self.time_left
        );
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
