//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod generator;
pub mod handle;
pub mod lifecycle;
pub mod physics;
pub mod registry;
pub mod rng;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Contact, ContactKind, Effect, resolve};
pub use difficulty::Difficulty;
pub use entities::{Boost, Hazard, HazardMode, Motion, Platform, PlatformKind, Player};
pub use generator::{Row, WorldGenerator};
pub use handle::{Arena, Handle};
pub use lifecycle::{SweepReport, sweep, update_motion};
pub use registry::{Registry, Removed};
pub use rng::{RandomSource, SimRng};
pub use state::{Camera, GameEvent, GameOverCause, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
pub use timer::Countdown;
