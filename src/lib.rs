//! Sky Hop - An endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, lifecycle, collisions, session)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue mapping behind a pluggable sink

pub mod audio;
pub mod sim;
pub mod tuning;

pub use audio::{AudioManager, AudioSink, LogSink, SoundEffect};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player body (square)
    pub const PLAYER_SIZE: f32 = 20.0;

    /// Platform body at scale 1.0
    pub const PLATFORM_W: f32 = 70.0;
    pub const PLATFORM_H: f32 = 15.0;

    /// Hazard body (square, drawn as a circle)
    pub const HAZARD_SIZE: f32 = 16.0;
    /// Gap between a hazard and the top of its platform
    pub const HAZARD_LIFT: f32 = 2.0;

    /// Boost (spring) body
    pub const BOOST_W: f32 = 24.0;
    pub const BOOST_H: f32 = 10.0;

    /// How far the player is lifted off a surface after a bounce
    pub const SURFACE_NUDGE: f32 = 1.0;

    /// Half-width of the centre band moving platforms use late in the game
    pub const NARROW_MOTION_HALF_SPAN: f32 = 40.0;
    /// Max offset from the centre for late-game real platforms
    pub const CENTRE_PLACEMENT_HALF_SPAN: f32 = 30.0;

    /// Index of the middle lane in [`crate::lanes`]
    pub const CENTRE_LANE: usize = 1;
}

/// Lane centres for a world of the given width (left, centre, right)
#[inline]
pub fn lanes(world_width: f32) -> [f32; 3] {
    [world_width * 0.25, world_width * 0.5, world_width * 0.75]
}

/// Clamp a platform centre so the whole platform stays on screen
#[inline]
pub fn clamp_platform_x(x: f32, half_width: f32, world_width: f32) -> f32 {
    let max = (world_width - half_width).max(half_width);
    x.clamp(half_width, max)
}

/// Wrap a horizontal position around the world edges
///
/// Leaving past the right edge re-enters on the left and vice versa.
#[inline]
pub fn wrap_x(x: f32, world_width: f32) -> f32 {
    if x < 0.0 {
        world_width
    } else if x > world_width {
        0.0
    } else {
        x
    }
}
