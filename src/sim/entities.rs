//! Entity types living in the world column

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::handle::Handle;
use crate::consts::*;

/// What happens when the player lands on a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// The single platform the session starts on
    Start,
    /// Safe, bounces the player
    Real,
    /// Collapses under the player, no bounce
    Fake,
}

/// Horizontal motion of a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Stationary,
    /// Ping-pong between `min_x` and `max_x` at a fixed speed
    Oscillating { min_x: f32, max_x: f32, speed: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PlatformKind,
    pub motion: Motion,
    /// Width multiplier (shrinks late in the game)
    pub scale: f32,
    pub hazard: Option<Handle>,
    pub boost: Option<Handle>,
}

impl Platform {
    pub fn new(kind: PlatformKind, pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            kind,
            motion: Motion::Stationary,
            scale,
            hazard: None,
            boost: None,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        PLATFORM_W * self.scale / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        PLATFORM_W * self.scale
    }

    /// Y of the landing surface (y grows downward)
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - PLATFORM_H / 2.0
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Oscillating { .. })
    }

    /// Start and Real platforms are safe to land on and get replaced when reclaimed
    pub fn is_solid(&self) -> bool {
        self.kind != PlatformKind::Fake
    }

    /// Horizontal extent `(left, right)` of the platform
    pub fn footprint(&self) -> (f32, f32) {
        (self.pos.x - self.half_width(), self.pos.x + self.half_width())
    }
}

/// How a hazard moves relative to its platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardMode {
    /// Carried along with the platform
    Riding,
    /// Walks back and forth across a stationary platform
    Patrolling,
}

/// An enemy sitting on a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mode: HazardMode,
    /// Owning platform; may be stale
    pub parent: Handle,
    /// Offset from the parent's centre while riding
    pub offset_x: f32,
}

impl Hazard {
    #[inline]
    pub fn half_size(&self) -> f32 {
        HAZARD_SIZE / 2.0
    }
}

/// A spring that launches the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub pos: Vec2,
    pub vel: Vec2,
    pub parent: Handle,
    pub offset_x: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Position before the last physics step (for landing checks)
    pub prev_pos: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            prev_pos: pos,
        }
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        PLAYER_SIZE / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.half_size()
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.vel.y > 0.0
    }
}
