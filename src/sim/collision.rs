//! Collision resolution
//!
//! Turns a contact between the player and something in the world into a
//! gameplay effect. This is a pure function of the contact snapshot and the
//! tuning, so it can be exercised without a physics step.

use super::entities::PlatformKind;
use crate::consts::*;
use crate::tuning::Tuning;

/// What the player touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Landed on a platform from above
    Platform(PlatformKind),
    /// Overlapping an enemy
    Hazard,
    /// Overlapping a spring
    Boost,
}

/// Snapshot of a player contact (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub kind: ContactKind,
    pub player_y: f32,
    pub player_vel_y: f32,
    /// Centre y of the other body
    pub other_y: f32,
    /// Top surface of the other body
    pub surface_y: f32,
}

impl Contact {
    #[inline]
    fn falling(&self) -> bool {
        self.player_vel_y > 0.0
    }
}

/// Result of resolving a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing happens (e.g. passing upward through a spring)
    None,
    /// Normal bounce off a solid platform; player rests at `rest_y`
    Bounce { velocity_y: f32, rest_y: f32 },
    /// The fake platform (and anything on it) goes away, no bounce
    Collapse,
    /// Hazard defeated from above
    Stomp { velocity_y: f32, bonus: u64 },
    /// Spring launch
    Launch { velocity_y: f32 },
    /// Fatal hazard contact
    Death,
}

/// Map a contact to its effect
pub fn resolve(contact: &Contact, tuning: &Tuning) -> Effect {
    match contact.kind {
        ContactKind::Platform(PlatformKind::Fake) => {
            if contact.falling() && contact.player_y < contact.other_y {
                Effect::Collapse
            } else {
                Effect::None
            }
        }
        ContactKind::Platform(_) => {
            if contact.falling() {
                Effect::Bounce {
                    velocity_y: -tuning.bounce_velocity,
                    rest_y: contact.surface_y - PLAYER_SIZE / 2.0 - SURFACE_NUDGE,
                }
            } else {
                Effect::None
            }
        }
        ContactKind::Hazard => {
            if contact.falling() && contact.player_y < contact.other_y - tuning.stomp_tolerance {
                Effect::Stomp {
                    velocity_y: -tuning.stomp_velocity,
                    bonus: tuning.stomp_bonus,
                }
            } else {
                Effect::Death
            }
        }
        ContactKind::Boost => {
            if contact.falling() {
                Effect::Launch {
                    velocity_y: -tuning.boost_velocity,
                }
            } else {
                Effect::None
            }
        }
    }
}
