//! Difficulty curve
//!
//! Pure lookup from score to spawn chances and speed bands. Every parameter
//! is a step (or clamped) function of score that never gets easier as the
//! score rises.

use serde::{Deserialize, Serialize};

/// Score past which traps and hazards get more common
pub const TIER_1_SCORE: u64 = 50;
/// Second escalation step
pub const TIER_2_SCORE: u64 = 150;
/// Hazards on stationary platforms start patrolling; new platforms keep to the centre
pub const PATROL_SCORE: u64 = 200;
/// Platforms start shrinking
pub const SHRINK_SCORE: u64 = 1000;
/// Platforms shrink again
pub const SHRINK_2_SCORE: u64 = 2000;

/// Slowest a moving platform ever travels
pub const PLATFORM_SPEED_MIN: f32 = 50.0;
/// Base top speed before the score bonus
pub const PLATFORM_SPEED_BASE_MAX: f32 = 150.0;
/// Cap on the score-derived top-speed bonus
pub const PLATFORM_SPEED_BONUS_CAP: u64 = 100;
/// Slowest a patrolling hazard walks
pub const PATROL_SPEED_MIN: f32 = 40.0;

/// Generation parameters for one score value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Percent chance a row also gets a fake platform
    pub fake_chance: u32,
    /// Percent chance a real platform moves
    pub moving_chance: u32,
    /// Percent chance a real platform carries a hazard
    pub hazard_chance: u32,
    /// Percent chance a real platform carries a boost
    pub boost_chance: u32,
    /// Moving platform speed band; riding hazards inherit this speed
    pub platform_speed_min: f32,
    pub platform_speed_max: f32,
    /// Patrol speed band, `0.0` while patrolling is locked
    pub patrol_speed_min: f32,
    pub patrol_speed_max: f32,
    /// Moving platforms keep to the centre band
    pub narrow_motion: bool,
    /// Real platforms are placed around the centre instead of in a random lane
    pub centre_placement: bool,
    /// Platform width multiplier
    pub scale: f32,
}

impl Difficulty {
    /// Look up the curve at `score`
    pub fn for_score(score: u64) -> Self {
        let (fake_chance, moving_chance, hazard_chance) = if score > TIER_2_SCORE {
            (20, 30, 60)
        } else if score > TIER_1_SCORE {
            (15, 20, 40)
        } else {
            (10, 10, 20)
        };

        // Late game pushes traps a little further
        let fake_chance = if score >= SHRINK_SCORE { fake_chance + 5 } else { fake_chance };
        let moving_chance = if score >= SHRINK_SCORE { moving_chance + 5 } else { moving_chance };

        let boost_chance = if score > TIER_2_SCORE { 8 } else { 6 };

        let speed_bonus = score.min(PLATFORM_SPEED_BONUS_CAP) as f32;

        let patrol_enabled = score >= PATROL_SCORE;
        let (patrol_speed_min, patrol_speed_max) = if !patrol_enabled {
            (0.0, 0.0)
        } else if score >= SHRINK_SCORE {
            (PATROL_SPEED_MIN, 100.0)
        } else {
            (PATROL_SPEED_MIN, 70.0)
        };

        let scale = if score >= SHRINK_2_SCORE {
            0.7
        } else if score >= SHRINK_SCORE {
            0.85
        } else {
            1.0
        };

        Self {
            fake_chance,
            moving_chance,
            hazard_chance,
            boost_chance,
            platform_speed_min: PLATFORM_SPEED_MIN,
            platform_speed_max: PLATFORM_SPEED_BASE_MAX + speed_bonus,
            patrol_speed_min,
            patrol_speed_max,
            narrow_motion: patrol_enabled,
            centre_placement: patrol_enabled,
            scale,
        }
    }

    /// Whether hazards on stationary platforms patrol
    pub fn patrol_enabled(&self) -> bool {
        self.patrol_speed_max > 0.0
    }
}
