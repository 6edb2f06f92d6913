//! Game balance tuning
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Defaults match the shipped game; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Horizontal extent of the playfield
    pub world_width: f32,
    /// Height of the visible window
    pub view_height: f32,
    /// Downward acceleration applied to the player (units/s²)
    pub gravity: f32,

    // === Player ===
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    pub player_start_x: f32,
    /// Spawn height; also the zero point for height score
    pub player_start_y: f32,

    // === Generation ===
    pub start_platform_y: f32,
    /// Rows generated above the start platform on session start
    pub initial_rows: u32,
    /// Leading rows of the initial column that are always plain; together
    /// with the start platform the player starts with `safe_rows + 1`
    pub safe_rows: u32,
    pub row_gap_min: f32,
    pub row_gap_max: f32,
    /// Max horizontal offset from a lane centre
    pub lane_jitter: f32,
    /// Extra clearance between a real platform and its fake neighbour
    pub fake_margin: f32,
    /// Rows after a boost in which hazards are not spawned
    pub boost_hazard_cooldown_rows: u32,

    // === Collisions ===
    pub bounce_velocity: f32,
    pub stomp_velocity: f32,
    pub boost_velocity: f32,
    /// Player must be this far above a hazard to stomp it
    pub stomp_tolerance: f32,
    pub stomp_bonus: u64,

    // === Session ===
    pub score_divisor: f32,
    /// Countdown start in seconds
    pub time_limit: u32,
    /// Distance below the visible window before entities are reclaimed
    pub recycle_margin: f32,
    /// Camera scrolls up once the player climbs above this screen offset
    pub camera_follow_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 360.0,
            view_height: 640.0,
            gravity: 1200.0,

            player_speed: 300.0,
            player_start_x: 180.0,
            player_start_y: 450.0,

            start_platform_y: 600.0,
            initial_rows: 20,
            safe_rows: 4,
            row_gap_min: 75.0,
            row_gap_max: 105.0,
            lane_jitter: 25.0,
            fake_margin: 10.0,
            boost_hazard_cooldown_rows: 3,

            bounce_velocity: 680.0,
            stomp_velocity: 1000.0,
            boost_velocity: 1300.0,
            stomp_tolerance: 5.0,
            stomp_bonus: 20,

            score_divisor: 10.0,
            time_limit: 200,
            recycle_margin: 50.0,
            camera_follow_offset: 220.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the generator and resolver cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let floats = [
            ("world_width", self.world_width),
            ("view_height", self.view_height),
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("player_start_x", self.player_start_x),
            ("player_start_y", self.player_start_y),
            ("start_platform_y", self.start_platform_y),
            ("row_gap_min", self.row_gap_min),
            ("row_gap_max", self.row_gap_max),
            ("lane_jitter", self.lane_jitter),
            ("fake_margin", self.fake_margin),
            ("bounce_velocity", self.bounce_velocity),
            ("stomp_velocity", self.stomp_velocity),
            ("boost_velocity", self.boost_velocity),
            ("stomp_tolerance", self.stomp_tolerance),
            ("score_divisor", self.score_divisor),
            ("recycle_margin", self.recycle_margin),
            ("camera_follow_offset", self.camera_follow_offset),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }

        if self.world_width <= crate::consts::PLATFORM_W {
            return invalid("world_width", "must be wider than a platform");
        }
        if self.view_height <= 0.0 {
            return invalid("view_height", "must be positive");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity", "must be positive");
        }
        if self.row_gap_min <= 0.0 {
            return invalid("row_gap_min", "must be positive");
        }
        if self.row_gap_max < self.row_gap_min {
            return invalid("row_gap_max", "must be >= row_gap_min");
        }
        if self.lane_jitter < 0.0 {
            return invalid("lane_jitter", "must not be negative");
        }
        if self.score_divisor <= 0.0 {
            return invalid("score_divisor", "must be positive");
        }
        if self.bounce_velocity <= 0.0 {
            return invalid("bounce_velocity", "must be positive");
        }
        if self.stomp_velocity <= self.bounce_velocity {
            return invalid("stomp_velocity", "must exceed bounce_velocity");
        }
        if self.boost_velocity <= self.stomp_velocity {
            return invalid("boost_velocity", "must exceed stomp_velocity");
        }
        if self.time_limit == 0 {
            return invalid("time_limit", "must be at least one second");
        }
        Ok(())
    }
}
