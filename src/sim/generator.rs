//! World generation
//!
//! Builds the column of platforms above the player. Each row gets one real
//! platform in a random lane (so there is always somewhere to land), and may
//! get a fake platform in another lane. Real platforms may move and may carry
//! a boost or a hazard, depending on the difficulty curve.
//!
//! Recycling policy: only reclaiming a real (or start) platform produces a
//! new row. Fake platforms are never replaced.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::entities::{Boost, Hazard, HazardMode, Motion, Platform, PlatformKind};
use super::handle::Handle;
use super::registry::Registry;
use super::rng::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{clamp_platform_x, lanes};

/// What a single generated row contains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub y: f32,
    pub real: Handle,
    pub fake: Option<Handle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGenerator {
    /// Y of the highest generated row
    frontier_y: f32,
    /// Upcoming real platforms that may not get a hazard
    hazard_cooldown: u32,
    rows_generated: u32,
}

impl WorldGenerator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            frontier_y: tuning.start_platform_y,
            hazard_cooldown: 0,
            rows_generated: 0,
        }
    }

    pub fn frontier_y(&self) -> f32 {
        self.frontier_y
    }

    pub fn rows_generated(&self) -> u32 {
        self.rows_generated
    }

    /// The plain platform the player starts above
    pub fn spawn_start_platform(&mut self, registry: &mut Registry, tuning: &Tuning) -> Handle {
        self.frontier_y = tuning.start_platform_y;
        let pos = Vec2::new(tuning.world_width / 2.0, tuning.start_platform_y);
        registry.spawn_platform(Platform::new(PlatformKind::Start, pos, 1.0))
    }

    /// Fill `count` rows above the start platform
    ///
    /// The first `tuning.safe_rows` rows are plain real platforms.
    pub fn generate_initial_column<R: RandomSource>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
        tuning: &Tuning,
        count: u32,
    ) {
        let difficulty = Difficulty::for_score(0);
        for i in 0..count {
            self.advance_frontier(rng, tuning);
            let safe = i < tuning.safe_rows;
            self.place_row(registry, rng, tuning, &difficulty, safe);
        }
        log::debug!(
            "Initial column: {} rows, frontier at {:.1}",
            count,
            self.frontier_y
        );
    }

    /// Extend the column by one row at the current score
    pub fn generate_next_row<R: RandomSource>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
        tuning: &Tuning,
        score: u64,
    ) -> Row {
        let difficulty = Difficulty::for_score(score);
        self.advance_frontier(rng, tuning);
        self.place_row(registry, rng, tuning, &difficulty, false)
    }

    fn advance_frontier<R: RandomSource>(&mut self, rng: &mut R, tuning: &Tuning) {
        self.frontier_y -= rng.uniform(tuning.row_gap_min, tuning.row_gap_max);
    }

    fn place_row<R: RandomSource>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
        tuning: &Tuning,
        difficulty: &Difficulty,
        safe: bool,
    ) -> Row {
        let y = self.frontier_y;
        let lane_xs = lanes(tuning.world_width);
        // Late game keeps the real platform near the middle; fakes still go to an outer lane
        let (lane, spread) = if difficulty.centre_placement {
            (CENTRE_LANE, CENTRE_PLACEMENT_HALF_SPAN)
        } else {
            (rng.pick(&[0usize, 1, 2]), tuning.lane_jitter)
        };

        let mut platform = Platform::new(PlatformKind::Real, Vec2::new(0.0, y), difficulty.scale);
        let half = platform.half_width();
        let jitter = rng.uniform(-spread, spread);
        platform.pos.x = clamp_platform_x(lane_xs[lane] + jitter, half, tuning.world_width);

        if !safe && rng.chance(difficulty.moving_chance) {
            let (min_x, max_x) = motion_band(difficulty, half, tuning.world_width);
            let speed = rng.uniform(difficulty.platform_speed_min, difficulty.platform_speed_max);
            let direction = rng.pick(&[-1.0f32, 1.0]);
            platform.pos.x = platform.pos.x.clamp(min_x, max_x);
            platform.motion = Motion::Oscillating { min_x, max_x, speed };
            platform.vel.x = speed * direction;
        }

        let x = platform.pos.x;
        let moving = platform.is_moving();
        let real = registry.spawn_platform(platform);
        self.rows_generated += 1;

        if !safe {
            self.populate(registry, rng, tuning, difficulty, real);
        }

        let fake = if !safe && !moving && rng.chance(difficulty.fake_chance) {
            place_fake(registry, rng, tuning, difficulty, lane, x, y)
        } else {
            None
        };

        log::debug!(
            "Row {} at y={:.1}: lane {} x={:.1}{}{}",
            self.rows_generated,
            y,
            lane,
            x,
            if moving { " moving" } else { "" },
            if fake.is_some() { " +fake" } else { "" }
        );

        Row { y, real, fake }
    }

    /// Decide whether a fresh real platform gets a boost or a hazard
    fn populate<R: RandomSource>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
        tuning: &Tuning,
        difficulty: &Difficulty,
        parent: Handle,
    ) {
        let Some(platform) = registry.platforms.get(parent) else {
            return;
        };
        let (pos, vel, top, half, moving) = (
            platform.pos,
            platform.vel,
            platform.top(),
            platform.half_width(),
            platform.is_moving(),
        );

        // Boosts and hazards never share a platform, and a boost holds
        // hazards off for the next few rows
        if rng.chance(difficulty.boost_chance) {
            let room = (half - BOOST_W / 2.0).max(0.0);
            let offset_x = rng.uniform(-room, room);
            registry.attach_boost(Boost {
                pos: Vec2::new(pos.x + offset_x, top - BOOST_H / 2.0),
                vel,
                parent,
                offset_x,
            });
            self.hazard_cooldown = tuning.boost_hazard_cooldown_rows;
            return;
        }

        if self.hazard_cooldown > 0 {
            self.hazard_cooldown -= 1;
            return;
        }

        if !rng.chance(difficulty.hazard_chance) {
            return;
        }

        let hazard_y = top - HAZARD_SIZE / 2.0 - HAZARD_LIFT;
        let hazard = if difficulty.patrol_enabled() && !moving {
            let speed = rng.uniform(difficulty.patrol_speed_min, difficulty.patrol_speed_max);
            let direction = rng.pick(&[-1.0f32, 1.0]);
            Hazard {
                pos: Vec2::new(pos.x, hazard_y),
                vel: Vec2::new(speed * direction, 0.0),
                mode: HazardMode::Patrolling,
                parent,
                offset_x: 0.0,
            }
        } else {
            Hazard {
                pos: Vec2::new(pos.x, hazard_y),
                vel,
                mode: HazardMode::Riding,
                parent,
                offset_x: 0.0,
            }
        };
        registry.attach_hazard(hazard);
    }
}

/// Horizontal range a moving platform's centre travels within
pub fn motion_band(difficulty: &Difficulty, half_width: f32, world_width: f32) -> (f32, f32) {
    let min = half_width;
    let max = (world_width - half_width).max(min);
    if difficulty.narrow_motion {
        let centre = world_width / 2.0;
        (
            (centre - NARROW_MOTION_HALF_SPAN).max(min),
            (centre + NARROW_MOTION_HALF_SPAN).min(max),
        )
    } else {
        (min, max)
    }
}

/// Try to put a fake platform in a lane other than `real_lane`
///
/// Skipped when the clamped position would crowd the real platform.
fn place_fake<R: RandomSource>(
    registry: &mut Registry,
    rng: &mut R,
    tuning: &Tuning,
    difficulty: &Difficulty,
    real_lane: usize,
    real_x: f32,
    y: f32,
) -> Option<Handle> {
    let lane_xs = lanes(tuning.world_width);
    let others: Vec<usize> = (0..lane_xs.len()).filter(|&l| l != real_lane).collect();
    let lane = rng.pick(&others);

    let mut fake = Platform::new(PlatformKind::Fake, Vec2::new(0.0, y), difficulty.scale);
    let jitter = rng.uniform(-tuning.lane_jitter, tuning.lane_jitter);
    fake.pos.x = clamp_platform_x(lane_xs[lane] + jitter, fake.half_width(), tuning.world_width);

    let min_gap = fake.width() + tuning.fake_margin;
    if (fake.pos.x - real_x).abs() <= min_gap {
        log::trace!("Fake at x={:.1} too close to real at x={:.1}, skipped", fake.pos.x, real_x);
        return None;
    }

    Some(registry.spawn_platform(fake))
}
