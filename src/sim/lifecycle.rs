//! Entity lifecycle
//!
//! Keeps the world's size bounded by the visible window: anything that drops
//! below the reclaim line is removed, and every reclaimed real platform is
//! replaced by a new row at the top. Also drives the per-frame kinematics of
//! moving platforms and the things riding or patrolling on them.

use super::entities::{HazardMode, Motion, PlatformKind};
use super::generator::WorldGenerator;
use super::registry::{Registry, Removed};
use super::rng::RandomSource;
use crate::tuning::Tuning;

/// What one sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: Removed,
    pub rows_generated: usize,
}

/// Reclaim everything below `threshold` (y grows downward)
///
/// Loose hazards and boosts go first. Each platform takes its dependents with
/// it; each reclaimed solid platform triggers exactly one new row.
pub fn sweep<R: RandomSource>(
    registry: &mut Registry,
    generator: &mut WorldGenerator,
    rng: &mut R,
    tuning: &Tuning,
    score: u64,
    threshold: f32,
) -> SweepReport {
    let mut report = SweepReport::default();

    for handle in registry.hazards.handles() {
        let below = registry.hazards.get(handle).is_some_and(|h| h.pos.y > threshold);
        if below && registry.remove_hazard(handle).is_some() {
            report.removed.hazards += 1;
        }
    }

    for handle in registry.boosts.handles() {
        let below = registry.boosts.get(handle).is_some_and(|b| b.pos.y > threshold);
        if below && registry.remove_boost(handle).is_some() {
            report.removed.boosts += 1;
        }
    }

    for handle in registry.platforms.handles() {
        let below = registry.platforms.get(handle).is_some_and(|p| p.pos.y > threshold);
        if !below {
            continue;
        }
        let Some((kind, removed)) = registry.remove_platform(handle) else {
            continue;
        };
        report.removed.platforms += removed.platforms;
        report.removed.hazards += removed.hazards;
        report.removed.boosts += removed.boosts;

        if kind != PlatformKind::Fake {
            generator.generate_next_row(registry, rng, tuning, score);
            report.rows_generated += 1;
        }
    }

    if report.removed.platforms > 0 {
        log::debug!(
            "Sweep below {:.1}: -{} platforms, -{} hazards, -{} boosts, +{} rows",
            threshold,
            report.removed.platforms,
            report.removed.hazards,
            report.removed.boosts,
            report.rows_generated
        );
    }

    report
}

/// Per-frame kinematics after integration
///
/// - moving platforms turn around at their bounds
/// - riding hazards and boosts follow their platform
/// - patrolling hazards turn around at their platform's edges
///
/// Children of a platform that no longer exists are left alone.
pub fn update_motion(registry: &mut Registry) {
    for (_, platform) in registry.platforms.iter_mut() {
        if let Motion::Oscillating { min_x, max_x, speed } = platform.motion {
            if platform.pos.x <= min_x {
                platform.pos.x = min_x;
                platform.vel.x = speed;
            } else if platform.pos.x >= max_x {
                platform.pos.x = max_x;
                platform.vel.x = -speed;
            }
        }
    }

    let platforms = &registry.platforms;

    for (_, hazard) in registry.hazards.iter_mut() {
        let Some(parent) = platforms.get(hazard.parent) else {
            continue;
        };
        match hazard.mode {
            HazardMode::Riding => {
                hazard.vel.x = parent.vel.x;
                hazard.pos.x = parent.pos.x + hazard.offset_x;
            }
            HazardMode::Patrolling => {
                let (left, right) = parent.footprint();
                let min = left + hazard.half_size();
                let max = (right - hazard.half_size()).max(min);
                if hazard.pos.x <= min {
                    hazard.pos.x = min;
                    hazard.vel.x = hazard.vel.x.abs();
                } else if hazard.pos.x >= max {
                    hazard.pos.x = max;
                    hazard.vel.x = -hazard.vel.x.abs();
                }
            }
        }
    }

    for (_, boost) in registry.boosts.iter_mut() {
        if let Some(parent) = platforms.get(boost.parent) {
            boost.vel.x = parent.vel.x;
            boost.pos.x = parent.pos.x + boost.offset_x;
        }
    }
}
