//! Minimal arcade physics
//!
//! Integrates velocities (gravity on the player only) and reports which
//! bodies the player touched. Platforms are one-way: the player only lands on
//! them from above. Everything here feeds [`super::collision::resolve`]
//! through [`Target`]s; swapping in another physics backend only needs to
//! produce the same targets.

use glam::Vec2;

use super::entities::Player;
use super::handle::Handle;
use super::registry::Registry;
use crate::consts::*;

/// Body the player made contact with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Platform(Handle),
    Hazard(Handle),
    Boost(Handle),
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Advance every body by `dt`
pub fn integrate(player: &mut Player, registry: &mut Registry, gravity: f32, dt: f32) {
    player.prev_pos = player.pos;
    player.vel.y += gravity * dt;
    player.pos += player.vel * dt;

    for (_, platform) in registry.platforms.iter_mut() {
        platform.pos += platform.vel * dt;
    }
    for (_, hazard) in registry.hazards.iter_mut() {
        hazard.pos += hazard.vel * dt;
    }
    for (_, boost) in registry.boosts.iter_mut() {
        boost.pos += boost.vel * dt;
    }
}

/// Everything the player touches this step
///
/// Ordered hazards, then boosts, then platforms.
pub fn detect_contacts(player: &Player, registry: &Registry) -> Vec<Target> {
    let half = Vec2::splat(player.half_size());
    let player_box = Aabb::from_center(player.pos, half);
    let mut targets = Vec::new();

    for (handle, hazard) in registry.hazards.iter() {
        let hazard_box = Aabb::from_center(hazard.pos, Vec2::splat(hazard.half_size()));
        if player_box.overlaps(&hazard_box) {
            targets.push(Target::Hazard(handle));
        }
    }

    for (handle, boost) in registry.boosts.iter() {
        let boost_box = Aabb::from_center(boost.pos, Vec2::new(BOOST_W / 2.0, BOOST_H / 2.0));
        if player_box.overlaps(&boost_box) {
            targets.push(Target::Boost(handle));
        }
    }

    if player.is_falling() {
        let prev_bottom = player.prev_pos.y + player.half_size();
        let bottom = player.bottom();
        for (handle, platform) in registry.platforms.iter() {
            let top = platform.top();
            let (left, right) = platform.footprint();
            let horizontal = player_box.max.x > left && player_box.min.x < right;
            if horizontal && prev_bottom <= top && bottom >= top {
                targets.push(Target::Platform(handle));
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Hazard, HazardMode, Platform, PlatformKind};

    #[test]
    fn test_gravity_integration() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let mut reg = Registry::new();
        integrate(&mut player, &mut reg, 1200.0, 0.5);
        assert_eq!(player.vel.y, 600.0);
        assert_eq!(player.pos.y, 400.0);
        assert_eq!(player.prev_pos.y, 100.0);
    }

    #[test]
    fn test_platforms_move_without_gravity() {
        let mut player = Player::new(Vec2::ZERO);
        let mut reg = Registry::new();
        let mut p = Platform::new(PlatformKind::Real, Vec2::new(100.0, 100.0), 1.0);
        p.vel.x = 50.0;
        let h = reg.spawn_platform(p);
        integrate(&mut player, &mut reg, 1200.0, 0.1);
        let p = reg.platforms.get(h).unwrap();
        assert_eq!(p.pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn test_landing_from_above() {
        let mut reg = Registry::new();
        let h = reg.spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(100.0, 300.0), 1.0));
        let mut player = Player::new(Vec2::new(100.0, 285.0));
        player.prev_pos = Vec2::new(100.0, 280.0);
        player.vel.y = 300.0;
        assert_eq!(detect_contacts(&player, &reg), vec![Target::Platform(h)]);

        // Rising through it: no contact
        player.vel.y = -300.0;
        assert!(detect_contacts(&player, &reg).is_empty());

        // Already below the surface last step: no contact
        player.vel.y = 300.0;
        player.prev_pos = Vec2::new(100.0, 290.0);
        assert!(detect_contacts(&player, &reg).is_empty());
    }

    #[test]
    fn test_missing_horizontally() {
        let mut reg = Registry::new();
        reg.spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(100.0, 300.0), 1.0));
        let mut player = Player::new(Vec2::new(200.0, 285.0));
        player.prev_pos = Vec2::new(200.0, 280.0);
        player.vel.y = 300.0;
        assert!(detect_contacts(&player, &reg).is_empty());
    }

    #[test]
    fn test_hazard_listed_before_platform() {
        let mut reg = Registry::new();
        let p = reg.spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(100.0, 300.0), 1.0));
        let h = reg
            .attach_hazard(Hazard {
                pos: Vec2::new(100.0, 284.5),
                vel: Vec2::ZERO,
                mode: HazardMode::Riding,
                parent: p,
                offset_x: 0.0,
            })
            .unwrap();
        let mut player = Player::new(Vec2::new(100.0, 285.0));
        player.prev_pos = Vec2::new(100.0, 280.0);
        player.vel.y = 300.0;
        assert_eq!(
            detect_contacts(&player, &reg),
            vec![Target::Hazard(h), Target::Platform(p)]
        );
    }
}
