//! Entity registry
//!
//! Owns every platform, hazard and boost in the world. Hazards and boosts
//! hold a [`Handle`] to their platform; the platform holds handles back to
//! them. Removal always takes dependents out before the platform itself.

use serde::{Deserialize, Serialize};

use super::entities::{Boost, Hazard, Platform, PlatformKind};
use super::handle::{Arena, Handle};

/// Counts of what a removal took out of the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removed {
    pub platforms: usize,
    pub hazards: usize,
    pub boosts: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub platforms: Arena<Platform>,
    pub hazards: Arena<Hazard>,
    pub boosts: Arena<Boost>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_platform(&mut self, platform: Platform) -> Handle {
        self.platforms.insert(platform)
    }

    /// Put a hazard on a platform; `None` if the platform is gone
    pub fn attach_hazard(&mut self, hazard: Hazard) -> Option<Handle> {
        let parent = hazard.parent;
        if !self.platforms.contains(parent) {
            return None;
        }
        let handle = self.hazards.insert(hazard);
        if let Some(platform) = self.platforms.get_mut(parent) {
            platform.hazard = Some(handle);
        }
        Some(handle)
    }

    /// Put a boost on a platform; `None` if the platform is gone
    pub fn attach_boost(&mut self, boost: Boost) -> Option<Handle> {
        let parent = boost.parent;
        if !self.platforms.contains(parent) {
            return None;
        }
        let handle = self.boosts.insert(boost);
        if let Some(platform) = self.platforms.get_mut(parent) {
            platform.boost = Some(handle);
        }
        Some(handle)
    }

    /// Remove a hazard and clear its parent's link if the parent is alive
    pub fn remove_hazard(&mut self, handle: Handle) -> Option<Hazard> {
        let hazard = self.hazards.remove(handle)?;
        if let Some(platform) = self.platforms.get_mut(hazard.parent)
            && platform.hazard == Some(handle)
        {
            platform.hazard = None;
        }
        Some(hazard)
    }

    pub fn remove_boost(&mut self, handle: Handle) -> Option<Boost> {
        let boost = self.boosts.remove(handle)?;
        if let Some(platform) = self.platforms.get_mut(boost.parent)
            && platform.boost == Some(handle)
        {
            platform.boost = None;
        }
        Some(boost)
    }

    /// Remove a platform together with everything whose parent is that platform
    ///
    /// Returns the removed platform's kind, or `None` if the handle was stale.
    pub fn remove_platform(&mut self, handle: Handle) -> Option<(PlatformKind, Removed)> {
        if !self.platforms.contains(handle) {
            return None;
        }

        let mut removed = Removed::default();

        let hazards: Vec<Handle> = self
            .hazards
            .iter()
            .filter(|(_, h)| h.parent == handle)
            .map(|(h, _)| h)
            .collect();
        for h in hazards {
            if self.hazards.remove(h).is_some() {
                removed.hazards += 1;
            }
        }

        let boosts: Vec<Handle> = self
            .boosts
            .iter()
            .filter(|(_, b)| b.parent == handle)
            .map(|(h, _)| h)
            .collect();
        for h in boosts {
            if self.boosts.remove(h).is_some() {
                removed.boosts += 1;
            }
        }

        let platform = self.platforms.remove(handle)?;
        removed.platforms = 1;
        Some((platform.kind, removed))
    }

    pub fn count_kind(&self, kind: PlatformKind) -> usize {
        self.platforms.values().filter(|p| p.kind == kind).count()
    }

    /// Everything currently referencing `parent`
    pub fn dependents_of(&self, parent: Handle) -> usize {
        self.hazards.values().filter(|h| h.parent == parent).count()
            + self.boosts.values().filter(|b| b.parent == parent).count()
    }

    pub fn clear(&mut self) {
        self.hazards.clear();
        self.boosts.clear();
        self.platforms.clear();
    }
}
