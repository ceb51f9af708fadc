//! Entity store
//!
//! Projectiles and adversaries live in plain vectors. Removal during a tick
//! is mark-and-sweep: collision rules clear `alive`, later rules skip dead
//! entries, and [`EntityStore::sweep`] compacts the vectors and releases the
//! visuals before the tick returns.

use super::state::{Adversary, Projectile};
use crate::display::Display;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Live adversaries in spawn order
    pub adversaries: Vec<Adversary>,
}

impl EntityStore {
    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn push_adversary(&mut self, adversary: Adversary) {
        self.adversaries.push(adversary);
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.adversaries.is_empty()
    }

    /// Drop dead entities and release their visuals. Returns how many were removed.
    pub fn sweep(&mut self, display: &mut impl Display) -> usize {
        let before = self.projectiles.len() + self.adversaries.len();
        self.projectiles.retain(|p| {
            if !p.alive {
                display.remove_visual(p.visual);
            }
            p.alive
        });
        self.adversaries.retain(|a| {
            if !a.alive {
                display.remove_visual(a.visual);
            }
            a.alive
        });
        before - self.projectiles.len() - self.adversaries.len()
    }

    /// Remove everything (reset), releasing every visual
    pub fn clear(&mut self, display: &mut impl Display) {
        for p in self.projectiles.drain(..) {
            display.remove_visual(p.visual);
        }
        for a in self.adversaries.drain(..) {
            display.remove_visual(a.visual);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::display::{EntityKind, RecordingDisplay};

    fn store_with(display: &mut RecordingDisplay, projectiles: usize, adversaries: usize) -> EntityStore {
        let mut store = EntityStore::default();
        for id in 0..projectiles as u32 {
            store.push_projectile(Projectile {
                id,
                pos: Vec3::ZERO,
                visual: display.create_visual(EntityKind::Projectile, Vec3::ZERO),
                alive: true,
            });
        }
        for id in 0..adversaries as u32 {
            store.push_adversary(Adversary {
                id,
                pos: Vec3::ZERO,
                orientation: Vec3::ZERO,
                spin: Vec3::ZERO,
                visual: display.create_visual(EntityKind::Adversary, Vec3::ZERO),
                alive: true,
            });
        }
        store
    }

    #[test]
    fn test_sweep_keeps_order_and_releases() {
        let mut display = RecordingDisplay::new();
        let mut store = store_with(&mut display, 3, 3);
        store.projectiles[1].alive = false;
        store.adversaries[0].alive = false;
        store.adversaries[2].alive = false;

        assert_eq!(store.sweep(&mut display), 3);
        let ids: Vec<_> = store.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(store.adversaries.len(), 1);
        assert_eq!(store.adversaries[0].id, 1);
        assert_eq!(display.count(EntityKind::Projectile), 2);
        assert_eq!(display.count(EntityKind::Adversary), 1);
        assert_eq!(display.stale_removals, 0);

        // Nothing dead left
        assert_eq!(store.sweep(&mut display), 0);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut display = RecordingDisplay::new();
        let mut store = store_with(&mut display, 2, 4);
        store.clear(&mut display);
        assert!(store.is_empty());
        assert!(display.visuals.is_empty());
        assert_eq!(display.stale_removals, 0);
    }
}
