//! Proximity collision
//!
//! No shapes, no response: two entities touch when their centres are closer
//! than the hit radius.

use glam::Vec3;

use super::state::Projectile;

/// True if `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within_reach(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Index of the first live projectile within `radius` of `target`, in store order
pub fn first_projectile_hit(projectiles: &[Projectile], target: Vec3, radius: f32) -> Option<usize> {
    projectiles
        .iter()
        .position(|p| p.alive && within_reach(p.pos, target, radius))
}
