//! Per-frame simulation tick
//!
//! Movement resolves before collisions. For each adversary the player check
//! runs before the projectile check, and anything consumed earlier in the
//! tick is skipped by later rules.

use glam::Vec3;

use super::collision::{first_projectile_hit, within_reach};
use super::state::GameState;
use crate::clamp_xy;
use crate::display::Display;

/// Input held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held (space); rate-limited like any other fire request
    pub fire: bool,
}

/// Advance the game state by one frame. Does nothing once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput, display: &mut impl Display) {
    if state.is_game_over() {
        return;
    }
    state.time_ticks += 1;

    move_player(state, input);
    if input.fire {
        state.fire(display);
    }
    advance_projectiles(state);
    resolve_adversaries(state, display);

    // Removals marked above take effect before the tick returns, game over or not
    state.entities.sweep(display);
    sync_visuals(state, display);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let t = &state.tuning;
    let step = t.player_step;
    let mut pos = state.player.pos;
    if input.left {
        pos.x -= step;
    }
    if input.right {
        pos.x += step;
    }
    if input.up {
        pos.y += step;
    }
    if input.down {
        pos.y -= step;
    }
    state.player.pos = clamp_xy(pos, t.min_x, t.max_x, t.min_y, t.max_y);
}

fn advance_projectiles(state: &mut GameState) {
    let speed = state.tuning.projectile_speed;
    let cull_z = state.tuning.projectile_cull_z;
    for projectile in state.entities.projectiles.iter_mut().filter(|p| p.alive) {
        projectile.pos.z -= speed;
        if projectile.pos.z < cull_z {
            projectile.alive = false;
        }
    }
}

/// Move every adversary, then resolve its player hit, projectile hit and
/// out-of-bounds exit, newest first.
fn resolve_adversaries(state: &mut GameState, display: &mut impl Display) {
    let speed = state.tuning.adversary_speed;
    let radius = state.tuning.hit_radius;
    let cull_z = state.tuning.adversary_cull_z;

    for i in (0..state.entities.adversaries.len()).rev() {
        if !state.entities.adversaries[i].alive {
            continue;
        }
        state.entities.adversaries[i].advance(speed);
        let pos = state.entities.adversaries[i].pos;

        if !state.is_invincible() && within_reach(state.player.pos, pos, radius) {
            state.entities.adversaries[i].alive = false;
            if state.damage_player(display) {
                // Game over: nothing else moves this tick
                return;
            }
            continue;
        }

        if let Some(j) = first_projectile_hit(&state.entities.projectiles, pos, radius) {
            state.entities.projectiles[j].alive = false;
            state.entities.adversaries[i].alive = false;
            state.award_kill(display);
            continue;
        }

        if pos.z > cull_z {
            state.entities.adversaries[i].alive = false;
        }
    }
}

fn sync_visuals(state: &GameState, display: &mut impl Display) {
    display.place_visual(state.player.visual, state.player.pos, Vec3::ZERO);
    for p in &state.entities.projectiles {
        display.place_visual(p.visual, p.pos, Vec3::ZERO);
    }
    for a in &state.entities.adversaries {
        display.place_visual(a.visual, a.pos, a.orientation);
    }
}
