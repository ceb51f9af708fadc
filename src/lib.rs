//! Tomato Shooter - a lane arcade shooter for the browser
//!
//! Core modules:
//! - `sim`: Game loop, collision, spawn scheduling and the session state machine
//! - `display`: The narrow interface the simulation uses to talk to the renderer/HUD
//! - `input`: Held-key tracking for the per-frame input snapshot
//! - `tuning`: Data-driven game balance

pub mod display;
pub mod input;
pub mod sim;
pub mod tuning;

pub use display::{Display, EntityKind, RecordingDisplay, VisualHandle};
pub use input::{HeldKeys, Key};
pub use tuning::{Skin, Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lives at the start of a session
    pub const STARTING_LIFE: u8 = 3;
    /// Score awarded per adversary destroyed by a projectile
    pub const KILL_REWARD: u64 = 100;

    /// Player displacement per tick per held direction key
    pub const PLAYER_STEP: f32 = 0.1;
    /// Horizontal play bounds
    pub const PLAYER_MIN_X: f32 = -5.0;
    pub const PLAYER_MAX_X: f32 = 5.0;
    /// Vertical play bounds
    pub const PLAYER_MIN_Y: f32 = 0.0;
    pub const PLAYER_MAX_Y: f32 = 5.0;

    /// Projectile depth change per tick (negative = away from the player)
    pub const PROJECTILE_SPEED: f32 = 0.5;
    /// Projectiles beyond this depth are culled
    pub const PROJECTILE_CULL_Z: f32 = -50.0;
    /// Projectiles leave slightly above the player's centre
    pub const MUZZLE_OFFSET_Y: f32 = 0.25;
    /// Minimum time between shots (ms)
    pub const FIRE_COOLDOWN_MS: f64 = 300.0;

    /// Adversary depth change per tick (positive = toward the player)
    pub const ADVERSARY_SPEED: f32 = 0.2;
    /// Depth at which adversaries enter the lane
    pub const ADVERSARY_ENTRY_Z: f32 = -30.0;
    /// Adversaries past this depth left the play volume
    pub const ADVERSARY_CULL_Z: f32 = 10.0;
    /// Per-axis cosmetic spin is drawn from [-SPIN_RANGE, SPIN_RANGE]
    pub const SPIN_RANGE: f32 = 0.025;

    /// Proximity below which two entities collide
    pub const HIT_RADIUS: f32 = 1.0;

    /// Spawn timer period at session start (ms)
    pub const SPAWN_INTERVAL_INITIAL_MS: u32 = 2000;
    /// Spawn timer period never drops below this (ms)
    pub const SPAWN_INTERVAL_FLOOR_MS: u32 = 200;
    /// Spawn interval halves this often (ms)
    pub const ESCALATION_PERIOD_MS: u32 = 10_000;

    /// Post-hit grace period (ms)
    pub const INVINCIBILITY_MS: u32 = 1000;
    /// Player visibility toggles at this period while invincible (ms)
    pub const BLINK_PERIOD_MS: u32 = 100;

    /// Longest frame delta the browser driver feeds the clock (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Clamp a point to the axis-aligned rectangle `[min, max]` in x/y, leaving z untouched
#[inline]
pub fn clamp_xy(pos: Vec3, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Vec3 {
    Vec3::new(pos.x.clamp(min_x, max_x), pos.y.clamp(min_y, max_y), pos.z)
}

