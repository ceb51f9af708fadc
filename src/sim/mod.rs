//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One session object owns all state
//! - Timers are driven by the session clock, never by the platform
//! - Seeded RNG only
//! - Display side effects go through the `Display` trait

pub mod collision;
pub mod invincibility;
mod session;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;
pub mod timer;

pub use collision::{first_projectile_hit, within_reach};
pub use invincibility::{Guard, Invincibility};
pub use spawn::{AdversaryRoll, SpawnScheduler, next_interval, roll_adversary};
pub use state::{Adversary, GamePhase, GameState, Player, Projectile, Snapshot};
pub use store::EntityStore;
pub use tick::{TickInput, tick};
pub use timer::{Fired, TimerHandle, TimerKind, TimerQueue};
