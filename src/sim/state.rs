//! Game state and core simulation types
//!
//! One [`GameState`] is one play session. It owns every entity, the timers,
//! the RNG and the counters; reset reuses it in place.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::invincibility::{Guard, Invincibility};
use super::spawn::SpawnScheduler;
use super::store::EntityStore;
use super::timer::TimerQueue;
use crate::display::{Display, EntityKind, VisualHandle};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Life ran out; only reset leaves this phase
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Player {
    /// Gameplay uses x/y; z stays on the player plane
    pub pos: Vec3,
    pub visible: bool,
    pub visual: VisualHandle,
}

impl Player {
    pub fn new(display: &mut impl Display) -> Self {
        let pos = Vec3::ZERO;
        Self {
            pos,
            visible: true,
            visual: display.create_visual(EntityKind::Player, pos),
        }
    }

    /// Set visibility and tell the display
    pub fn set_visible(&mut self, visible: bool, display: &mut impl Display) {
        self.visible = visible;
        display.set_player_visibility(visible);
    }
}

/// A player-fired shot travelling away from the player
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub visual: VisualHandle,
    /// Cleared when consumed or culled; swept at the end of the tick
    pub alive: bool,
}

/// A hostile entity travelling toward the player plane
#[derive(Debug, Clone)]
pub struct Adversary {
    pub id: u32,
    pub pos: Vec3,
    /// Cosmetic Euler angles
    pub orientation: Vec3,
    /// Per-axis orientation change per tick
    pub spin: Vec3,
    pub visual: VisualHandle,
    pub alive: bool,
}

impl Adversary {
    /// Move toward the player and apply spin
    pub fn advance(&mut self, speed: f32) {
        self.pos.z += speed;
        self.orientation += self.spin;
    }
}

/// Readable session state for the driver/HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub life: u8,
    pub game_over: bool,
    pub guard: Guard,
    pub spawn_interval_ms: u32,
    pub player: Vec3,
    pub adversaries: usize,
    pub projectiles: usize,
    pub time_ticks: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Session clock (ms), advanced by the driver
    pub now_ms: f64,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub score: u64,
    pub life: u8,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: EntityStore,
    pub spawner: SpawnScheduler,
    pub invincibility: Invincibility,
    pub timers: TimerQueue,
    pub(crate) rng: Pcg32,
    /// Clock reading of the last accepted shot
    pub(crate) last_shot_ms: Option<f64>,
    next_id: u32,
}

impl GameState {
    /// Start a session: create the player, push the HUD, start spawning
    pub fn new(seed: u64, tuning: Tuning, display: &mut impl Display) -> Self {
        let player = Player::new(display);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            time_ticks: 0,
            score: 0,
            life: tuning.starting_life,
            phase: GamePhase::Playing,
            player,
            entities: EntityStore::default(),
            spawner: SpawnScheduler::new(&tuning),
            invincibility: Invincibility::default(),
            timers: TimerQueue::new(),
            last_shot_ms: None,
            next_id: 1,
            tuning,
        };

        display.set_player_visibility(true);
        display.update_score(state.score);
        display.update_life(state.life);
        state
            .spawner
            .start(&mut state.timers, state.now_ms, &state.tuning);

        log::info!("Session started with seed: {}", seed);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawner.interval_ms()
    }

    /// Put an adversary into the lane
    pub fn add_adversary(&mut self, pos: Vec3, spin: Vec3, display: &mut impl Display) -> u32 {
        let id = self.next_entity_id();
        let visual = display.create_visual(EntityKind::Adversary, pos);
        self.entities.push_adversary(Adversary {
            id,
            pos,
            orientation: Vec3::ZERO,
            spin,
            visual,
            alive: true,
        });
        id
    }

    /// Put a projectile into the lane
    pub fn add_projectile(&mut self, pos: Vec3, display: &mut impl Display) -> u32 {
        let id = self.next_entity_id();
        let visual = display.create_visual(EntityKind::Projectile, pos);
        self.entities.push_projectile(Projectile {
            id,
            pos,
            visual,
            alive: true,
        });
        id
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            life: self.life,
            game_over: self.is_game_over(),
            guard: self.invincibility.guard(),
            spawn_interval_ms: self.spawn_interval_ms(),
            player: self.player.pos,
            adversaries: self.entities.adversaries.len(),
            projectiles: self.entities.projectiles.len(),
            time_ticks: self.time_ticks,
        }
    }
}
