//! Adversary spawn scheduling
//!
//! Two timers: a spawn interval that creates one adversary per firing, and
//! an escalation interval that halves the spawn period down to a floor.
//! Escalation replaces the spawn timer rather than adding a second one.

use glam::Vec3;
use rand::Rng;

use super::timer::{TimerHandle, TimerKind, TimerQueue};
use crate::tuning::Tuning;

/// Next spawn period after one escalation step
#[inline]
pub fn next_interval(current_ms: u32, floor_ms: u32) -> u32 {
    (current_ms / 2).max(floor_ms).min(current_ms)
}

/// Where and how a new adversary enters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdversaryRoll {
    pub pos: Vec3,
    pub spin: Vec3,
}

/// Random entry point and cosmetic spin for a new adversary
pub fn roll_adversary(rng: &mut impl Rng, tuning: &Tuning) -> AdversaryRoll {
    let x = rng.random_range(tuning.min_x..=tuning.max_x);
    let y = rng.random_range(tuning.min_y..=tuning.max_y);
    let s = tuning.spin_range;
    let spin = Vec3::new(
        rng.random_range(-s..=s),
        rng.random_range(-s..=s),
        rng.random_range(-s..=s),
    );
    AdversaryRoll {
        pos: Vec3::new(x, y, tuning.adversary_entry_z),
        spin,
    }
}

/// Owner of the spawn and escalation timers
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    interval_ms: u32,
    spawn_timer: Option<TimerHandle>,
    escalation_timer: Option<TimerHandle>,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval_ms: tuning.spawn_interval_initial_ms,
            spawn_timer: None,
            escalation_timer: None,
        }
    }

    /// Current spawn period (ms)
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// True if `handle` is the live spawn timer
    pub fn is_spawn_timer(&self, handle: TimerHandle) -> bool {
        self.spawn_timer == Some(handle)
    }

    /// True if `handle` is the live escalation timer
    pub fn is_escalation_timer(&self, handle: TimerHandle) -> bool {
        self.escalation_timer == Some(handle)
    }

    /// Start both timers at the current interval, replacing any running ones
    pub fn start(&mut self, timers: &mut TimerQueue, now_ms: f64, tuning: &Tuning) {
        self.stop(timers);
        self.spawn_timer =
            Some(timers.set_interval(TimerKind::Spawn, now_ms, self.interval_ms as f64));
        self.escalation_timer = Some(timers.set_interval(
            TimerKind::Escalate,
            now_ms,
            tuning.escalation_period_ms as f64,
        ));
    }

    /// Cancel both timers
    pub fn stop(&mut self, timers: &mut TimerQueue) {
        timers.cancel_slot(&mut self.spawn_timer);
        timers.cancel_slot(&mut self.escalation_timer);
    }

    /// Back to the initial interval and running
    pub fn reset(&mut self, timers: &mut TimerQueue, now_ms: f64, tuning: &Tuning) {
        self.stop(timers);
        self.interval_ms = tuning.spawn_interval_initial_ms;
        self.start(timers, now_ms, tuning);
    }

    /// Halve the interval (floored) and restart the spawn timer at it
    pub fn escalate(&mut self, timers: &mut TimerQueue, now_ms: f64, tuning: &Tuning) -> u32 {
        self.interval_ms = next_interval(self.interval_ms, tuning.spawn_interval_floor_ms);
        if self.is_running() {
            timers.cancel_slot(&mut self.spawn_timer);
            self.spawn_timer =
                Some(timers.set_interval(TimerKind::Spawn, now_ms, self.interval_ms as f64));
        }
        log::debug!("Spawn interval now {} ms", self.interval_ms);
        self.interval_ms
    }
}
