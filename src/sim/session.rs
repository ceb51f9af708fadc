//! Session state machine: Playing <-> GameOver
//!
//! Timer dispatch, rate-limited firing, scoring, player damage, game over
//! and reset. All of it runs from the driver's single thread, between ticks.

use glam::Vec3;

use super::spawn::roll_adversary;
use super::state::{GamePhase, GameState};
use super::timer::{Fired, TimerKind};
use crate::display::Display;

impl GameState {
    /// Move the session clock forward to `now_ms`, firing every timer that
    /// comes due on the way. The clock never runs backwards.
    pub fn advance_clock(&mut self, now_ms: f64, display: &mut impl Display) {
        if now_ms < self.now_ms {
            return;
        }
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.now_ms = fired.due_ms;
            self.dispatch(fired, display);
        }
        self.now_ms = now_ms;
    }

    fn dispatch(&mut self, fired: Fired, display: &mut impl Display) {
        match fired.kind {
            TimerKind::Spawn => {
                if self.spawner.is_spawn_timer(fired.handle) && !self.is_game_over() {
                    self.spawn_adversary(display);
                }
            }
            TimerKind::Escalate => {
                if self.spawner.is_escalation_timer(fired.handle) {
                    self.spawner
                        .escalate(&mut self.timers, self.now_ms, &self.tuning);
                }
            }
            TimerKind::Blink | TimerKind::InvincibilityEnd => {
                self.invincibility
                    .on_timer(fired, &mut self.timers, &mut self.player, display);
            }
        }
    }

    /// Create one adversary at a random entry point
    pub fn spawn_adversary(&mut self, display: &mut impl Display) -> u32 {
        let roll = roll_adversary(&mut self.rng, &self.tuning);
        let id = self.add_adversary(roll.pos, roll.spin, display);
        log::debug!("Spawned adversary {} at ({:.2}, {:.2})", id, roll.pos.x, roll.pos.y);
        id
    }

    /// Fire a projectile from the player. Rate-limited by the fire cooldown;
    /// returns false if the shot was refused.
    pub fn fire(&mut self, display: &mut impl Display) -> bool {
        if self.is_game_over() {
            return false;
        }
        if let Some(last) = self.last_shot_ms {
            if self.now_ms - last < self.tuning.fire_cooldown_ms {
                return false;
            }
        }
        let muzzle = self.player.pos + Vec3::new(0.0, self.tuning.muzzle_offset_y, 0.0);
        self.add_projectile(muzzle, display);
        self.last_shot_ms = Some(self.now_ms);
        true
    }

    /// Credit one kill
    pub(crate) fn award_kill(&mut self, display: &mut impl Display) {
        self.score += self.tuning.kill_reward;
        display.update_score(self.score);
    }

    /// Apply one hit to the player. Returns true if it ended the game.
    pub(crate) fn damage_player(&mut self, display: &mut impl Display) -> bool {
        self.life = self.life.saturating_sub(1);
        display.update_life(self.life);
        log::info!("Player hit, {} lives left", self.life);

        if self.life == 0 {
            self.enter_game_over(display);
            return true;
        }
        self.invincibility
            .begin(&mut self.timers, self.now_ms, &self.tuning);
        false
    }

    /// Playing -> GameOver. Entered at most once per session.
    fn enter_game_over(&mut self, display: &mut impl Display) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.spawner.stop(&mut self.timers);
        self.invincibility
            .cancel(&mut self.timers, &mut self.player, display);
        display.show_game_over(self.score);
        log::info!("Game over, final score: {}", self.score);
    }

    /// Start over in place: counters, entities, timers and HUD back to their
    /// initial values. Valid from either phase.
    pub fn reset(&mut self, display: &mut impl Display) {
        self.score = 0;
        self.life = self.tuning.starting_life;
        self.phase = GamePhase::Playing;

        self.invincibility
            .cancel(&mut self.timers, &mut self.player, display);
        display.update_score(self.score);
        display.update_life(self.life);

        self.entities.clear(display);
        self.player.pos = Vec3::ZERO;
        display.place_visual(self.player.visual, self.player.pos, Vec3::ZERO);

        display.hide_game_over();
        self.spawner
            .reset(&mut self.timers, self.now_ms, &self.tuning);

        log::info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{EntityKind, RecordingDisplay};
    use crate::tuning::Tuning;

    fn session() -> (GameState, RecordingDisplay) {
        let mut display = RecordingDisplay::new();
        let state = GameState::new(1234, Tuning::default(), &mut display);
        (state, display)
    }

    #[test]
    fn test_spawns_follow_interval() {
        let (mut state, mut display) = session();
        state.advance_clock(1999.0, &mut display);
        assert_eq!(state.entities.adversaries.len(), 0);
        state.advance_clock(2000.0, &mut display);
        assert_eq!(state.entities.adversaries.len(), 1);
        state.advance_clock(9999.0, &mut display);
        assert_eq!(state.entities.adversaries.len(), 4);
        assert_eq!(display.count(EntityKind::Adversary), 4);
    }

    #[test]
    fn test_escalation_over_time() {
        let (mut state, mut display) = session();
        state.advance_clock(10_000.0, &mut display);
        assert_eq!(state.spawn_interval_ms(), 1000);
        state.advance_clock(40_000.0, &mut display);
        assert_eq!(state.spawn_interval_ms(), 200);
        state.advance_clock(60_000.0, &mut display);
        assert_eq!(state.spawn_interval_ms(), 200);
    }

    #[test]
    fn test_clock_never_rewinds() {
        let (mut state, mut display) = session();
        state.advance_clock(500.0, &mut display);
        state.advance_clock(100.0, &mut display);
        assert_eq!(state.now_ms, 500.0);
    }

    #[test]
    fn test_fire_rate_limit() {
        let (mut state, mut display) = session();
        assert!(state.fire(&mut display));
        state.advance_clock(299.0, &mut display);
        assert!(!state.fire(&mut display));
        state.advance_clock(300.0, &mut display);
        assert!(state.fire(&mut display));
        assert_eq!(state.entities.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_leaves_muzzle() {
        let (mut state, mut display) = session();
        state.player.pos = Vec3::new(2.0, 1.0, 0.0);
        state.fire(&mut display);
        assert_eq!(state.entities.projectiles[0].pos, Vec3::new(2.0, 1.25, 0.0));
    }

    #[test]
    fn test_game_over_cancels_all_timers() {
        let (mut state, mut display) = session();
        state.life = 2;
        assert!(!state.damage_player(&mut display));
        assert!(state.is_invincible());
        state.advance_clock(100.0, &mut display);
        assert!(!state.player.visible);

        // Second hit during the window is fatal when applied directly
        assert!(state.damage_player(&mut display));
        assert!(state.is_game_over());
        assert!(state.timers.is_empty());
        assert!(state.player.visible);
        assert!(display.player_visible);
        assert_eq!(display.game_over, Some(0));

        // No spawns or blinks after game over
        state.advance_clock(60_000.0, &mut display);
        assert!(state.entities.adversaries.is_empty());
        assert!(state.player.visible);
        assert!(!state.fire(&mut display));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let (mut state, mut display) = session();
        state.advance_clock(25_000.0, &mut display);
        state.fire(&mut display);
        state.score = 700;
        state.player.pos = Vec3::new(3.0, 4.0, 0.0);
        state.life = 1;
        state.damage_player(&mut display);
        assert!(state.is_game_over());

        state.reset(&mut display);
        assert_eq!(state.score, 0);
        assert_eq!(state.life, 3);
        assert!(!state.is_game_over());
        assert!(!state.is_invincible());
        assert_eq!(state.spawn_interval_ms(), 2000);
        assert!(state.entities.is_empty());
        assert_eq!(state.player.pos, Vec3::ZERO);
        assert_eq!(state.timers.len(), 2);

        assert_eq!(display.count(EntityKind::Adversary), 0);
        assert_eq!(display.count(EntityKind::Projectile), 0);
        assert_eq!(display.count(EntityKind::Player), 1);
        assert_eq!(display.game_over, None);
        assert_eq!(display.score, 0);
        assert_eq!(display.life, 3);

        // Spawning resumes one initial interval after the reset
        let reset_at = state.now_ms;
        state.advance_clock(reset_at + 2000.0, &mut display);
        assert_eq!(state.entities.adversaries.len(), 1);
    }

    #[test]
    fn test_reset_while_playing_cancels_invincibility() {
        let (mut state, mut display) = session();
        state.damage_player(&mut display);
        state.advance_clock(100.0, &mut display);
        assert!(!state.player.visible);

        state.reset(&mut display);
        assert!(!state.is_invincible());
        assert!(state.player.visible);
        // Only the spawn and escalation timers remain
        assert_eq!(state.timers.len(), 2);
    }
}
