//! Post-hit invincibility window
//!
//! Normal -> Invincible on a player hit. While invincible the player blinks
//! and ignores adversaries; when the window ends the blink stops and the
//! player is always left visible.

use serde::{Deserialize, Serialize};

use super::state::Player;
use super::timer::{Fired, TimerHandle, TimerKind, TimerQueue};
use crate::display::Display;
use crate::tuning::Tuning;

/// Whether adversary contact currently costs a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guard {
    Normal,
    Invincible,
}

/// Invincibility controller. Holds the blink and end timers while active.
#[derive(Debug, Clone, Default)]
pub struct Invincibility {
    blink: Option<TimerHandle>,
    end: Option<TimerHandle>,
}

impl Invincibility {
    pub fn is_active(&self) -> bool {
        self.end.is_some()
    }

    pub fn guard(&self) -> Guard {
        if self.is_active() {
            Guard::Invincible
        } else {
            Guard::Normal
        }
    }

    /// Enter the invincible state. A no-op returning false if already invincible;
    /// the running window is neither extended nor restarted.
    pub fn begin(&mut self, timers: &mut TimerQueue, now_ms: f64, tuning: &Tuning) -> bool {
        if self.is_active() {
            return false;
        }
        self.blink = Some(timers.set_interval(
            TimerKind::Blink,
            now_ms,
            tuning.blink_period_ms as f64,
        ));
        self.end = Some(timers.set_timeout(
            TimerKind::InvincibilityEnd,
            now_ms,
            tuning.invincibility_ms as f64,
        ));
        true
    }

    /// Handle a blink or end firing. Firings for handles this controller no
    /// longer holds are ignored.
    pub fn on_timer(
        &mut self,
        fired: Fired,
        timers: &mut TimerQueue,
        player: &mut Player,
        display: &mut impl Display,
    ) {
        match fired.kind {
            TimerKind::Blink if self.blink == Some(fired.handle) => {
                player.set_visible(!player.visible, display);
            }
            TimerKind::InvincibilityEnd if self.end == Some(fired.handle) => {
                self.end = None;
                timers.cancel_slot(&mut self.blink);
                player.set_visible(true, display);
            }
            _ => {}
        }
    }

    /// Force back to Normal (reset, game over): cancel timers, show the player
    pub fn cancel(&mut self, timers: &mut TimerQueue, player: &mut Player, display: &mut impl Display) {
        timers.cancel_slot(&mut self.blink);
        timers.cancel_slot(&mut self.end);
        player.set_visible(true, display);
    }
}
