//! Display collaborator interface
//!
//! The simulation never touches meshes or the DOM. It calls this trait to
//! register and release visuals and to push HUD values; the browser driver
//! implements it on top of the page's scene and HUD elements.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What a visual represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Adversary,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Projectile => "projectile",
            EntityKind::Adversary => "adversary",
        }
    }
}

/// Opaque handle to a visual owned by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// Rendering/HUD operations consumed by the simulation
pub trait Display {
    /// Register a visual for a new entity
    fn create_visual(&mut self, kind: EntityKind, position: Vec3) -> VisualHandle;
    /// Release a visual; the handle is never used again
    fn remove_visual(&mut self, handle: VisualHandle);
    /// Follow an entity's motion (position plus Euler orientation)
    fn place_visual(&mut self, _handle: VisualHandle, _position: Vec3, _orientation: Vec3) {}
    fn set_player_visibility(&mut self, visible: bool);
    fn update_score(&mut self, score: u64);
    fn update_life(&mut self, life: u8);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}

/// A call made against [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Create(EntityKind, VisualHandle),
    Remove(VisualHandle),
    PlayerVisible(bool),
    Score(u64),
    Life(u8),
    ShowGameOver(u64),
    HideGameOver,
}

/// In-memory display for tests and the headless harness
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    /// Live visuals by handle
    pub visuals: HashMap<VisualHandle, EntityKind>,
    /// Last known positions of live visuals
    pub positions: HashMap<VisualHandle, Vec3>,
    pub player_visible: bool,
    pub score: u64,
    pub life: u8,
    /// Final score while the game-over overlay is up
    pub game_over: Option<u64>,
    /// Every call except `place_visual`, in order
    pub calls: Vec<DisplayCall>,
    /// Handles passed to `remove_visual` that were not live
    pub stale_removals: u32,
    next_handle: u32,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            player_visible: true,
            ..Default::default()
        }
    }

    /// Number of live visuals of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.visuals.values().filter(|k| **k == kind).count()
    }

    /// Number of visibility changes recorded
    pub fn visibility_changes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DisplayCall::PlayerVisible(_)))
            .count()
    }
}

impl Display for RecordingDisplay {
    fn create_visual(&mut self, kind: EntityKind, position: Vec3) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.visuals.insert(handle, kind);
        self.positions.insert(handle, position);
        self.calls.push(DisplayCall::Create(kind, handle));
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_none() {
            self.stale_removals += 1;
        }
        self.positions.remove(&handle);
        self.calls.push(DisplayCall::Remove(handle));
    }

    fn place_visual(&mut self, handle: VisualHandle, position: Vec3, _orientation: Vec3) {
        if let Some(pos) = self.positions.get_mut(&handle) {
            *pos = position;
        }
    }

    fn set_player_visibility(&mut self, visible: bool) {
        self.player_visible = visible;
        self.calls.push(DisplayCall::PlayerVisible(visible));
    }

    fn update_score(&mut self, score: u64) {
        self.score = score;
        self.calls.push(DisplayCall::Score(score));
    }

    fn update_life(&mut self, life: u8) {
        self.life = life;
        self.calls.push(DisplayCall::Life(life));
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.game_over = Some(final_score);
        self.calls.push(DisplayCall::ShowGameOver(final_score));
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
        self.calls.push(DisplayCall::HideGameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut display = RecordingDisplay::new();
        let a = display.create_visual(EntityKind::Adversary, Vec3::ZERO);
        let b = display.create_visual(EntityKind::Adversary, Vec3::ZERO);
        assert_ne!(a, b);
        assert_eq!(display.count(EntityKind::Adversary), 2);
    }

    #[test]
    fn test_double_remove_is_counted() {
        let mut display = RecordingDisplay::new();
        let a = display.create_visual(EntityKind::Projectile, Vec3::ZERO);
        display.remove_visual(a);
        display.remove_visual(a);
        assert_eq!(display.stale_removals, 1);
        assert_eq!(display.count(EntityKind::Projectile), 0);
    }
}
