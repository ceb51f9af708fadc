//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the compiled defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Visual theme handed to the display collaborator's visual factory.
/// Gameplay is identical for every skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    /// Boxes and spheres
    #[default]
    Plain,
    /// Bottle player, tomato adversaries
    Produce,
}

impl Skin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Plain => "plain",
            Skin::Produce => "produce",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" => Some(Skin::Plain),
            "produce" | "tomato" | "bottle" => Some(Skin::Produce),
            _ => None,
        }
    }
}

/// Problems found while loading tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub starting_life: u8,
    pub kill_reward: u64,

    pub player_step: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,

    pub projectile_speed: f32,
    pub projectile_cull_z: f32,
    pub muzzle_offset_y: f32,
    pub fire_cooldown_ms: f64,

    pub adversary_speed: f32,
    pub adversary_entry_z: f32,
    pub adversary_cull_z: f32,
    pub spin_range: f32,

    pub hit_radius: f32,

    pub spawn_interval_initial_ms: u32,
    pub spawn_interval_floor_ms: u32,
    pub escalation_period_ms: u32,

    pub invincibility_ms: u32,
    pub blink_period_ms: u32,

    pub skin: Skin,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_life: STARTING_LIFE,
            kill_reward: KILL_REWARD,

            player_step: PLAYER_STEP,
            min_x: PLAYER_MIN_X,
            max_x: PLAYER_MAX_X,
            min_y: PLAYER_MIN_Y,
            max_y: PLAYER_MAX_Y,

            projectile_speed: PROJECTILE_SPEED,
            projectile_cull_z: PROJECTILE_CULL_Z,
            muzzle_offset_y: MUZZLE_OFFSET_Y,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,

            adversary_speed: ADVERSARY_SPEED,
            adversary_entry_z: ADVERSARY_ENTRY_Z,
            adversary_cull_z: ADVERSARY_CULL_Z,
            spin_range: SPIN_RANGE,

            hit_radius: HIT_RADIUS,

            spawn_interval_initial_ms: SPAWN_INTERVAL_INITIAL_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            escalation_period_ms: ESCALATION_PERIOD_MS,

            invincibility_ms: INVINCIBILITY_MS,
            blink_period_ms: BLINK_PERIOD_MS,

            skin: Skin::Plain,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse tuning from JSON, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides (skin: {})", tuning.skin.as_str());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                Self::default()
            }
        }
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.starting_life == 0 {
            return invalid("starting_life", "must be at least 1");
        }
        if self.min_x > self.max_x {
            return invalid("min_x", "must not exceed max_x");
        }
        if self.min_y > self.max_y {
            return invalid("min_y", "must not exceed max_y");
        }
        if self.hit_radius.is_nan() || self.hit_radius <= 0.0 {
            return invalid("hit_radius", "must be positive");
        }
        if self.spin_range < 0.0 {
            return invalid("spin_range", "must not be negative");
        }
        if self.fire_cooldown_ms < 0.0 {
            return invalid("fire_cooldown_ms", "must not be negative");
        }
        if self.spawn_interval_floor_ms == 0 {
            return invalid("spawn_interval_floor_ms", "must be positive");
        }
        if self.spawn_interval_initial_ms < self.spawn_interval_floor_ms {
            return invalid("spawn_interval_initial_ms", "must not be below the floor");
        }
        if self.escalation_period_ms == 0 {
            return invalid("escalation_period_ms", "must be positive");
        }
        if self.blink_period_ms == 0 {
            return invalid("blink_period_ms", "must be positive");
        }
        if self.invincibility_ms == 0 {
            return invalid("invincibility_ms", "must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_life": 5, "skin": "produce" }"#).unwrap();
        assert_eq!(tuning.starting_life, 5);
        assert_eq!(tuning.skin, Skin::Produce);
        assert_eq!(tuning.spawn_interval_initial_ms, SPAWN_INTERVAL_INITIAL_MS);
        assert_eq!(tuning.kill_reward, KILL_REWARD);
    }

    #[test]
    fn test_rejects_floor_above_initial() {
        let err = Tuning::from_json(
            r#"{ "spawn_interval_initial_ms": 100, "spawn_interval_floor_ms": 200 }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_interval_initial_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_life() {
        let err = Tuning::from_json(r#"{ "starting_life": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "starting_life", .. }));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(Tuning::from_json_or_default("{ nope"), Tuning::default());
    }

    #[test]
    fn test_skin_names() {
        assert_eq!(Skin::from_str("Tomato"), Some(Skin::Produce));
        assert_eq!(Skin::from_str("plain"), Some(Skin::Plain));
        assert_eq!(Skin::from_str("neon"), None);
        assert_eq!(Skin::Produce.as_str(), "produce");
    }
}
