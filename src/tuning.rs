//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults are the values
//! in [`crate::consts`]; a host may override any subset from JSON.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error produced while loading tuning overrides
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// The values parsed but describe an unplayable field
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: Vec2,

    // === Angel ===
    pub angel_start: Vec2,
    pub angel_size: Vec2,
    pub gravity: f32,
    pub lift: f32,
    pub speed_x: f32,
    pub max_fall_speed: f32,

    // === Orb ===
    pub orb_start: Vec2,
    pub orb_radius: f32,
    pub orb_margin: f32,

    // === Obstacle ===
    pub obstacle_start: Vec2,
    pub obstacle_size: Vec2,
    pub obstacle_speed: f32,
    pub obstacle_respawn_spread: f32,
    pub obstacle_restart_offset: f32,

    // === Session ===
    pub max_hits: u32,

    // === Cosmetic ===
    pub bob_amplitude: f32,
    pub bob_frequency_hz: f32,
    pub cloud_count: usize,

    // === Audio ===
    /// Volume applied to every cue (0.0 - 1.0)
    pub cue_volume: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),

            angel_start: Vec2::new(ANGEL_START_X, ANGEL_START_Y),
            angel_size: Vec2::new(ANGEL_WIDTH, ANGEL_HEIGHT),
            gravity: ANGEL_GRAVITY,
            lift: ANGEL_LIFT,
            speed_x: ANGEL_SPEED_X,
            max_fall_speed: ANGEL_MAX_FALL,

            orb_start: Vec2::new(ORB_START_X, ORB_START_Y),
            orb_radius: ORB_RADIUS,
            orb_margin: ORB_MARGIN,

            obstacle_start: Vec2::new(OBSTACLE_START_X, OBSTACLE_START_Y),
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_respawn_spread: OBSTACLE_RESPAWN_SPREAD,
            obstacle_restart_offset: OBSTACLE_RESTART_OFFSET,

            max_hits: MAX_HITS,

            bob_amplitude: BOB_AMPLITUDE,
            bob_frequency_hz: BOB_FREQUENCY_HZ,
            cloud_count: CLOUD_COUNT,

            cue_volume: 0.8,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make placement or clamping meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.playfield.min_element() <= 0.0 {
            return Err(TuningError::Invalid("playfield must be positive"));
        }
        if self.angel_size.min_element() <= 0.0 || self.obstacle_size.min_element() <= 0.0 {
            return Err(TuningError::Invalid("entity sizes must be positive"));
        }
        if self.angel_size.cmpgt(self.playfield).any()
            || self.obstacle_size.cmpgt(self.playfield).any()
        {
            return Err(TuningError::Invalid("entities must fit inside the playfield"));
        }
        if self.orb_radius <= 0.0 {
            return Err(TuningError::Invalid("orb radius must be positive"));
        }
        if self.orb_margin < 0.0 || self.orb_margin * 2.0 >= self.playfield.min_element() {
            return Err(TuningError::Invalid("orb margin must be less than half the playfield"));
        }
        if self.obstacle_speed <= 0.0 {
            return Err(TuningError::Invalid("obstacle must move leftward"));
        }
        if self.obstacle_respawn_spread < 0.0 || self.obstacle_restart_offset < 0.0 {
            return Err(TuningError::Invalid("obstacle respawn offsets must be non-negative"));
        }
        if self.max_fall_speed <= 0.0 {
            return Err(TuningError::Invalid("max fall speed must be positive"));
        }
        if self.max_hits == 0 {
            return Err(TuningError::Invalid("max_hits must be at least 1"));
        }
        Ok(())
    }

    /// Largest x the angel may occupy
    pub fn angel_max_x(&self) -> f32 {
        self.playfield.x - self.angel_size.x
    }

    /// Largest y the angel may occupy
    pub fn angel_max_y(&self) -> f32 {
        self.playfield.y - self.angel_size.y
    }

    /// Parse overrides, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
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
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_hits": 5, "obstacle_speed": 3.5 }"#).unwrap();
        assert_eq!(tuning.max_hits, 5);
        assert!((tuning.obstacle_speed - 3.5).abs() < f32::EPSILON);
        assert_eq!(tuning.playfield, Vec2::new(900.0, 700.0));
        assert_eq!(tuning.angel_start, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "max_hits": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "orb_margin": 400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "angel_size": [1000.0, 50.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Tuning::from_json_or_default("not json"), Tuning::default());
    }

    #[test]
    fn test_angel_bounds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.angel_max_x(), 850.0);
        assert_eq!(tuning.angel_max_y(), 650.0);
    }
}
