//! Angel Flight - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, physics, collisions, session state)
//! - `feedback`: Audio cue coordination driven by simulation events
//! - `renderer`: Draw command generation and the Canvas 2D backend
//! - `driver`: One-frame-per-refresh loop driver
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod feedback;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{FrameOutcome, Game};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`].
pub mod consts {
    /// Logical playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 900.0;
    pub const PLAYFIELD_HEIGHT: f32 = 700.0;

    /// Angel defaults
    pub const ANGEL_START_X: f32 = 100.0;
    pub const ANGEL_START_Y: f32 = 100.0;
    pub const ANGEL_WIDTH: f32 = 50.0;
    pub const ANGEL_HEIGHT: f32 = 50.0;
    /// Added to vertical velocity every frame (units/frame²)
    pub const ANGEL_GRAVITY: f32 = 0.1;
    /// Vertical velocity set while flapping (negative = up)
    pub const ANGEL_LIFT: f32 = -6.0;
    pub const ANGEL_SPEED_X: f32 = 4.0;
    pub const ANGEL_MAX_FALL: f32 = 4.0;

    /// Orb defaults
    pub const ORB_RADIUS: f32 = 12.0;
    /// Respawned orbs stay this far from every edge
    pub const ORB_MARGIN: f32 = 20.0;
    pub const ORB_START_X: f32 = 600.0;
    pub const ORB_START_Y: f32 = 200.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_SPEED: f32 = 2.0;
    pub const OBSTACLE_START_X: f32 = 800.0;
    pub const OBSTACLE_START_Y: f32 = 150.0;
    /// Respawn x is `width + rand[0, OBSTACLE_RESPAWN_SPREAD)`
    pub const OBSTACLE_RESPAWN_SPREAD: f32 = 200.0;
    /// Restart x is `width + OBSTACLE_RESTART_OFFSET`
    pub const OBSTACLE_RESTART_OFFSET: f32 = 100.0;

    /// Obstacle hits allowed before game over
    pub const MAX_HITS: u32 = 3;

    /// Cosmetic sprite bobbing
    pub const BOB_AMPLITUDE: f32 = 4.0;
    pub const BOB_FREQUENCY_HZ: f32 = 1.5;

    /// Decorative clouds
    pub const CLOUD_COUNT: usize = 3;
}

/// Uniform sample from `[start, start + span)`, collapsing to `start` when
/// the span is empty or negative.
#[inline]
pub fn sample_span<R: rand::Rng>(rng: &mut R, start: f32, span: f32) -> f32 {
    if span > 0.0 {
        rng.random_range(start..start + span)
    } else {
        start
    }
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(top_left: Vec2, size: Vec2) -> Vec2 {
    top_left + size * 0.5
}
