//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock input
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Rect, angel_reaches_orb, circles_overlap, rects_overlap};
pub use input::{Control, InputAggregator, InputEvent, Key, Source, TickInput, TouchTarget};
pub use state::{Angel, Cloud, GameEvent, GamePhase, GameState, Obstacle, Orb, RespawnCause};
pub use tick::tick;
