//! Rendering module
//!
//! `scene` turns the session state into an ordered list of draw commands;
//! `canvas` replays that list on a browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use commands::{Color, DrawCommand, TextAlign};
pub use scene::{bob_offset, game_over_overlay, playing_frame};
