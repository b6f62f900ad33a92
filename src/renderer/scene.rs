//! Frame composition
//!
//! Draw order while playing: background, clouds, orb, HUD, obstacle, angel.
//! On game over an overlay is appended on top of the final frame.

use std::f32::consts::TAU;

use glam::Vec2;

use super::commands::{Color, DrawCommand, TextAlign};
use crate::sim::{Cloud, GameState};

/// Vertical sprite offset for the idle bob. Cosmetic only: the logical
/// position never moves.
pub fn bob_offset(time_secs: f64, amplitude: f32, frequency_hz: f32) -> f32 {
    let phase = (time_secs * f64::from(frequency_hz)).fract() as f32;
    amplitude * (phase * TAU).sin()
}

/// Advance the clouds one frame and build the full playing frame
pub fn playing_frame(state: &GameState, clouds: &mut [Cloud], time_secs: f64) -> Vec<DrawCommand> {
    let tuning = &state.tuning;
    let field = tuning.playfield;
    let mut frame = Vec::with_capacity(16 + clouds.len() * 3);

    frame.push(DrawCommand::Clear { size: field });
    frame.push(DrawCommand::FillGradient {
        pos: Vec2::ZERO,
        size: field,
        top: Color::SKY_TOP,
        bottom: Color::SKY_BOTTOM,
    });

    for cloud in clouds.iter_mut() {
        cloud.drift(field.x);
        push_cloud(&mut frame, cloud);
    }

    let orb = &state.orb;
    frame.push(DrawCommand::Glow {
        center: orb.center,
        inner: orb.radius * 0.5,
        outer: orb.radius * 2.5,
        color: Color::ORB_GLOW,
    });
    frame.push(DrawCommand::FillCircle {
        center: orb.center,
        radius: orb.radius,
        color: Color::GOLD,
    });

    frame.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(20.0, 30.0),
        size_px: 20,
        color: Color::HUD,
        align: TextAlign::Left,
    });
    frame.push(DrawCommand::Text {
        text: format!("Lives: {}", state.lives_remaining()),
        pos: Vec2::new(20.0, 55.0),
        size_px: 18,
        color: Color::HUD,
        align: TextAlign::Left,
    });

    frame.push(DrawCommand::FillRect {
        pos: state.obstacle.pos,
        size: state.obstacle.size,
        color: Color::OBSTACLE,
    });

    let bob = bob_offset(time_secs, tuning.bob_amplitude, tuning.bob_frequency_hz);
    frame.push(DrawCommand::Sprite {
        pos: state.angel.pos + Vec2::new(0.0, bob),
        size: state.angel.size,
    });

    frame
}

fn push_cloud(frame: &mut Vec<DrawCommand>, cloud: &Cloud) {
    let r = cloud.size;
    let puffs = [
        (Vec2::new(r, r * 0.2), r * 0.8),
        (Vec2::new(r * 2.0, 0.0), r),
        (Vec2::new(r * 3.0, r * 0.25), r * 0.75),
    ];
    for (offset, radius) in puffs {
        frame.push(DrawCommand::FillCircle {
            center: cloud.pos + offset,
            radius,
            color: Color::CLOUD,
        });
    }
}

/// Dimming overlay with the final score, drawn over the last frame
pub fn game_over_overlay(state: &GameState) -> Vec<DrawCommand> {
    let field = state.tuning.playfield;
    let center = field * 0.5;
    vec![
        DrawCommand::FillRect {
            pos: Vec2::ZERO,
            size: field,
            color: Color::DIM,
        },
        DrawCommand::Text {
            text: "GAME OVER".to_string(),
            pos: center,
            size_px: 32,
            color: Color::WHITE,
            align: TextAlign::Center,
        },
        DrawCommand::Text {
            text: format!("Score: {}", state.score),
            pos: center + Vec2::new(0.0, 40.0),
            size_px: 20,
            color: Color::WHITE,
            align: TextAlign::Center,
        },
    ]
}
