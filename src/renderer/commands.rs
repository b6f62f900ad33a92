//! Backend-neutral draw commands in logical playfield units

use glam::Vec2;

/// RGBA color, channels in 0-255 with alpha in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas fill styles
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    pub const SKY_TOP: Color = Color::rgb(135, 206, 250);
    pub const SKY_BOTTOM: Color = Color::rgb(224, 246, 255);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 0.85);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const ORB_GLOW: Color = Color::rgba(255, 236, 130, 0.6);
    pub const OBSTACLE: Color = Color::rgb(51, 51, 51);
    pub const HUD: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DIM: Color = Color::rgba(0, 0, 0, 0.6);
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One drawing operation. A frame is an ordered list of these.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { size: Vec2 },
    /// Vertical two-stop gradient over a rectangle
    FillGradient { pos: Vec2, size: Vec2, top: Color, bottom: Color },
    FillRect { pos: Vec2, size: Vec2, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    /// Radial fade from `color` at `inner` radius to transparent at `outer`
    Glow { center: Vec2, inner: f32, outer: f32, color: Color },
    /// Text with its baseline at `pos.y`
    Text { text: String, pos: Vec2, size_px: u32, color: Color, align: TextAlign },
    /// Blit the angel sprite
    Sprite { pos: Vec2, size: Vec2 },
}
